use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinefeed::api::{create_router, AppState};
use cinefeed::config::Config;
use cinefeed::history::JsonFileBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinefeed=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let history_backend = Arc::new(JsonFileBackend::new(config.history_path.clone()));
    let state = AppState::new(&config, history_backend).await;
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "cinefeed listening");
    axum::serve(listener, app).await?;

    Ok(())
}
