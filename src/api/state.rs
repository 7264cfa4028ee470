use std::sync::Arc;

use crate::{
    config::Config,
    history::{HistoryBackend, WatchHistory},
    services::{RecommendClient, TmdbClient},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub history: Arc<WatchHistory>,
    pub tmdb: TmdbClient,
    pub backend: RecommendClient,
}

impl AppState {
    /// Builds the state from configuration, loading the watch history
    /// through the given persistence backend.
    pub async fn new(config: &Config, history_backend: Arc<dyn HistoryBackend>) -> Self {
        Self {
            history: Arc::new(WatchHistory::open(history_backend).await),
            tmdb: TmdbClient::new(config.tmdb_api_key.clone(), config.tmdb_api_url.clone()),
            backend: RecommendClient::new(config.recommend_api_url.clone()),
        }
    }
}
