use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(make_span_with_request_id),
        )
        // Outermost: assigns the id the trace span picks up
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Backend proxies
        .route("/search", get(handlers::search))
        .route("/recommend", get(handlers::recommend))
        // Recommendation flow over the watch history
        .route("/recommendations", get(handlers::recommendations))
        // Watch history
        .route(
            "/watched",
            get(handlers::get_watched)
                .post(handlers::record_watched)
                .delete(handlers::clear_watched),
        )
        // Browse feeds
        .route("/titles/trending", get(handlers::trending_movies))
        .route("/titles/popular", get(handlers::popular_movies))
        .route("/series/top-rated", get(handlers::top_rated_series))
        // Details and trailers
        .route("/titles/:id", get(handlers::movie_details))
        .route("/titles/:id/videos", get(handlers::movie_videos))
        .route("/titles/:id/trailer", get(handlers::movie_trailer))
        .route("/series/:id/videos", get(handlers::series_videos))
        .route("/series/:id/trailer", get(handlers::series_trailer))
}
