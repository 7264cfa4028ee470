use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::models::{
    pick_trailer, MediaKind, MovieCard, MovieDetailView, RecommendationOutcome, SeriesCard, Video,
    WatchedItem,
};
use crate::services::{recommend_api::BackendError, recommender};

use super::AppState;

/// Default `limit` forwarded to the search backend
const DEFAULT_SEARCH_LIMIT: u32 = 10;
/// Default `count` forwarded to the recommendation backend
const DEFAULT_RECOMMEND_COUNT: u32 = 5;

// Request types

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub title: Option<String>,
    pub count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RecordWatchedRequest {
    pub id: u64,
    pub title: String,
    pub kind: MediaKind,
    #[serde(default)]
    pub poster_path: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Proxy for the backend title search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Value>> {
    let query = params
        .query
        .filter(|q| !q.is_empty())
        .ok_or(AppError::MissingParameter("Search query is required"))?;
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

    match state.backend.search(&query, limit).await {
        Ok(body) => Ok(Json(body)),
        Err(BackendError::Status(status)) => Err(AppError::Upstream {
            status,
            message: "Failed to search movies",
        }),
        Err(BackendError::Transport(err)) => Err(AppError::HttpClient(err)),
        Err(err) => Err(AppError::Internal(err.to_string())),
    }
}

/// Proxy for the backend recommendation lookup
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> AppResult<Json<Value>> {
    let title = params
        .title
        .filter(|t| !t.is_empty())
        .ok_or(AppError::MissingParameter("Movie title is required"))?;
    let count = params.count.unwrap_or(DEFAULT_RECOMMEND_COUNT);

    match state.backend.recommend_raw(&title, count).await {
        Ok(body) => Ok(Json(body)),
        Err(BackendError::NotFound { suggestions }) => Err(AppError::NotFound {
            message: "Movie not found".to_string(),
            suggestions,
        }),
        Err(BackendError::Status(status)) => Err(AppError::Upstream {
            status,
            message: "Failed to get recommendations",
        }),
        Err(BackendError::Transport(err)) => Err(AppError::HttpClient(err)),
        Err(err) => Err(AppError::Internal(err.to_string())),
    }
}

/// Runs a recommendation pass over the watch history. Always 200: every
/// failure mode is a tagged outcome, never an error response.
pub async fn recommendations(State(state): State<AppState>) -> Json<RecommendationOutcome> {
    let outcome =
        recommender::recommend_from_history(&state.history, &state.backend, &state.tmdb).await;
    Json(outcome)
}

/// Watch history, most recent first
pub async fn get_watched(State(state): State<AppState>) -> Json<Vec<WatchedItem>> {
    let mut entries = state.history.list().await;
    entries.sort_by(|a, b| b.watched_at.cmp(&a.watched_at));
    Json(entries)
}

/// Records a watched title (trailer opened)
pub async fn record_watched(
    State(state): State<AppState>,
    Json(request): Json<RecordWatchedRequest>,
) -> StatusCode {
    let item = WatchedItem::new(request.id, request.title, request.kind, request.poster_path);
    state.history.record(item).await;
    StatusCode::OK
}

/// Clears the watch history
pub async fn clear_watched(State(state): State<AppState>) -> StatusCode {
    state.history.clear().await;
    StatusCode::NO_CONTENT
}

/// Trending movies feed
pub async fn trending_movies(State(state): State<AppState>) -> AppResult<Json<Vec<MovieCard>>> {
    let movies = state.tmdb.trending_movies().await?;
    Ok(Json(movies.into_iter().map(MovieCard::from).collect()))
}

/// Popular movies feed
pub async fn popular_movies(State(state): State<AppState>) -> AppResult<Json<Vec<MovieCard>>> {
    let movies = state.tmdb.popular_movies().await?;
    Ok(Json(movies.into_iter().map(MovieCard::from).collect()))
}

/// Top-rated series feed
pub async fn top_rated_series(State(state): State<AppState>) -> AppResult<Json<Vec<SeriesCard>>> {
    let series = state.tmdb.top_rated_series().await?;
    Ok(Json(series.into_iter().map(SeriesCard::from).collect()))
}

/// Full movie record with derived presentation fields
pub async fn movie_details(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<MovieDetailView>> {
    let details = state.tmdb.movie_details(id).await?;
    Ok(Json(MovieDetailView::from(details)))
}

/// All videos attached to a movie
pub async fn movie_videos(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Vec<Video>>> {
    Ok(Json(state.tmdb.movie_videos(id).await?))
}

/// All videos attached to a series
pub async fn series_videos(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Vec<Video>>> {
    Ok(Json(state.tmdb.series_videos(id).await?))
}

/// The trailer to play for a movie
pub async fn movie_trailer(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Video>> {
    let videos = state.tmdb.movie_videos(id).await?;
    let trailer = pick_trailer(&videos).ok_or_else(|| AppError::not_found("No trailer available"))?;
    Ok(Json(trailer.clone()))
}

/// The trailer to play for a series
pub async fn series_trailer(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Video>> {
    let videos = state.tmdb.series_videos(id).await?;
    let trailer = pick_trailer(&videos).ok_or_else(|| AppError::not_found("No trailer available"))?;
    Ok(Json(trailer.clone()))
}
