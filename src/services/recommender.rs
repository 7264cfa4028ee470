//! Recommendation requester: turns the most recently watched title into a
//! list of fully hydrated movie records.
//!
//! The flow never fails loudly. Every failure mode collapses into a
//! [`RecommendationOutcome`] variant the caller can render as-is.

use crate::{
    history::WatchHistory,
    models::{MediaKind, MovieDetails, RecommendationOutcome, ScoredTitle},
    services::{recommend_api::BackendError, RecommendClient, TmdbClient},
};

/// Titles requested from the backend per pass
const RECOMMENDATION_COUNT: u32 = 10;

const GENERIC_FAILURE: &str = "Failed to get recommendations. Please try again later.";

/// Runs one recommendation pass against the current watch history.
///
/// Leaves idle only when at least one entry is recorded; short-circuits
/// without a network call when the most recent entry is not a movie. Only
/// the single most-recent entry is considered.
pub async fn recommend_from_history(
    history: &WatchHistory,
    backend: &RecommendClient,
    tmdb: &TmdbClient,
) -> RecommendationOutcome {
    let Some(most_recent) = history.most_recent().await else {
        return RecommendationOutcome::Idle;
    };

    if most_recent.kind != MediaKind::Movie {
        return RecommendationOutcome::NotSupported {
            kind: most_recent.kind,
        };
    }

    let response = match backend
        .recommend(&most_recent.title, RECOMMENDATION_COUNT)
        .await
    {
        Ok(response) => response,
        Err(BackendError::NotFound { suggestions }) => {
            return RecommendationOutcome::NotFound {
                title: most_recent.title,
                suggestions,
            };
        }
        Err(err) => {
            tracing::error!(error = %err, title = %most_recent.title, "Recommendation request failed");
            return RecommendationOutcome::Failed {
                message: GENERIC_FAILURE.to_string(),
            };
        }
    };

    let based_on = response.movie.unwrap_or(most_recent.title);
    let movies = resolve_details(tmdb, response.results).await;

    tracing::info!(
        based_on = %based_on,
        resolved = movies.len(),
        "Recommendation pass completed"
    );

    RecommendationOutcome::Resolved { based_on, movies }
}

/// Resolves each recommended title to a full detail record, one independent
/// lookup per id. A failing lookup drops that one item, never the pass.
async fn resolve_details(tmdb: &TmdbClient, results: Vec<ScoredTitle>) -> Vec<MovieDetails> {
    let mut tasks = Vec::new();

    for scored in results {
        let Some(id) = scored.id else {
            tracing::debug!(title = %scored.title, "Recommendation carries no metadata id, skipping");
            continue;
        };
        let tmdb = tmdb.clone();
        tasks.push(tokio::spawn(async move {
            (scored.title, tmdb.movie_details(id).await)
        }));
    }

    let mut movies = Vec::new();
    for task in tasks {
        match task.await {
            Ok((_, Ok(details))) => movies.push(details),
            Ok((title, Err(err))) => {
                tracing::warn!(error = %err, title = %title, "Detail lookup failed, dropping recommendation");
            }
            Err(err) => {
                tracing::error!(error = %err, "Detail lookup task failed");
            }
        }
    }

    movies
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::history::MemoryBackend;
    use crate::models::WatchedItem;

    // Clients pointed at an unroutable address: any network call would fail
    // loudly, proving the short-circuit paths never reach the network.
    fn offline_clients() -> (RecommendClient, TmdbClient) {
        (
            RecommendClient::new("http://127.0.0.1:1".to_string()),
            TmdbClient::new("key".to_string(), "http://127.0.0.1:1".to_string()),
        )
    }

    #[tokio::test]
    async fn empty_history_yields_idle_without_a_network_call() {
        let history = WatchHistory::open(Arc::new(MemoryBackend::default())).await;
        let (backend, tmdb) = offline_clients();

        let outcome = recommend_from_history(&history, &backend, &tmdb).await;
        assert!(matches!(outcome, RecommendationOutcome::Idle));
    }

    #[tokio::test]
    async fn series_most_recent_yields_not_supported_without_a_network_call() {
        let history = WatchHistory::open(Arc::new(MemoryBackend::default())).await;
        history
            .record(WatchedItem::new(1396, "Breaking Bad", MediaKind::Series, None))
            .await;
        let (backend, tmdb) = offline_clients();

        let outcome = recommend_from_history(&history, &backend, &tmdb).await;
        assert!(matches!(
            outcome,
            RecommendationOutcome::NotSupported {
                kind: MediaKind::Series
            }
        ));
    }

    #[tokio::test]
    async fn unreachable_backend_degrades_to_the_generic_failure() {
        let history = WatchHistory::open(Arc::new(MemoryBackend::default())).await;
        history
            .record(WatchedItem::new(27205, "Inception", MediaKind::Movie, None))
            .await;
        let (backend, tmdb) = offline_clients();

        match recommend_from_history(&history, &backend, &tmdb).await {
            RecommendationOutcome::Failed { message } => {
                assert_eq!(message, GENERIC_FAILURE);
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
