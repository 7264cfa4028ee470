//! Client for the recommendation backend. Speaks the backend's wire
//! contract: `GET /api/recommend?title=&count=` and
//! `GET /api/search?query=&limit=`, with 404 error details of the form
//! `"... Did you mean one of these: A, B?"`.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::models::RecommendationResponse;

/// Failures talking to the recommendation backend
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("title not known to the recommendation backend")]
    NotFound { suggestions: Vec<String> },

    #[error("recommendation backend returned status {0}")]
    Status(StatusCode),

    #[error("recommendation backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid recommendation payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// 404 body from the backend carries a free-text `detail` field
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    #[serde(default)]
    detail: String,
}

#[derive(Clone)]
pub struct RecommendClient {
    http_client: HttpClient,
    base_url: String,
}

impl RecommendClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    /// Forwards a title search, returning the backend body verbatim
    pub async fn search(&self, query: &str, limit: u32) -> Result<Value, BackendError> {
        let url = format!("{}/api/search", self.base_url);
        let limit = limit.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[("query", query), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "Search backend returned an error");
            return Err(BackendError::Status(status));
        }

        Ok(response.json().await?)
    }

    /// Requests recommendations for a title, returning the backend body
    /// verbatim. A backend 404 becomes [`BackendError::NotFound`] with any
    /// suggested titles parsed out of the error detail.
    pub async fn recommend_raw(&self, title: &str, count: u32) -> Result<Value, BackendError> {
        let url = format!("{}/api/recommend", self.base_url);
        let count = count.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[("title", title), ("count", count.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let detail = response
                .json::<BackendErrorBody>()
                .await
                .map(|body| body.detail)
                .unwrap_or_default();
            tracing::info!(%title, detail = %detail, "Title not found in recommendation backend");
            return Err(BackendError::NotFound {
                suggestions: parse_suggestions(&detail),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "Recommendation backend returned an error");
            return Err(BackendError::Status(status));
        }

        Ok(response.json().await?)
    }

    /// Typed variant of [`recommend_raw`](Self::recommend_raw)
    pub async fn recommend(
        &self,
        title: &str,
        count: u32,
    ) -> Result<RecommendationResponse, BackendError> {
        let value = self.recommend_raw(title, count).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Extracts suggested titles from the backend's free-text 404 detail.
/// The `"Did you mean one of these: A, B?"` phrasing is a contract with the
/// backend and must match it byte for byte.
pub fn parse_suggestions(detail: &str) -> Vec<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"Did you mean one of these: (.*?)\?").expect("suggestion pattern is valid")
    });

    pattern
        .captures(detail)
        .and_then(|captures| captures.get(1))
        .map(|titles| titles.as_str().split(", ").map(str::to_string).collect())
        .unwrap_or_default()
}
