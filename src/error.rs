use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    MissingParameter(&'static str),

    #[error("{message}")]
    NotFound {
        message: String,
        suggestions: Vec<String>,
    },

    /// Backend failure surfaced with its own status and a fixed message
    #[error("{message}")]
    Upstream {
        status: StatusCode,
        message: &'static str,
    },

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for a plain 404 without suggestions
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound {
            message: message.into(),
            suggestions: Vec::new(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MissingParameter(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            AppError::NotFound {
                message,
                suggestions,
            } => {
                let body = if suggestions.is_empty() {
                    json!({ "error": message })
                } else {
                    json!({ "error": message, "suggestions": suggestions })
                };
                (StatusCode::NOT_FOUND, body)
            }
            AppError::Upstream { status, message } => (status, json!({ "error": message })),
            AppError::ExternalApi(msg) => {
                tracing::error!(error = %msg, "External API failure");
                (StatusCode::BAD_GATEWAY, json!({ "error": msg }))
            }
            AppError::HttpClient(err) => {
                tracing::error!(error = %err, "HTTP client failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_parameter_maps_to_400_with_fixed_body() {
        let response = AppError::MissingParameter("Search query is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Search query is required" })
        );
    }

    #[tokio::test]
    async fn not_found_carries_structured_suggestions() {
        let response = AppError::NotFound {
            message: "Movie not found".to_string(),
            suggestions: vec!["Inception".to_string(), "Interstellar".to_string()],
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({
                "error": "Movie not found",
                "suggestions": ["Inception", "Interstellar"]
            })
        );
    }

    #[tokio::test]
    async fn not_found_without_suggestions_has_no_suggestions_field() {
        let response = AppError::not_found("Movie not found").into_response();
        let body = body_json(response).await;
        assert!(body.get("suggestions").is_none());
    }

    #[tokio::test]
    async fn upstream_passes_backend_status_through() {
        let response = AppError::Upstream {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "Failed to search movies",
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Failed to search movies" })
        );
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let response = AppError::Internal("lock poisoned".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Internal server error" })
        );
    }
}
