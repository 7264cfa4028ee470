use serde::{Deserialize, Serialize};

use super::{MediaKind, MovieDetails};

/// A single backend recommendation: title plus relevance score, with the
/// metadata id when the backend knows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTitle {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Successful payload from the recommendation backend
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationResponse {
    /// Source title the backend scored against, when echoed back
    #[serde(default)]
    pub movie: Option<String>,
    #[serde(default)]
    pub results: Vec<ScoredTitle>,
}

/// Terminal state of one recommendation pass. The flow starts idle, enters
/// requesting while the backend call is in flight, and ends in one of these.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    /// Nothing watched yet; no request was made
    Idle,
    /// The most recent watched entry is not a movie; no request was made
    NotSupported { kind: MediaKind },
    /// Backend did not know the title
    NotFound {
        title: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        suggestions: Vec<String>,
    },
    /// Backend or network failure, already logged
    Failed { message: String },
    /// Recommendations hydrated into full detail records
    Resolved {
        based_on: String,
        movies: Vec<MovieDetails>,
    },
}
