use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a watched title. Serialized as `movie`/`tv` to match the
/// metadata API's naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv")]
    Series,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Series => write!(f, "tv"),
        }
    }
}

/// A single entry in the watch history, unique per `(id, kind)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedItem {
    pub id: u64,
    pub title: String,
    pub kind: MediaKind,
    pub watched_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
}

impl WatchedItem {
    /// Creates an entry stamped with the current time.
    pub fn new(id: u64, title: impl Into<String>, kind: MediaKind, poster_path: Option<String>) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            watched_at: Utc::now(),
            poster_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_serializes_as_movie_and_tv() {
        assert_eq!(serde_json::to_string(&MediaKind::Movie).unwrap(), "\"movie\"");
        assert_eq!(serde_json::to_string(&MediaKind::Series).unwrap(), "\"tv\"");
    }

    #[test]
    fn watched_item_round_trips() {
        let item = WatchedItem::new(27205, "Inception", MediaKind::Movie, Some("/poster.jpg".into()));
        let json = serde_json::to_string(&item).unwrap();
        let back: WatchedItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn poster_path_is_omitted_when_absent() {
        let item = WatchedItem::new(1396, "Breaking Bad", MediaKind::Series, None);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("poster_path").is_none());
    }
}
