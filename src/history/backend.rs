use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::models::WatchedItem;

/// Persistence seam for the watch history. Failures never surface to
/// callers: a bad load behaves as an empty history and a failed save is
/// logged and dropped.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HistoryBackend: Send + Sync {
    async fn load(&self) -> Vec<WatchedItem>;
    async fn save(&self, entries: &[WatchedItem]);
}

/// Durable backend holding the history as a single JSON array on disk
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl HistoryBackend for JsonFileBackend {
    async fn load(&self) -> Vec<WatchedItem> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Failed to read watch history, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Corrupt watch history, treating as empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, entries: &[WatchedItem]) {
        let json = match serde_json::to_vec(entries) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(error = %err, "Failed to serialize watch history");
                return;
            }
        };

        if let Err(err) = tokio::fs::write(&self.path, json).await {
            tracing::error!(path = %self.path.display(), error = %err, "Failed to write watch history");
        }
    }
}

/// In-process backend for tests and ephemeral deployments
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<Vec<WatchedItem>>,
}

#[async_trait]
impl HistoryBackend for MemoryBackend {
    async fn load(&self) -> Vec<WatchedItem> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    async fn save(&self, entries: &[WatchedItem]) {
        if let Ok(mut stored) = self.entries.lock() {
            *stored = entries.to_vec();
        }
    }
}
