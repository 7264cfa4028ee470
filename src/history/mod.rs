//! Watch-history store: an ordered, size-bounded list of watched titles,
//! unique per `(id, kind)`, persisted through a pluggable backend.

use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use crate::models::{MediaKind, WatchedItem};

mod backend;

pub use backend::{HistoryBackend, JsonFileBackend, MemoryBackend};
#[cfg(test)]
pub use backend::MockHistoryBackend;

/// Entries kept after any record; the oldest inserted is evicted first
pub const HISTORY_CAPACITY: usize = 20;

/// Change notification for subscribers, replacing the original's implicit
/// storage-change signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEvent {
    Recorded,
    Cleared,
}

/// The single source of truth for what the user has watched
pub struct WatchHistory {
    backend: Arc<dyn HistoryBackend>,
    entries: RwLock<Vec<WatchedItem>>,
    events: broadcast::Sender<HistoryEvent>,
}

impl WatchHistory {
    /// Opens the history, loading whatever the backend has. A missing or
    /// corrupt payload starts the history empty.
    pub async fn open(backend: Arc<dyn HistoryBackend>) -> Self {
        let entries = backend.load().await;
        let (events, _) = broadcast::channel(16);
        Self {
            backend,
            entries: RwLock::new(entries),
            events,
        }
    }

    /// Inserts an entry, or refreshes its timestamp when `(id, kind)` is
    /// already present. Keeps at most [`HISTORY_CAPACITY`] entries, dropping
    /// the oldest inserted first. Persistence failures are swallowed by the
    /// backend.
    pub async fn record(&self, item: WatchedItem) {
        let mut entries = self.entries.write().await;

        match entries
            .iter_mut()
            .find(|e| e.id == item.id && e.kind == item.kind)
        {
            Some(existing) => existing.watched_at = item.watched_at,
            None => {
                entries.push(item);
                if entries.len() > HISTORY_CAPACITY {
                    let overflow = entries.len() - HISTORY_CAPACITY;
                    entries.drain(..overflow);
                }
            }
        }

        self.backend.save(&entries).await;
        drop(entries);

        let _ = self.events.send(HistoryEvent::Recorded);
    }

    /// Snapshot of all entries in insertion order. Callers wanting recency
    /// sort by `watched_at` descending.
    pub async fn list(&self) -> Vec<WatchedItem> {
        self.entries.read().await.clone()
    }

    /// The entry with the latest `watched_at`, if any
    pub async fn most_recent(&self) -> Option<WatchedItem> {
        self.entries
            .read()
            .await
            .iter()
            .max_by_key(|e| e.watched_at)
            .cloned()
    }

    /// Whether `(id, kind)` is currently recorded
    pub async fn is_recorded(&self, id: u64, kind: MediaKind) -> bool {
        self.entries
            .read()
            .await
            .iter()
            .any(|e| e.id == id && e.kind == kind)
    }

    /// Removes all entries and persists the empty list
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
        self.backend.save(&entries).await;
        drop(entries);

        let _ = self.events.send(HistoryEvent::Cleared);
    }

    /// Subscribes to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEvent> {
        self.events.subscribe()
    }
}
