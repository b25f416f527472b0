use tokio::sync::RwLock;

use crate::models::Timestamp;

/// Append-only timestamps. Each id is the previous entry's id + 1,
/// or 0 for the first entry.
#[derive(Debug, Default)]
pub struct PostLog {
    entries: RwLock<Vec<Timestamp>>,
}

impl PostLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Timestamp>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Append an entry stamped `now` (seconds since the epoch).
    pub async fn append(&self, now: i64) -> Timestamp {
        let mut entries = self.entries.write().await;
        let id = entries.last().map_or(0, |last| last.id + 1);
        let entry = Timestamp { id, timestamp: now };
        entries.push(entry);
        entry
    }

    pub async fn list(&self) -> Vec<Timestamp> {
        self.entries.read().await.clone()
    }
}
