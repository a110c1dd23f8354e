//! Bounded, newest-first UUID history.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Maximum number of retained entries.
pub const HISTORY_LIMIT: usize = 50;

/// UUID flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum UuidVersion {
    /// Random.
    #[default]
    V4,
    /// Time and node based.
    V1,
}

impl fmt::Display for UuidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => f.write_str("v4"),
            Self::V1 => f.write_str("v1"),
        }
    }
}

/// One generated identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Handle used to remove this entry.
    pub id: Uuid,
    pub value: String,
    pub variant: UuidVersion,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(value: Uuid, variant: UuidVersion) -> Self {
        Self {
            id: Uuid::new_v4(),
            value: value.hyphenated().to_string(),
            variant,
            created_at: Utc::now(),
        }
    }

    /// `<uuid> (V4) - <created_at>`
    pub fn export_line(&self) -> String {
        format!(
            "{} ({}) - {}",
            self.value,
            self.variant.to_string().to_uppercase(),
            self.created_at.to_rfc3339()
        )
    }
}

/// Count of entries per version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistoryCounts {
    pub total: usize,
    pub v4: usize,
    pub v1: usize,
}

/// Session UUID history. Never holds more than [`HISTORY_LIMIT`] entries.
#[derive(Debug, Default)]
pub struct UuidHistory {
    entries: RwLock<VecDeque<HistoryEntry>>,
}

impl UuidHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a batch, keeping its order, then drop the oldest overflow.
    pub async fn record_batch(&self, batch: Vec<HistoryEntry>) {
        let mut entries = self.entries.write().await;
        for entry in batch.into_iter().rev() {
            entries.push_front(entry);
        }
        entries.truncate(HISTORY_LIMIT);
    }

    /// Entries, newest first.
    pub async fn list(&self) -> Vec<HistoryEntry> {
        self.entries.read().await.iter().cloned().collect()
    }

    /// Remove every entry; returns how many were dropped.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        removed
    }

    /// Remove the entry with handle `id`.
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut entries = self.entries.write().await;
        match entries.iter().position(|e| e.id == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn counts(&self) -> HistoryCounts {
        let entries = self.entries.read().await;
        let v4 = entries.iter().filter(|e| e.variant == UuidVersion::V4).count();
        HistoryCounts {
            total: entries.len(),
            v4,
            v1: entries.len() - v4,
        }
    }

    /// Plain-text export, one entry per line.
    pub async fn export_lines(&self) -> String {
        self.entries
            .read()
            .await
            .iter()
            .map(HistoryEntry::export_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
