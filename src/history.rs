//! Recent quote history.
//!
//! Storage is injected through the [`QuoteHistory`] trait. Every store keeps
//! at most `capacity` entries and drops the oldest when a new one arrives.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::pricing::requests::QuoteRequest;
use crate::pricing::responses::QuoteResult;

/// Default number of quotes kept
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// One recorded quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub request: QuoteRequest,
    pub result: QuoteResult,
}

impl HistoryEntry {
    pub fn new(request: QuoteRequest, result: QuoteResult, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at,
            request,
            result,
        }
    }

    /// Case-insensitive match on service type or category
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        let service = &self.request.service;
        service.service_type.to_lowercase().contains(&needle)
            || service.category.to_lowercase().contains(&needle)
    }
}

/// History storage errors
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Capacity-bounded store of recent quotes
pub trait QuoteHistory {
    /// Record an entry, evicting the oldest ones beyond capacity
    fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError>;

    /// All entries, oldest first
    fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    /// Remove one entry; returns whether it existed
    fn remove(&mut self, id: Uuid) -> Result<bool, HistoryError>;

    fn clear(&mut self) -> Result<(), HistoryError>;

    /// Entries newest first
    fn recent(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = self.entries()?;
        entries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(entries)
    }

    /// Newest-first entries whose service type or category contains `needle`.
    ///
    /// An empty needle returns everything.
    fn search(&self, needle: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
        let entries = self.recent()?;
        if needle.is_empty() {
            return Ok(entries);
        }
        Ok(entries.into_iter().filter(|e| e.matches(needle)).collect())
    }
}

/// History kept in process memory
#[derive(Debug, Clone)]
pub struct InMemoryHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteHistory for InMemoryHistory {
    fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        Ok(())
    }

    fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.entries.iter().cloned().collect())
    }

    fn remove(&mut self, id: Uuid) -> Result<bool, HistoryError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        Ok(self.entries.len() != before)
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        Ok(())
    }
}

/// History persisted as a JSON array in a single file.
///
/// A missing file reads as an empty history.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
    capacity: usize,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        debug!("Saved {} history entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl QuoteHistory for JsonFileHistory {
    fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.load()?;
        entries.push(entry);
        if entries.len() > self.capacity {
            let excess = entries.len() - self.capacity;
            entries.drain(..excess);
        }
        self.save(&entries)
    }

    fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        self.load()
    }

    fn remove(&mut self, id: Uuid) -> Result<bool, HistoryError> {
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.save(&entries)?;
        Ok(true)
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        info!("History cleared: {}", self.path.display());
        Ok(())
    }
}
