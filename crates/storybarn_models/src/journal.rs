//! In-process journal of provider events.
//!
//! Backs the debug-logs endpoint: a bounded ring of recent request,
//! response, and failure events per provider. Raw provider detail belongs
//! here and in the tracing log, never in client-facing responses.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;

/// Default number of entries retained per provider.
const DEFAULT_CAPACITY: usize = 200;

/// One journaled provider event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// When the event happened
    pub at: DateTime<Utc>,
    /// Short event name, e.g. "request", "retry", "error"
    pub event: String,
    /// Free-form detail (prompt sizes, status codes, error text)
    pub detail: String,
}

/// Bounded per-provider event journal.
///
/// Cheap to share: interior mutability behind a mutex, never held across an
/// await point.
///
/// # Examples
///
/// ```
/// use storybarn_models::ProviderJournal;
///
/// let journal = ProviderJournal::new();
/// journal.record("openai", "request", "story prompt, 412 chars");
/// assert_eq!(journal.snapshot_for("openai").len(), 1);
/// ```
#[derive(Debug)]
pub struct ProviderJournal {
    entries: Mutex<HashMap<String, VecDeque<JournalEntry>>>,
    capacity: usize,
}

impl Default for ProviderJournal {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderJournal {
    /// Create a journal with the default per-provider capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a journal retaining at most `capacity` entries per provider.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Record one event, evicting the oldest entry when full.
    pub fn record(&self, provider: &str, event: &str, detail: impl Into<String>) {
        let entry = JournalEntry {
            at: Utc::now(),
            event: event.to_string(),
            detail: detail.into(),
        };

        let mut entries = self.entries.lock().unwrap();
        let ring = entries.entry(provider.to_string()).or_default();
        if ring.len() == self.capacity {
            ring.pop_front();
        }
        ring.push_back(entry);
    }

    /// All entries for one provider, oldest first.
    pub fn snapshot_for(&self, provider: &str) -> Vec<JournalEntry> {
        self.entries
            .lock()
            .unwrap()
            .get(provider)
            .map(|ring| ring.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All entries grouped by provider, oldest first within each.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<JournalEntry>> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(provider, ring)| (provider.clone(), ring.iter().cloned().collect()))
            .collect()
    }
}
