//! Local on-disk record of generated wraps, kept alongside the
//! backend's persisted history so the dashboard can show the most
//! recent wrap per time range without a network round-trip.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wrapped_state::{CreatedWrap, TimeRange};

/// Filename of the local history file, relative to the working directory.
pub const HISTORY_FILENAME: &str = "wrapped-history.json";

/// A wrap that was generated in this client, with when it happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub time_range: TimeRange,
    pub generated_at: DateTime<Utc>,
    pub wrap: CreatedWrap,
}

/// The local wrap history. One entry per time range; regenerating a
/// range replaces its previous entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WrapHistory {
    entries: Vec<HistoryEntry>,
}

impl WrapHistory {
    /// Load the history from `path`. A missing file is an empty history;
    /// an unreadable one is logged and treated as empty.
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&contents) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("failed to parse {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
    }

    /// Record a freshly generated wrap, replacing any earlier entry for
    /// the same time range.
    pub fn record(&mut self, wrap: CreatedWrap, generated_at: DateTime<Utc>) {
        let time_range = wrap.time_range;
        self.entries.retain(|entry| entry.time_range != time_range);
        self.entries.push(HistoryEntry {
            time_range,
            generated_at,
            wrap,
        });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The most recently generated entry, if any.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.iter().max_by_key(|entry| entry.generated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapped_state::Paged;

    fn wrap(time_range: TimeRange) -> CreatedWrap {
        CreatedWrap {
            top_tracks: Paged::default(),
            top_artists: Paged::default(),
            time_range,
        }
    }

    #[test]
    fn test_record_replaces_same_range() {
        let mut history = WrapHistory::default();
        let t0 = Utc::now();
        history.record(wrap(TimeRange::ShortTerm), t0);
        history.record(wrap(TimeRange::LongTerm), t0);
        history.record(wrap(TimeRange::ShortTerm), t0 + chrono::Duration::hours(1));
        assert_eq!(history.entries().len(), 2);
        assert_eq!(
            history.latest().map(|e| e.time_range),
            Some(TimeRange::ShortTerm)
        );
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let path = std::env::temp_dir().join("wrapped-history-test-missing.json");
        let _ = std::fs::remove_file(&path);
        assert!(WrapHistory::load(&path).entries().is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "wrapped-history-test-{}.json",
            std::process::id()
        ));
        let mut history = WrapHistory::default();
        history.record(wrap(TimeRange::MediumTerm), Utc::now());
        history.save(&path).unwrap();
        let loaded = WrapHistory::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.entries().len(), 1);
        assert_eq!(loaded.entries()[0].time_range, TimeRange::MediumTerm);
    }
}
