use serde::{Deserialize, Serialize};

use crate::{Artist, Track};

/// A wrap ID, assigned by the backend when a wrap is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WrapId(pub u64);
impl std::fmt::Display for WrapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of Spotify's statistical windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    /// Roughly the last 4 weeks.
    ShortTerm,
    /// Roughly the last 6 months.
    #[default]
    MediumTerm,
    /// All time.
    LongTerm,
}
impl TimeRange {
    /// All ranges, in selector order.
    pub const ALL: [TimeRange; 3] = [
        TimeRange::ShortTerm,
        TimeRange::MediumTerm,
        TimeRange::LongTerm,
    ];

    /// The wire value the backend expects (`short_term` etc).
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }

    /// The human-readable selector label.
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "Last 4 Weeks",
            TimeRange::MediumTerm => "Last 6 Months",
            TimeRange::LongTerm => "All Time",
        }
    }
}
impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The `{ items: [...] }` envelope Spotify wraps top-item lists in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paged<T> {
    /// The items, in rank order (most listened first).
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}
impl<T> Default for Paged<T> {
    fn default() -> Self {
        Paged { items: Vec::new() }
    }
}

/// A full Wrapped dataset: top artists and tracks over both the recent
/// and all-time windows. Immutable once fetched; replaced wholesale on
/// re-fetch.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WrapData {
    /// Top artists over the recent window.
    #[serde(default)]
    pub top_artists_recent: Paged<Artist>,
    /// Top artists over the all-time window.
    #[serde(default)]
    pub top_artists_all_time: Paged<Artist>,
    /// Top tracks over the recent window.
    #[serde(default)]
    pub top_tracks_recent: Paged<Track>,
    /// Top tracks over the all-time window.
    #[serde(default)]
    pub top_tracks_all_time: Paged<Track>,
}

/// A persisted wrap snapshot for a single time range, as returned by the
/// create and detail endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedWrap {
    /// Top tracks for the snapshot's range.
    #[serde(default)]
    pub top_tracks: Paged<Track>,
    /// Top artists for the snapshot's range.
    #[serde(default)]
    pub top_artists: Paged<Artist>,
    /// The range the snapshot was generated for.
    pub time_range: TimeRange,
}

/// A row in the remote wrap history listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrapSummary {
    /// The wrap ID.
    pub id: WrapId,
    /// ISO-8601 generation timestamp.
    pub date_generated: String,
    /// The display title the backend assigned.
    pub title: String,
}

/// The `{ wraps: [...] }` envelope on the history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WrapList {
    /// The wraps, most recent first.
    #[serde(default)]
    pub wraps: Vec<WrapSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_wire_values() {
        assert_eq!(TimeRange::ShortTerm.as_str(), "short_term");
        assert_eq!(TimeRange::MediumTerm.as_str(), "medium_term");
        assert_eq!(TimeRange::LongTerm.as_str(), "long_term");
        for range in TimeRange::ALL {
            let json = serde_json::to_string(&range).unwrap();
            assert_eq!(json, format!("\"{}\"", range.as_str()));
        }
    }

    #[test]
    fn test_wrap_data_accepts_camel_case_keys() {
        let data: WrapData = serde_json::from_str(
            r#"{
                "topArtistsRecent": {"items": []},
                "topArtistsAllTime": {"items": []},
                "topTracksRecent": {"items": []},
                "topTracksAllTime": {"items": []}
            }"#,
        )
        .unwrap();
        assert!(data.top_tracks_recent.items.is_empty());
    }

    #[test]
    fn test_wrap_list_envelope() {
        let list: WrapList = serde_json::from_str(
            r#"{"wraps": [{"id": 7, "date_generated": "2024-11-20T10:00:00Z", "title": "Wrap - short_term - 2024-11-20"}]}"#,
        )
        .unwrap();
        assert_eq!(list.wraps.len(), 1);
        assert_eq!(list.wraps[0].id, WrapId(7));
    }
}
