use serde::{Deserialize, Serialize};

use crate::Image;

/// An artist ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtistId(pub String);
impl std::fmt::Display for ArtistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An artist, as the Spotify top-items endpoints return it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    /// The artist ID
    pub id: ArtistId,
    /// The artist name
    pub name: String,
    /// Genre tags; may be empty
    #[serde(default)]
    pub genres: Vec<String>,
    /// Artist images, largest first. May be empty.
    #[serde(default)]
    pub images: Vec<Image>,
}
impl Artist {
    /// The first couple of genres joined for display, or `None` when
    /// Spotify has no genre data for the artist.
    pub fn genre_summary(&self) -> Option<String> {
        if self.genres.is_empty() {
            return None;
        }
        Some(self.genres.iter().take(2).cloned().collect::<Vec<_>>().join(" / "))
    }
}
