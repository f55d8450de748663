use serde::{Deserialize, Serialize};

/// A track ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackId(pub String);
impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A track, as the Spotify top-items endpoints return it. Used both for
/// display and as the quiz question source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// The track ID
    pub id: TrackId,
    /// The track name
    pub name: String,
    /// The album the track appears on
    pub album: Album,
    /// The credited artists, in order
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    /// A 30-second preview URL, when Spotify provides one
    #[serde(default)]
    pub preview_url: Option<String>,
}
impl Track {
    /// The name of the primary (first-credited) artist, if any.
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }

    /// The release year parsed from the album's `release_date`.
    ///
    /// Spotify reports release dates with day, month, or year precision
    /// (`2001-05-01`, `2001-05`, `2001`); the leading year component is
    /// all this client cares about.
    pub fn release_year(&self) -> Option<i32> {
        let year = self.album.release_date.split('-').next()?;
        year.parse().ok().filter(|y| *y > 0)
    }
}

/// An artist credit on a track. Only the name is guaranteed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    /// The artist name
    pub name: String,
}

/// The album a track belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    /// The album name
    pub name: String,
    /// The release date; day, month, or year precision
    #[serde(default)]
    pub release_date: String,
    /// Cover images, largest first. May be empty.
    #[serde(default)]
    pub images: Vec<Image>,
}

/// A remote image reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// The image URL
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track_with_release_date(date: &str) -> Track {
        Track {
            id: TrackId("t1".to_string()),
            name: "Song".to_string(),
            album: Album {
                name: "Album".to_string(),
                release_date: date.to_string(),
                images: vec![],
            },
            artists: vec![TrackArtist {
                name: "Artist".to_string(),
            }],
            preview_url: None,
        }
    }

    #[test]
    fn test_release_year_parsing() {
        assert_eq!(
            track_with_release_date("2001-05-01").release_year(),
            Some(2001)
        );
        assert_eq!(track_with_release_date("2001-05").release_year(), Some(2001));
        assert_eq!(track_with_release_date("2001").release_year(), Some(2001));
        assert_eq!(track_with_release_date("").release_year(), None);
        assert_eq!(track_with_release_date("unknown").release_year(), None);
    }

    #[test]
    fn test_track_deserializes_from_spotify_shape() {
        let track: Track = serde_json::from_str(
            r#"{
                "id": "3n3Ppam7vgaVa1iaRUc9Lp",
                "name": "Mr. Brightside",
                "album": {
                    "name": "Hot Fuss",
                    "release_date": "2004-06-15",
                    "images": [{"url": "https://i.scdn.co/image/abc"}]
                },
                "artists": [{"name": "The Killers"}],
                "preview_url": null
            }"#,
        )
        .unwrap();
        assert_eq!(track.name, "Mr. Brightside");
        assert_eq!(track.primary_artist(), Some("The Killers"));
        assert_eq!(track.release_year(), Some(2004));
        assert!(track.preview_url.is_none());
    }
}
