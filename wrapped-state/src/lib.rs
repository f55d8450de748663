//! Representations of the data a Spotify Wrapper client cares about.
//!
//! Separated out so that both the API client and the frontends can share
//! the same wire types.
#![deny(missing_docs)]

use serde::{Deserialize, Serialize};

mod track;
pub use track::{Album, Image, Track, TrackArtist, TrackId};

mod artist;
pub use artist::{Artist, ArtistId};

mod wrap;
pub use wrap::{CreatedWrap, Paged, TimeRange, WrapData, WrapId, WrapList, WrapSummary};

/// A playlist, as returned by the backend's playlist listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    /// The Spotify playlist ID.
    pub id: String,
    /// The playlist name.
    pub name: String,
    /// Cover images, largest first. May be empty.
    #[serde(default)]
    pub images: Vec<Image>,
    /// Track count envelope, if the backend forwarded it.
    #[serde(default)]
    pub tracks: Option<PlaylistTracks>,
}

/// The `tracks` envelope on a playlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracks {
    /// The number of tracks in the playlist.
    pub total: u32,
}

/// The signed-in user, as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The backend user ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// The username.
    pub username: String,
    /// The email address, if the backend stores one.
    #[serde(default)]
    pub email: Option<String>,
}
