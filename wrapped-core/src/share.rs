//! Plain-text share summary of a wrap, for pasting wherever the user
//! likes.

use wrapped_state::WrapData;

const SHARE_ITEM_COUNT: usize = 3;

/// Render a wrap as shareable text: the top few artists and tracks,
/// plus the quiz score if the game was played.
pub fn share_text(data: &WrapData, score: Option<u32>) -> String {
    let mut text = String::from("Check out my Spotify Wrapped!\n\nTop Artists:\n");
    for (rank, artist) in data
        .top_artists_all_time
        .items
        .iter()
        .take(SHARE_ITEM_COUNT)
        .enumerate()
    {
        text.push_str(&format!("{}. {}\n", rank + 1, artist.name));
    }
    text.push_str("\nTop Tracks:\n");
    for (rank, track) in data
        .top_tracks_all_time
        .items
        .iter()
        .take(SHARE_ITEM_COUNT)
        .enumerate()
    {
        text.push_str(&format!(
            "{}. {} - {}\n",
            rank + 1,
            track.name,
            track.primary_artist().unwrap_or("Unknown Artist")
        ));
    }
    if let Some(score) = score {
        text.push_str(&format!(
            "\nI scored {score}/{} in the release year quiz!\n",
            crate::quiz::ROUND_COUNT
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapped_state::{Album, Artist, ArtistId, Paged, Track, TrackArtist, TrackId};

    fn data() -> WrapData {
        let artists: Vec<Artist> = ["Alpha", "Beta", "Gamma", "Delta"]
            .iter()
            .map(|name| Artist {
                id: ArtistId(name.to_string()),
                name: name.to_string(),
                genres: vec![],
                images: vec![],
            })
            .collect();
        let tracks: Vec<Track> = ["One", "Two"]
            .iter()
            .map(|name| Track {
                id: TrackId(name.to_string()),
                name: name.to_string(),
                album: Album {
                    name: String::new(),
                    release_date: String::new(),
                    images: vec![],
                },
                artists: vec![TrackArtist {
                    name: "Alpha".to_string(),
                }],
                preview_url: None,
            })
            .collect();
        WrapData {
            top_artists_all_time: Paged { items: artists },
            top_tracks_all_time: Paged { items: tracks },
            ..Default::default()
        }
    }

    #[test]
    fn test_share_text_caps_at_three_and_includes_score() {
        let text = share_text(&data(), Some(2));
        assert!(text.starts_with("Check out my Spotify Wrapped!"));
        assert!(text.contains("3. Gamma"));
        assert!(!text.contains("Delta"));
        assert!(text.contains("1. One - Alpha"));
        assert!(text.contains("I scored 2/3"));
    }

    #[test]
    fn test_share_text_without_score() {
        let text = share_text(&data(), None);
        assert!(!text.contains("scored"));
    }
}
