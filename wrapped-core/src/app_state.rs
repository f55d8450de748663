use std::time::Duration;

use wrapped_state::{CreatedWrap, Playlist, TimeRange, User, WrapData, WrapId, WrapSummary};

use crate::history::WrapHistory;

/// All shared client state, behind `Arc<RwLock<_>>` in [`crate::Logic`].
///
/// Each area carries its own inline error string; failures in one area
/// never take down another.
#[derive(Default)]
pub struct AppState {
    pub session: SessionState,
    pub wrap: WrapState,
    pub playlists: PlaylistState,
    pub history: HistoryState,
    pub local_history: WrapHistory,
    pub preview: PreviewState,

    /// Spotify OAuth URL waiting for the user to visit it.
    pub spotify_auth_url: Option<String>,
    /// Whether an OAuth callback exchange is in flight.
    pub linking: bool,
    pub link_error: Option<String>,

    /// Final quiz score, set exactly once per wrap view.
    pub game_score: Option<u32>,
}

/// Who is signed in, as far as the client knows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStatus {
    /// The check-on-startup auth call hasn't resolved yet. Dependent
    /// screens show a loading state rather than redirecting.
    #[default]
    Checking,
    SignedOut,
    SignedIn(User),
}

#[derive(Default)]
pub struct SessionState {
    pub status: AuthStatus,
    /// Whether a Spotify account is linked. Established by a successful
    /// OAuth callback or a successful spotify-backed fetch; dropped when
    /// one of those endpoints returns 401.
    pub spotify_linked: bool,
    /// A login/register call is in flight.
    pub pending: bool,
    /// The last login/register failure, verbatim for the form to render.
    pub form_error: Option<FormError>,
}
impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match &self.status {
            AuthStatus::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}

/// A form-level failure: either a single message or per-field messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    Message(String),
    Fields(Vec<(String, String)>),
}
impl FormError {
    /// Map a client error to something a form can display, preserving
    /// backend messages and falling back to `fallback` for anything
    /// without one (network failures, opaque statuses).
    pub fn from_client(error: wrapped_api::ClientError, fallback: &str) -> Self {
        use wrapped_api::ClientError;
        match error {
            ClientError::ValidationError { fields } => FormError::Fields(fields),
            ClientError::ApiError {
                message: Some(message),
                ..
            } => FormError::Message(message),
            _ => FormError::Message(fallback.to_string()),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            FormError::Message(message) => vec![message.clone()],
            FormError::Fields(fields) => fields
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect(),
        }
    }
}

/// Wrapped data for the slideshow, with a request-generation counter so
/// a stale response can never overwrite a newer selection.
#[derive(Default)]
pub struct WrapState {
    pub data: Option<WrapData>,
    pub selected_range: TimeRange,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}
impl WrapState {
    /// Start a fetch for `range`, invalidating any in-flight request.
    /// Returns the generation token the eventual completion must present.
    pub fn begin_fetch(&mut self, range: TimeRange) -> u64 {
        self.generation += 1;
        self.selected_range = range;
        self.loading = true;
        self.error = None;
        self.generation
    }

    /// Apply a fetch completion. Returns false (and changes nothing) if
    /// a newer fetch has been started since `generation` was issued.
    pub fn finish_fetch(&mut self, generation: u64, result: Result<WrapData, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => self.data = Some(data),
            Err(error) => self.error = Some(error),
        }
        true
    }
}

#[derive(Default)]
pub struct PlaylistState {
    pub items: Vec<Playlist>,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
}

#[derive(Default)]
pub struct HistoryState {
    pub wraps: Vec<WrapSummary>,
    pub loading: bool,
    pub error: Option<String>,
    /// A fetched wrap detail, keyed by the wrap it belongs to.
    pub detail: Option<(WrapId, CreatedWrap)>,
    pub detail_loading: bool,
}

/// Audio preview playback state, written by the preview thread.
#[derive(Default)]
pub struct PreviewState {
    pub track_name: Option<String>,
    pub playing: bool,
    pub loading: bool,
    pub position: Duration,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapped_state::TimeRange;

    #[test]
    fn test_stale_fetch_completion_is_discarded() {
        let mut wrap = WrapState::default();
        let first = wrap.begin_fetch(TimeRange::ShortTerm);
        let second = wrap.begin_fetch(TimeRange::LongTerm);

        // The second (newer) request resolves first.
        assert!(wrap.finish_fetch(second, Ok(WrapData::default())));
        assert!(!wrap.loading);
        assert!(wrap.data.is_some());
        assert_eq!(wrap.selected_range, TimeRange::LongTerm);

        // The first request resolving late must not disturb anything.
        assert!(!wrap.finish_fetch(first, Err("late failure".to_string())));
        assert!(wrap.error.is_none());
        assert!(wrap.data.is_some());
        assert_eq!(wrap.selected_range, TimeRange::LongTerm);
    }

    #[test]
    fn test_fetch_failure_surfaces_inline_error() {
        let mut wrap = WrapState::default();
        let generation = wrap.begin_fetch(TimeRange::MediumTerm);
        assert!(wrap.loading);
        assert!(wrap.finish_fetch(generation, Err("Failed to load".to_string())));
        assert!(!wrap.loading);
        assert_eq!(wrap.error.as_deref(), Some("Failed to load"));
        assert!(wrap.data.is_none());
    }

    #[test]
    fn test_retry_clears_previous_error() {
        let mut wrap = WrapState::default();
        let generation = wrap.begin_fetch(TimeRange::MediumTerm);
        wrap.finish_fetch(generation, Err("boom".to_string()));
        wrap.begin_fetch(TimeRange::MediumTerm);
        assert!(wrap.error.is_none());
        assert!(wrap.loading);
    }
}
