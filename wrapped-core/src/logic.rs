use std::{
    path::PathBuf,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::Utc;

use crate::{
    AppState, AuthStatus, FormError,
    history::{HISTORY_FILENAME, WrapHistory},
    tokio_thread::TokioThread,
    wa,
};
use wrapped_state::{TimeRange, WrapId};

#[cfg(feature = "audio")]
use crate::preview_thread::{PreviewMessage, PreviewThread};

/// Construction arguments for [`Logic`].
pub struct LogicArgs {
    /// Base URL of the backend API, e.g. `http://localhost:8000/api`.
    pub base_url: String,
    /// Where the local wrap history lives. Defaults to
    /// [`HISTORY_FILENAME`] in the working directory.
    pub history_path: Option<PathBuf>,
}

/// The application logic, detached from any particular frontend.
///
/// All network work runs on a dedicated tokio thread; results land in
/// shared state that frontends poll each frame.
pub struct Logic {
    tokio_thread: TokioThread,
    state: Arc<RwLock<AppState>>,
    client: Arc<wa::Client>,
    history_path: PathBuf,
    #[cfg(feature = "audio")]
    preview_thread: PreviewThread,
}

impl Logic {
    pub fn new(args: LogicArgs) -> Self {
        let history_path = args
            .history_path
            .unwrap_or_else(|| PathBuf::from(HISTORY_FILENAME));

        let state = Arc::new(RwLock::new(AppState {
            local_history: WrapHistory::load(&history_path),
            ..Default::default()
        }));
        let client = Arc::new(wa::Client::new(&args.base_url));

        let logic = Logic {
            tokio_thread: TokioThread::new(),
            #[cfg(feature = "audio")]
            preview_thread: PreviewThread::new(state.clone()),
            state,
            client,
            history_path,
        };
        logic.check_auth();
        logic
    }

    /// Ask the backend who is signed in, settling the initial
    /// [`AuthStatus::Checking`] state.
    pub fn check_auth(&self) {
        let client = self.client.clone();
        let state = self.state.clone();
        self.spawn(async move {
            let status = match client.check_auth().await {
                Ok(user) => AuthStatus::SignedIn(user),
                Err(e) => {
                    if !e.is_unauthorized() {
                        tracing::warn!("auth check failed: {e}");
                    }
                    AuthStatus::SignedOut
                }
            };
            state.write().unwrap().session.status = status;
        });
    }

    pub fn login(&self, username: String, password: String) {
        let client = self.client.clone();
        let state = self.state.clone();
        {
            let mut state = state.write().unwrap();
            if state.session.pending {
                return;
            }
            state.session.pending = true;
            state.session.form_error = None;
        }
        self.spawn(async move {
            let result = client
                .login(&wa::Credentials { username, password })
                .await;
            let mut state = state.write().unwrap();
            state.session.pending = false;
            match result {
                Ok(user) => {
                    state.session.status = AuthStatus::SignedIn(user);
                    state.session.form_error = None;
                }
                Err(e) => {
                    state.session.form_error = Some(FormError::from_client(e, "Login failed"));
                }
            }
        });
    }

    pub fn register(&self, username: String, email: String, password: String) {
        let client = self.client.clone();
        let state = self.state.clone();
        {
            let mut state = state.write().unwrap();
            if state.session.pending {
                return;
            }
            state.session.pending = true;
            state.session.form_error = None;
        }
        self.spawn(async move {
            let result = client
                .register(&wa::Registration {
                    username,
                    email,
                    password,
                })
                .await;
            let mut state = state.write().unwrap();
            state.session.pending = false;
            match result {
                Ok(user) => {
                    state.session.status = AuthStatus::SignedIn(user);
                    state.session.form_error = None;
                }
                Err(e) => {
                    state.session.form_error =
                        Some(FormError::from_client(e, "Registration failed"));
                }
            }
        });
    }

    /// Log out. Local state is cleared regardless of whether the backend
    /// call succeeds; a dead session shouldn't trap the user.
    pub fn logout(&self) {
        #[cfg(feature = "audio")]
        self.stop_preview();

        let client = self.client.clone();
        let state = self.state.clone();
        let history_path = self.history_path.clone();
        self.spawn(async move {
            if let Err(e) = client.logout().await {
                tracing::warn!("logout failed: {e}");
            }
            Self::clear_session(&mut state.write().unwrap(), &history_path);
        });
    }

    /// Delete the account, then clear local state as for logout.
    pub fn delete_account(&self) {
        #[cfg(feature = "audio")]
        self.stop_preview();

        let client = self.client.clone();
        let state = self.state.clone();
        let history_path = self.history_path.clone();
        self.spawn(async move {
            if let Err(e) = client.delete_account().await {
                tracing::warn!("account deletion failed: {e}");
            }
            Self::clear_session(&mut state.write().unwrap(), &history_path);
        });
    }

    /// Reset everything, including the local wrap history file, so the
    /// next sign-in starts clean.
    fn clear_session(state: &mut AppState, history_path: &std::path::Path) {
        *state = AppState::default();
        state.session.status = AuthStatus::SignedOut;
        if history_path.exists()
            && let Err(e) = std::fs::remove_file(history_path)
        {
            tracing::warn!("failed to remove local wrap history: {e}");
        }
    }

    /// Fetch the Spotify authorization URL for the user to open in a
    /// browser.
    pub fn request_spotify_auth_url(&self) {
        let client = self.client.clone();
        let state = self.state.clone();
        self.spawn(async move {
            match client.spotify_auth_url().await {
                Ok(response) => {
                    let mut state = state.write().unwrap();
                    state.spotify_auth_url = Some(response.auth_url);
                    state.link_error = None;
                }
                Err(e) => {
                    state.write().unwrap().link_error = Some(e.to_string());
                }
            }
        });
    }

    /// Exchange the code Spotify redirected back with, completing the
    /// account link.
    pub fn complete_spotify_link(&self, code: String) {
        let client = self.client.clone();
        let state = self.state.clone();
        {
            let mut state = state.write().unwrap();
            if state.linking {
                return;
            }
            state.linking = true;
            state.link_error = None;
        }
        self.spawn(async move {
            let result = client.spotify_callback(&code).await;
            let mut state = state.write().unwrap();
            state.linking = false;
            match result {
                Ok(()) => {
                    state.session.spotify_linked = true;
                    state.spotify_auth_url = None;
                }
                Err(e) => {
                    state.link_error = Some(e.to_string());
                }
            }
        });
    }

    pub fn fetch_playlists(&self) {
        let client = self.client.clone();
        let state = self.state.clone();
        {
            let mut state = state.write().unwrap();
            if state.playlists.loading {
                return;
            }
            state.playlists.loading = true;
            state.playlists.error = None;
        }
        self.spawn(async move {
            let result = client.playlists().await;
            let mut state = state.write().unwrap();
            state.playlists.loading = false;
            match result {
                Ok(items) => {
                    state.playlists.items = items;
                    state.playlists.loaded = true;
                    state.session.spotify_linked = true;
                }
                Err(e) => {
                    if e.is_unauthorized() {
                        state.session.spotify_linked = false;
                    }
                    tracing::warn!("playlist fetch failed: {e}");
                    state.playlists.error = Some("Failed to load playlists".to_string());
                }
            }
        });
    }

    /// Fetch the Wrapped dataset for `range` and persist a snapshot of
    /// it, concurrently. A newer call supersedes any in-flight one; the
    /// stale completion is discarded.
    pub fn fetch_wrap_data(&self, range: TimeRange) {
        let client = self.client.clone();
        let state = self.state.clone();
        let history_path = self.history_path.clone();
        let generation = state.write().unwrap().wrap.begin_fetch(range);
        self.spawn(async move {
            let result =
                futures::future::try_join(client.wrapped_data(), client.create_wrapped(range))
                    .await;
            match result {
                Ok((data, created)) => {
                    let mut state = state.write().unwrap();
                    if !state.wrap.finish_fetch(generation, Ok(data)) {
                        return;
                    }
                    state.session.spotify_linked = true;
                    state.local_history.record(created, Utc::now());
                    if let Err(e) = state.local_history.save(&history_path) {
                        tracing::warn!("failed to save local wrap history: {e}");
                    }
                }
                Err(e) => {
                    let mut state = state.write().unwrap();
                    if e.is_unauthorized() {
                        state.session.spotify_linked = false;
                    }
                    tracing::warn!("wrap fetch failed: {e}");
                    state
                        .wrap
                        .finish_fetch(generation, Err("Failed to load your Wrapped".to_string()));
                }
            }
        });
    }

    pub fn fetch_wrap_history(&self) {
        let client = self.client.clone();
        let state = self.state.clone();
        {
            let mut state = state.write().unwrap();
            if state.history.loading {
                return;
            }
            state.history.loading = true;
            state.history.error = None;
        }
        self.spawn(async move {
            let result = client.wrap_history().await;
            let mut state = state.write().unwrap();
            state.history.loading = false;
            match result {
                Ok(list) => state.history.wraps = list.wraps,
                Err(e) => {
                    tracing::warn!("wrap history fetch failed: {e}");
                    state.history.error = Some("Failed to load wrap history".to_string());
                }
            }
        });
    }

    pub fn load_wrap_detail(&self, id: WrapId) {
        let client = self.client.clone();
        let state = self.state.clone();
        {
            let mut state = state.write().unwrap();
            if state.history.detail_loading {
                return;
            }
            if let Some((loaded_id, _)) = &state.history.detail
                && *loaded_id == id
            {
                return;
            }
            state.history.detail_loading = true;
        }
        self.spawn(async move {
            let result = client.wrap_detail(id).await;
            let mut state = state.write().unwrap();
            state.history.detail_loading = false;
            match result {
                Ok(wrap) => state.history.detail = Some((id, wrap)),
                Err(e) => {
                    tracing::warn!("wrap detail fetch failed: {e}");
                    state.history.error = Some("Failed to load wrap".to_string());
                }
            }
        });
    }

    /// Delete a persisted wrap. The row is only removed from the listing
    /// once the backend confirms.
    pub fn delete_wrap(&self, id: WrapId) {
        let client = self.client.clone();
        let state = self.state.clone();
        self.spawn(async move {
            match client.delete_wrap(id).await {
                Ok(()) => {
                    let mut state = state.write().unwrap();
                    state.history.wraps.retain(|wrap| wrap.id != id);
                    if let Some((detail_id, _)) = &state.history.detail
                        && *detail_id == id
                    {
                        state.history.detail = None;
                    }
                }
                Err(e) => {
                    tracing::warn!("wrap deletion failed: {e}");
                    state.write().unwrap().history.error =
                        Some("Failed to delete wrap".to_string());
                }
            }
        });
    }

    /// Record the quiz score. First write wins; replaying the game for a
    /// wrap view doesn't change the reported score.
    pub fn set_game_score(&self, score: u32) {
        let mut state = self.write_state();
        if state.game_score.is_none() {
            state.game_score = Some(score);
        }
    }

    pub fn clear_game_score(&self) {
        self.write_state().game_score = None;
    }

    pub fn get_state(&self) -> Arc<RwLock<AppState>> {
        self.state.clone()
    }

    pub fn auth_status(&self) -> AuthStatus {
        self.read_state().session.status.clone()
    }

    pub fn is_spotify_linked(&self) -> bool {
        self.read_state().session.spotify_linked
    }
}

#[cfg(feature = "audio")]
impl Logic {
    /// Download and play a track's 30-second preview.
    pub fn play_preview(&self, url: String, track_name: String) {
        let client = self.client.clone();
        let state = self.state.clone();
        let preview_tx = self.preview_thread.sender();
        {
            let mut state = state.write().unwrap();
            if state.preview.loading {
                return;
            }
            state.preview.loading = true;
            state.preview.error = None;
        }
        self.spawn(async move {
            let result = client.download(&url).await;
            let mut state = state.write().unwrap();
            state.preview.loading = false;
            match result {
                Ok(data) => preview_tx.send(PreviewMessage::Play { data, track_name }),
                Err(e) => {
                    tracing::warn!("preview download failed: {e}");
                    state.preview.error = Some("Preview unavailable".to_string());
                }
            }
        });
    }

    pub fn toggle_preview(&self) {
        self.preview_thread.send(PreviewMessage::Toggle);
    }

    pub fn stop_preview(&self) {
        self.preview_thread.send(PreviewMessage::Stop);
    }
}

impl Logic {
    fn spawn(&self, task: impl Future<Output = ()> + Send + Sync + 'static) {
        self.tokio_thread.spawn(task);
    }

    fn read_state(&self) -> RwLockReadGuard<'_, AppState> {
        self.state.read().unwrap()
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, AppState> {
        self.state.write().unwrap()
    }
}
