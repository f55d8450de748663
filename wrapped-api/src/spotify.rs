use serde::{Deserialize, Serialize};

use wrapped_state::{CreatedWrap, Playlist, TimeRange, WrapData, WrapId, WrapList};

use crate::{Client, ClientResult};

/// The response to [`Client::spotify_auth_url`].
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUrl {
    /// The Spotify authorization URL to open in a browser.
    pub auth_url: String,
}

#[derive(Debug, Clone, Serialize)]
struct CallbackRequest<'a> {
    code: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct CreateWrappedRequest {
    time_range: TimeRange,
}

/// Spotify endpoints, proxied through the backend.
impl Client {
    /// Fetch the Spotify authorization URL to begin the OAuth flow.
    pub async fn spotify_auth_url(&self) -> ClientResult<AuthUrl> {
        self.get_json("/spotify/auth/").await
    }

    /// Complete the OAuth flow with the code Spotify redirected back with.
    pub async fn spotify_callback(&self, code: &str) -> ClientResult<()> {
        let _: serde_json::Value = self
            .post_json("/spotify/callback/", &CallbackRequest { code })
            .await?;
        Ok(())
    }

    /// Fetch the user's playlists.
    pub async fn playlists(&self) -> ClientResult<Vec<Playlist>> {
        self.get_json("/spotify/playlists/").await
    }

    /// Fetch the full four-list Wrapped dataset.
    pub async fn wrapped_data(&self) -> ClientResult<WrapData> {
        self.get_json("/spotify/wrapped/").await
    }

    /// Generate and persist a wrap snapshot for the given time range.
    pub async fn create_wrapped(&self, time_range: TimeRange) -> ClientResult<CreatedWrap> {
        self.post_json("/spotify/wrapped/create/", &CreateWrappedRequest { time_range })
            .await
    }

    /// Fetch the user's persisted wrap history.
    pub async fn wrap_history(&self) -> ClientResult<WrapList> {
        self.get_json("/spotify/wraps/").await
    }

    /// Fetch a single persisted wrap by ID.
    pub async fn wrap_detail(&self, id: WrapId) -> ClientResult<CreatedWrap> {
        self.get_json(&format!("/spotify/wraps/{id}/")).await
    }

    /// Fetch the most recently generated wrap.
    pub async fn latest_wrap(&self) -> ClientResult<CreatedWrap> {
        self.get_json("/spotify/wraps/latest/").await
    }

    /// Delete a persisted wrap by ID.
    pub async fn delete_wrap(&self, id: WrapId) -> ClientResult<()> {
        self.delete(&format!("/spotify/wraps/{id}/")).await
    }

    /// Download raw bytes from an absolute URL (audio previews live on
    /// Spotify's CDN, not behind the backend).
    pub async fn download(&self, url: &str) -> ClientResult<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        if !(200..300).contains(&status) {
            return Err(crate::ClientError::ApiError {
                status,
                message: None,
            });
        }
        Ok(bytes.into())
    }
}
