use serde::Serialize;

use wrapped_state::User;

use crate::{Client, ClientResult};

/// Credentials for [`Client::login`].
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// The username.
    pub username: String,
    /// The password, sent as-is over the wire.
    pub password: String,
}

/// Payload for [`Client::register`].
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    /// The desired username.
    pub username: String,
    /// The email address.
    pub email: String,
    /// The password.
    pub password: String,
}

/// Auth endpoints.
impl Client {
    /// Log in with the given credentials. On success the backend sets a
    /// session cookie and returns the user record.
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<User> {
        self.post_json("/auth/login/", credentials).await
    }

    /// Register a new account. On success the backend signs the user in
    /// and returns the user record.
    pub async fn register(&self, registration: &Registration) -> ClientResult<User> {
        self.post_json("/auth/register/", registration).await
    }

    /// Log out, invalidating the backend session.
    pub async fn logout(&self) -> ClientResult<()> {
        let _: serde_json::Value = self.post_json("/auth/logout/", &serde_json::json!({})).await?;
        Ok(())
    }

    /// Check who is currently signed in. Fails with a 401
    /// ([`crate::ClientError::is_unauthorized`]) when nobody is.
    pub async fn check_auth(&self) -> ClientResult<User> {
        self.get_json("/auth/user/").await
    }

    /// Delete the signed-in user's account.
    pub async fn delete_account(&self) -> ClientResult<()> {
        let _: serde_json::Value = self
            .post_json("/auth/delete_account/", &serde_json::json!({}))
            .await?;
        Ok(())
    }
}
