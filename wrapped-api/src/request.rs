use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Client, ClientError, ClientResult};

/// Making requests to the backend API.
impl Client {
    /// Make a GET request to the given path (relative to the base URL)
    /// and deserialize the JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        Self::parse_response(status, &bytes)
    }

    /// Make a POST request carrying a JSON body and the CSRF token, and
    /// deserialize the JSON response.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let token = self.csrf_token().await?;
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("X-CSRFToken", token)
            .body(serde_json::to_vec(body)?)
            .send()
            .await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        Self::parse_response(status, &bytes)
    }

    /// Make a DELETE request carrying the CSRF token. The backend
    /// responds 204 with no body on success.
    pub(crate) async fn delete(&self, path: &str) -> ClientResult<()> {
        let token = self.csrf_token().await?;
        let response = self
            .client
            .delete(format!("{}{path}", self.base_url))
            .header("Accept", "application/json")
            .header("X-CSRFToken", token)
            .send()
            .await?;
        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            return Ok(());
        }
        let bytes = response.bytes().await?;
        Err(Self::parse_error(status, &bytes))
    }

    /// Fetch a CSRF token for a mutating request.
    async fn csrf_token(&self) -> ClientResult<String> {
        let token: CsrfToken = self.get_json("/auth/csrf/").await?;
        Ok(token.csrf_token)
    }

    pub(crate) fn parse_response<T: DeserializeOwned>(
        status: u16,
        bytes: &[u8],
    ) -> ClientResult<T> {
        if !(200..300).contains(&status) {
            return Err(Self::parse_error(status, bytes));
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Interpret a non-success body: `{"error": "..."}` becomes an API
    /// error, a Django field→messages map becomes a validation error,
    /// anything else is reported by status alone.
    pub(crate) fn parse_error(status: u16, bytes: &[u8]) -> ClientError {
        if let Ok(body) = serde_json::from_slice::<ErrorBody>(bytes)
            && let Some(message) = body.error.or(body.detail)
        {
            return ClientError::ApiError {
                status,
                message: Some(message),
            };
        }

        if let Ok(map) = serde_json::from_slice::<std::collections::BTreeMap<String, Vec<String>>>(
            bytes,
        ) {
            let fields = map
                .into_iter()
                .flat_map(|(field, messages)| {
                    messages.into_iter().map(move |m| (field.clone(), m))
                })
                .collect::<Vec<_>>();
            if !fields.is_empty() {
                return ClientError::ValidationError { fields };
            }
        }

        ClientError::ApiError {
            status,
            message: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsrfToken {
    csrf_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapped_state::User;

    #[test]
    fn test_parse_success_body() {
        let user: User =
            Client::parse_response(200, br#"{"id": 1, "username": "a", "email": null}"#).unwrap();
        assert_eq!(user.username, "a");
    }

    #[test]
    fn test_parse_error_body_message() {
        let err = Client::parse_response::<User>(500, br#"{"error": "Token Error: boom"}"#)
            .unwrap_err();
        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message.as_deref(), Some("Token Error: boom"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_401_is_unauthorized() {
        let err = Client::parse_response::<User>(
            401,
            br#"{"error": "Not authenticated with Spotify"}"#,
        )
        .unwrap_err();
        assert!(err.is_unauthorized());

        let err = Client::parse_response::<User>(500, br#"{"error": "boom"}"#).unwrap_err();
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_parse_field_validation_map() {
        let err = Client::parse_response::<User>(
            400,
            br#"{"username": ["A user with that username already exists."]}"#,
        )
        .unwrap_err();
        match err {
            ClientError::ValidationError { fields } => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].0, "username");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparseable_error_body_falls_back_to_status() {
        let err = Client::parse_response::<User>(502, b"<html>bad gateway</html>").unwrap_err();
        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 502);
                assert!(message.is_none());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
