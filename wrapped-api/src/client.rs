#[derive(Debug)]
/// An error that can occur when interacting with the client.
pub enum ClientError {
    /// An error that occurred when making a request.
    ReqwestError(reqwest::Error),
    /// An error that occurred when deserializing a response.
    DeserializationError(serde_json::Error),
    /// The backend returned a non-success status.
    ApiError {
        /// The HTTP status code.
        status: u16,
        /// The backend's error message, if it sent one.
        message: Option<String>,
    },
    /// The backend rejected a submission with field-level messages
    /// (e.g. registration validation). Messages are kept verbatim so
    /// forms can display them next to the offending field.
    ValidationError {
        /// `(field, message)` pairs, in response order.
        fields: Vec<(String, String)>,
    },
}
impl ClientError {
    /// Whether this error is the backend saying "not authenticated"
    /// (HTTP 401), as opposed to an unexpected failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::ApiError { status: 401, .. })
    }
}
impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::ReqwestError(e) => write!(f, "Request error: {e}"),
            ClientError::DeserializationError(e) => write!(f, "Deserialization error: {e}"),
            ClientError::ApiError { status, message } => {
                write!(f, "API error: {status}")?;
                if let Some(message) = message {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
            ClientError::ValidationError { fields } => {
                write!(f, "Validation failed")?;
                for (field, message) in fields {
                    write!(f, "; {field}: {message}")?;
                }
                Ok(())
            }
        }
    }
}
impl std::error::Error for ClientError {}
impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::ReqwestError(e)
    }
}
impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::DeserializationError(e)
    }
}
/// A result type for the client.
pub type ClientResult<T> = Result<T, ClientError>;

/// A client for the Spotify Wrapper backend API.
///
/// Holds a cookie store so the backend's session cookie survives across
/// calls; non-GET requests fetch a CSRF token first and send it as
/// `X-CSRFToken`.
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) client: reqwest::Client,
}
impl Client {
    /// Create a new client against the given base URL
    /// (e.g. `http://localhost:8000/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("failed to construct HTTP client"),
        }
    }
}
