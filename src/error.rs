use thiserror::Error;
use treadx_shared::HttpMethod;

/// Errors surfaced by the API client and the services built on it.
///
/// HTTP failures are not classified: a 401 and a 503 both arrive as `Http`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error! status: {status} ({method} {path})")]
    Http {
        status: u16,
        method: HttpMethod,
        path: String,
    },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("network error: {0}")]
    Network(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("session storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status carried by the error, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Network(e.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Storage(e.to_string())
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
