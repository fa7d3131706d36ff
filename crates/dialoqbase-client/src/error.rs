//! Client error types.

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed before a status was obtained.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body, or the status phrase.
        message: String,
    },

    /// Streaming was requested but the response carried no body to read.
    #[error("Streaming response has no body")]
    MissingStreamBody,

    /// A `data:` line in the stream did not contain valid JSON.
    #[error("Malformed frame payload: {0}")]
    MalformedFrame(#[source] serde_json::Error),

    /// The connection failed while the stream was being consumed.
    #[error("Stream error: {0}")]
    Stream(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The HTTP status code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Api { status: 401, .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error body shape used by the server.
///
/// Responses carry either a `message` or an `error` field; some carry
/// neither, in which case the status phrase is used instead.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best human-readable message, falling back to the given status phrase.
    pub(crate) fn into_message(self, fallback: &str) -> String {
        self.message
            .or(self.error)
            .unwrap_or_else(|| fallback.to_string())
    }
}
