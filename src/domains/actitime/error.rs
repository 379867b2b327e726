//! actiTIME client error types.

use thiserror::Error;

/// Result type for actiTIME API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by the actiTIME API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with an error status and an error payload.
    ///
    /// The message is the payload itself so callers see the text authored
    /// by the server.
    #[error("{body}")]
    Remote { status: u16, body: String },

    /// The server answered with an error status and an empty body.
    #[error("HTTP {status} returned by {url}")]
    Status { status: u16, url: String },

    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Query parameters could not be encoded.
    #[error("Failed to encode query parameters: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// A request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Body(#[from] serde_json::Error),

    /// The client could not be built from the given configuration.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_message_is_body() {
        let err = ApiError::Remote {
            status: 400,
            body: r#"{"key":"api.error.bad_request","message":"Bad date"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"{"key":"api.error.bad_request","message":"Bad date"}"#
        );
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_status_error_without_body() {
        let err = ApiError::Status {
            status: 503,
            url: "https://example.test/api/v1/tasks".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("/tasks"));
    }
}
