//! ANS Client Error Types
//!
//! Error types for gateway operations.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use thiserror::Error;

// =============================================================================
// Client Error
// =============================================================================

/// Errors that can occur while talking to the expense API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The request exceeded the transport timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-success status.
    #[error("server returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The resource does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The base URL or a derived URL is malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The backend is unreachable or refused the call.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Local IO failure (fixture files).
    #[error("io error: {0}")]
    Io(String),
}

impl ClientError {
    /// Check if the error is a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if a later attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(_) | Self::Timeout(_) | Self::Unavailable(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, ClientError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Status {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "server returned status 500: Internal Server Error"
        );

        let err = ClientError::NotFound("/operadoras/1".to_string());
        assert_eq!(err.to_string(), "not found: /operadoras/1");
    }

    #[test]
    fn test_is_retryable() {
        assert!(ClientError::Timeout("slow".to_string()).is_retryable());
        assert!(ClientError::Status {
            status: 503,
            message: String::new()
        }
        .is_retryable());
        assert!(!ClientError::Status {
            status: 400,
            message: String::new()
        }
        .is_retryable());
        assert!(!ClientError::NotFound("x".to_string()).is_retryable());
    }

    #[test]
    fn test_status_code() {
        assert_eq!(ClientError::NotFound("x".to_string()).status_code(), Some(404));
        assert_eq!(ClientError::Decode("x".to_string()).status_code(), None);
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(ClientError::from(err), ClientError::Decode(_)));
    }
}
