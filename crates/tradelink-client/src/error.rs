//! # Client Error Types
//!
//! Local failures raised inside the client. None of these reach endpoint
//! callers as errors: the dispatcher folds every transport variant into a
//! failure envelope carrying [`ClientError::result_code`]. Configuration
//! variants are returned from config loading as ordinary `Result`s.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌───────────────────────────────┐  ┌───────────────────────────────┐  │
//! │  │  Transport (→ envelope)       │  │  Configuration (→ Result)     │  │
//! │  │                               │  │                               │  │
//! │  │  MalformedUrl                 │  │  InvalidConfig                │  │
//! │  │  Protocol                     │  │  ConfigLoadFailed             │  │
//! │  │  Connection                   │  │  ConfigSaveFailed             │  │
//! │  │  Io                           │  │                               │  │
//! │  │  Unknown                      │  │                               │  │
//! │  └───────────────────────────────┘  └───────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use tradelink_core::codes;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The endpoint URL could not be built.
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    /// The request could not be formed for the HTTP protocol.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The platform could not be reached.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Reading or writing a body failed. Includes timeouts, decompression
    /// and JSON decoding.
    #[error("IO error: {0}")]
    Io(String),

    #[error("Unknown error: {0}")]
    Unknown(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Io(err.to_string())
        } else if err.is_builder() {
            ClientError::Protocol(err.to_string())
        } else if err.is_connect() {
            ClientError::Connection(err.to_string())
        } else if err.is_request() || err.is_body() || err.is_decode() {
            ClientError::Io(err.to_string())
        } else {
            ClientError::Unknown(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::MalformedUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// The result code an envelope carries for this failure.
    pub fn result_code(&self) -> &'static str {
        match self {
            ClientError::MalformedUrl(_) => codes::ERROR_MALFORMED_URL,
            ClientError::Protocol(_) => codes::ERROR_REQUEST_PROTOCOL,
            ClientError::Connection(_) => codes::ERROR_CONNECTION,
            ClientError::Io(_) => codes::ERROR_IO,
            _ => codes::ERROR_UNKNOWN,
        }
    }

    /// Free-form detail appended to the catalog message.
    pub fn detail(&self) -> &str {
        match self {
            ClientError::MalformedUrl(d)
            | ClientError::Protocol(d)
            | ClientError::Connection(d)
            | ClientError::Io(d)
            | ClientError::Unknown(d)
            | ClientError::InvalidConfig(d)
            | ClientError::ConfigLoadFailed(d)
            | ClientError::ConfigSaveFailed(d) => d,
        }
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            ClientError::MalformedUrl(_)
                | ClientError::Protocol(_)
                | ClientError::Connection(_)
                | ClientError::Io(_)
                | ClientError::Unknown(_)
        )
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_codes() {
        assert_eq!(
            ClientError::MalformedUrl("x".into()).result_code(),
            "SERVER_ERROR_MALFORMED_URL"
        );
        assert_eq!(
            ClientError::Protocol("x".into()).result_code(),
            "SERVER_ERROR_REQUEST_PROTOCOL"
        );
        assert_eq!(
            ClientError::Connection("x".into()).result_code(),
            "SERVER_ERROR_CONNECTION"
        );
        assert_eq!(ClientError::Io("x".into()).result_code(), "SERVER_ERROR_IO");
        assert_eq!(ClientError::Unknown("x".into()).result_code(), "SERVER_ERROR_UNKOWN");
    }

    #[test]
    fn test_categories() {
        assert!(ClientError::Connection("refused".into()).is_transport_error());
        assert!(!ClientError::Connection("refused".into()).is_config_error());
        assert!(ClientError::InvalidConfig("bad".into()).is_config_error());
        assert!(!ClientError::ConfigLoadFailed("bad".into()).is_transport_error());
    }

    #[test]
    fn test_conversions() {
        let err: ClientError = url::Url::parse("not a url").unwrap_err().into();
        assert_eq!(err.result_code(), codes::ERROR_MALFORMED_URL);

        let err: ClientError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.result_code(), codes::ERROR_IO);

        let err: ClientError =
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read").into();
        assert_eq!(err.detail(), "short read");
    }
}
