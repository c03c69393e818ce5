//! Error types for ReadLater.

use thiserror::Error;

/// Result type alias using ReadLater's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ReadLater operations.
///
/// Missing ids are never reported through this type: update, delete, link
/// and unlink treat an absent target as a no-op.
#[derive(Error, Debug)]
pub enum Error {
    /// Key-value store operation failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Snapshot content rejected before any write
    #[error("Invalid backup content: {0}")]
    InvalidBackup(String),

    /// HTTP/network request failed before an API response was received
    #[error("Request error: {0}")]
    Request(String),

    /// Remote API answered with a failure
    #[error("Remote API error in {method} (status {status}): {description}")]
    RemoteApi {
        method: String,
        status: u16,
        description: String,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a remote API error for the given Bot API method.
    pub fn remote_api(method: &str, status: u16, description: impl Into<String>) -> Self {
        Error::RemoteApi {
            method: method.to_string(),
            status,
            description: description.into(),
        }
    }

    /// Whether this error came from the remote channel rather than local storage.
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Request(_) | Error::RemoteApi { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_storage() {
        let err = Error::Storage("slot unavailable".to_string());
        assert_eq!(err.to_string(), "Storage error: slot unavailable");
    }

    #[test]
    fn test_error_display_invalid_backup() {
        let err = Error::InvalidBackup("no recognized data found".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid backup content: no recognized data found"
        );
    }

    #[test]
    fn test_error_display_remote_api() {
        let err = Error::remote_api("pinChatMessage", 400, "not enough rights");
        assert_eq!(
            err.to_string(),
            "Remote API error in pinChatMessage (status 400): not enough rights"
        );
    }

    #[test]
    fn test_is_remote() {
        assert!(Error::Request("timeout".to_string()).is_remote());
        assert!(Error::remote_api("getChat", 401, "Unauthorized").is_remote());
        assert!(!Error::Storage("disk full".to_string()).is_remote());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
