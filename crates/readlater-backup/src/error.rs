//! Backup and restore outcomes.
//!
//! Each failure names the protocol stage it happened in, so callers can
//! report a precise reason.

use serde::Serialize;
use thiserror::Error;

use readlater_core::Error;

/// How far a successful backup got.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BackupStatus {
    /// Uploaded and pinned; a later restore will find it.
    Pinned { message_id: i64, file_name: String },
    /// Uploaded, but pinning failed; a later restore will not find it.
    UploadedNotPinned {
        message_id: i64,
        file_name: String,
        reason: String,
    },
}

impl BackupStatus {
    pub fn message_id(&self) -> i64 {
        match self {
            BackupStatus::Pinned { message_id, .. }
            | BackupStatus::UploadedNotPinned { message_id, .. } => *message_id,
        }
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self, BackupStatus::Pinned { .. })
    }
}

/// Backup failures. Nothing was uploaded when one of these is returned.
#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Telegram credentials are not configured")]
    MissingCredentials,

    /// Reading the namespace failed.
    #[error("Failed to read local data: {0}")]
    Storage(#[source] Error),

    #[error("Upload failed: {0}")]
    UploadFailed(#[source] Error),
}

/// Restore failures. The local namespace is unchanged unless the variant is
/// [`RestoreError::Storage`].
#[derive(Error, Debug)]
pub enum RestoreError {
    #[error("Telegram credentials are not configured")]
    MissingCredentials,

    #[error("Could not reach the channel: {0}")]
    ChannelUnreachable(#[source] Error),

    #[error("No backup found (nothing is pinned in the channel)")]
    NoBackupFound,

    #[error("Pinned message is not a backup (it has no file attached)")]
    NotABackup,

    #[error("Could not resolve the backup file: {0}")]
    ResolveFailed(String),

    #[error("Failed to download the backup file: {0}")]
    DownloadFailed(#[source] Error),

    #[error("Invalid backup content: {0}")]
    InvalidContent(String),

    /// Reading credentials or replacing the namespace failed.
    #[error("Storage error during restore: {0}")]
    Storage(#[source] Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_messages_name_the_reason() {
        assert!(RestoreError::NoBackupFound
            .to_string()
            .to_lowercase()
            .contains("no backup found"));
        assert!(RestoreError::NotABackup
            .to_string()
            .to_lowercase()
            .contains("pinned message is not a backup"));
        assert!(RestoreError::InvalidContent("not JSON".to_string())
            .to_string()
            .to_lowercase()
            .contains("invalid backup content"));
    }

    #[test]
    fn test_status_serializes_with_tag() {
        let status = BackupStatus::UploadedNotPinned {
            message_id: 5,
            file_name: "readlater_backup_2024-01-01.json".to_string(),
            reason: "not enough rights".to_string(),
        };
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["status"], "uploaded_not_pinned");
        assert_eq!(value["message_id"], 5);
        assert_eq!(status.message_id(), 5);
        assert!(!status.is_pinned());
    }
}
