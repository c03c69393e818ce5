//! Backup, restore, and share notifications over a remote channel.
//!
//! A backup is the whole-namespace snapshot uploaded as a JSON document and
//! pinned in the channel. Restore follows the pin back to the document. Only
//! the pinned message is ever considered; older uploads are ignored.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::{field, info, instrument, warn, Span};

use readlater_core::defaults::{
    BACKUP_CAPTION, BACKUP_FILENAME_PREFIX, CONNECTION_TEST_MESSAGE, SHARE_TAGS, VIDEO_TAG,
};
use readlater_core::{logging, Credentials, Error, RemoteChannel, Result, SettingsRepository};
use readlater_db::{Database, ImportSummary, TagRepository};
use readlater_telegram::escape_markdown;

use crate::error::{BackupError, BackupStatus, RestoreError};

/// File name for a backup taken on `date`.
pub fn backup_filename(date: NaiveDate) -> String {
    format!("{}{}.json", BACKUP_FILENAME_PREFIX, date.format("%Y-%m-%d"))
}

/// Markdown notification for an item that received a share tag.
pub fn share_message(title: &str, url: &str, tag: &str) -> String {
    let emoji = if tag == VIDEO_TAG { "🎬" } else { "📚" };
    format!(
        "{} *{}*\n\n{}\n{}",
        emoji,
        escape_markdown(tag),
        escape_markdown(title),
        url
    )
}

/// What a restore put in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreOutcome {
    /// Pinned message the backup came from.
    pub message_id: i64,
    pub file_name: Option<String>,
    pub summary: ImportSummary,
}

/// Backup/restore protocol over a [`RemoteChannel`].
pub struct BackupService<C> {
    db: Database,
    channel: C,
}

impl<C: RemoteChannel> BackupService<C> {
    pub fn new(db: Database, channel: C) -> Self {
        Self { db, channel }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Upload a snapshot of the namespace and pin it.
    ///
    /// A failed pin is not an error: the upload stands and the status says
    /// it will not be found by restore.
    #[instrument(
        skip(self),
        fields(subsystem = "backup", op = "backup", byte_len = field::Empty, message_id = field::Empty, duration_ms = field::Empty)
    )]
    pub async fn backup(&self) -> std::result::Result<BackupStatus, BackupError> {
        let start = Instant::now();
        let credentials = self
            .db
            .settings
            .load_credentials()
            .await
            .map_err(BackupError::Storage)?
            .ok_or(BackupError::MissingCredentials)?;

        let content = self
            .db
            .snapshots
            .export_snapshot()
            .await
            .map_err(BackupError::Storage)?;
        let file_name = backup_filename(Utc::now().date_naive());
        Span::current().record(logging::BYTE_LEN, content.len() as u64);

        let sent = self
            .channel
            .send_document(&credentials, content.into_bytes(), &file_name, BACKUP_CAPTION)
            .await
            .map_err(|e| {
                warn!(error = %e, file_name = %file_name, "Backup upload failed");
                BackupError::UploadFailed(e)
            })?;
        Span::current().record(logging::MESSAGE_ID, sent.message_id);

        let status = match self.channel.pin_message(&credentials, sent.message_id).await {
            Ok(()) => BackupStatus::Pinned {
                message_id: sent.message_id,
                file_name,
            },
            Err(e) => {
                warn!(error = %e, "Backup uploaded but pinning failed");
                BackupStatus::UploadedNotPinned {
                    message_id: sent.message_id,
                    file_name,
                    reason: e.to_string(),
                }
            }
        };

        Span::current().record(logging::DURATION_MS, start.elapsed().as_millis() as u64);
        info!(pinned = status.is_pinned(), "Backup complete");
        Ok(status)
    }

    /// Replace the namespace with the backup pinned in the channel.
    ///
    /// Every stage before the final replace is read-only; any failure there
    /// leaves local data untouched.
    #[instrument(
        skip(self),
        fields(subsystem = "backup", op = "restore", message_id = field::Empty, byte_len = field::Empty, duration_ms = field::Empty)
    )]
    pub async fn restore(&self) -> std::result::Result<RestoreOutcome, RestoreError> {
        let start = Instant::now();
        let credentials = self
            .db
            .settings
            .load_credentials()
            .await
            .map_err(RestoreError::Storage)?
            .ok_or(RestoreError::MissingCredentials)?;

        let chat = self
            .channel
            .get_chat_state(&credentials)
            .await
            .map_err(RestoreError::ChannelUnreachable)?;
        let pinned = chat.pinned_message.ok_or(RestoreError::NoBackupFound)?;
        Span::current().record(logging::MESSAGE_ID, pinned.message_id);
        let document = pinned.document.ok_or(RestoreError::NotABackup)?;

        let file_path = match self
            .channel
            .resolve_file_path(&credentials, &document.file_id)
            .await
        {
            Ok(Some(path)) => path,
            Ok(None) => {
                return Err(RestoreError::ResolveFailed(
                    "no download path returned".to_string(),
                ))
            }
            Err(e) => return Err(RestoreError::ResolveFailed(e.to_string())),
        };

        let bytes = self
            .channel
            .download_file(&credentials, &file_path)
            .await
            .map_err(RestoreError::DownloadFailed)?;
        Span::current().record(logging::BYTE_LEN, bytes.len() as u64);

        let content = String::from_utf8(bytes)
            .map_err(|_| RestoreError::InvalidContent("not UTF-8 text".to_string()))?;

        let summary = self
            .db
            .snapshots
            .import_snapshot(&content)
            .await
            .map_err(|e| match e {
                Error::InvalidBackup(reason) => RestoreError::InvalidContent(reason),
                other => RestoreError::Storage(other),
            })?;

        // Snapshots from older versions may lack a registry or the protected tag.
        self.db
            .tags
            .ensure_initialized()
            .await
            .map_err(RestoreError::Storage)?;

        Span::current().record(logging::DURATION_MS, start.elapsed().as_millis() as u64);
        info!(
            reading_count = summary.reading_count,
            todo_count = summary.todo_count,
            "Restore complete"
        );
        Ok(RestoreOutcome {
            message_id: pinned.message_id,
            file_name: document.file_name,
            summary,
        })
    }

    /// Send the connection test message with `credentials`.
    pub async fn test_connection(&self, credentials: &Credentials) -> Result<()> {
        self.channel
            .send_text_message(credentials, CONNECTION_TEST_MESSAGE)
            .await?;
        info!(subsystem = "backup", chat_id = %credentials.chat_id, "Connection test sent");
        Ok(())
    }

    /// Notify the channel that an item received a share tag.
    ///
    /// Returns whether a message was sent. Tags outside the share set and
    /// missing credentials skip the notification.
    pub async fn share_if_flagged(&self, title: &str, url: &str, tag: &str) -> Result<bool> {
        if !SHARE_TAGS.contains(&tag) {
            return Ok(false);
        }
        let Some(credentials) = self.db.settings.load_credentials().await? else {
            info!(subsystem = "backup", tag, "Share skipped, credentials missing");
            return Ok(false);
        };

        self.channel
            .send_text_message(&credentials, &share_message(title, url, tag))
            .await?;
        Ok(true)
    }
}
