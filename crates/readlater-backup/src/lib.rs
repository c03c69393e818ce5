//! # readlater-backup
//!
//! Backup and restore of the whole ReadLater namespace through a remote
//! channel, plus share notifications for flagged items.
//!
//! ## Example
//!
//! ```rust,no_run
//! use readlater_backup::BackupService;
//! use readlater_db::Database;
//! use readlater_telegram::TelegramClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::open("readlater.json").await?;
//!     let service = BackupService::new(db, TelegramClient::from_env()?);
//!
//!     let status = service.backup().await?;
//!     println!("Backup message {}", status.message_id());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod service;

pub use error::{BackupError, BackupStatus, RestoreError};
pub use service::{backup_filename, share_message, BackupService, RestoreOutcome};
