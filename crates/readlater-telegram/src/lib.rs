//! # readlater-telegram
//!
//! Telegram Bot API client used as the remote channel for backups and share
//! notifications.
//!
//! This crate provides:
//! - [`TelegramClient`], the HTTP implementation of [`RemoteChannel`]
//! - Bot API envelope and request types
//! - Legacy Markdown escaping for message text
//! - An in-memory channel for tests (feature `mock`)
//!
//! # Feature Flags
//!
//! - `mock`: Enable [`mock::MockRemoteChannel`]
//!
//! # Example
//!
//! ```rust,no_run
//! use readlater_telegram::{Credentials, RemoteChannel, TelegramClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TelegramClient::from_env()?;
//!     let creds = Credentials::new("123456:ABC-DEF", "-1001234567890");
//!     client.send_text_message(&creds, "Hello from *ReadLater*").await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod markdown;
pub mod types;

// In-memory remote channel for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use readlater_core::*;

pub use client::TelegramClient;
pub use config::TelegramConfig;
pub use markdown::escape_markdown;
