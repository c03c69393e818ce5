//! Centralized default constants for ReadLater.
//!
//! **This module is the single source of truth** for slot names, default tag
//! sets, and remote channel settings. Other crates reference these constants
//! instead of repeating string literals.

// =============================================================================
// KEY-VALUE SLOTS
// =============================================================================

/// Slot holding the reading collection.
pub const READING_LIST_KEY: &str = "readingList";

/// Slot holding the todo collection.
pub const TODO_LIST_KEY: &str = "todoList";

/// Slot holding the tag registry.
pub const ALL_TAGS_KEY: &str = "allTags";

/// Slot holding the Telegram bot token (opaque to the data layer).
pub const BOT_TOKEN_KEY: &str = "telegramBotToken";

/// Slot holding the Telegram chat id (opaque to the data layer).
pub const CHAT_ID_KEY: &str = "telegramChatId";

// =============================================================================
// TAGS
// =============================================================================

/// Tag that can never be removed from the registry.
pub const PROTECTED_TAG: &str = "Must-read";

/// Tag that floats items to the top of list views.
pub const PRIORITY_TAG: &str = "Priority";

/// Tag that triggers a share notification with the video emoji.
pub const VIDEO_TAG: &str = "Video to watch";

/// Registry contents written when the `allTags` slot is empty.
pub const DEFAULT_TAGS: &[&str] = &[
    PROTECTED_TAG,
    PRIORITY_TAG,
    "Course to check",
    "Interesting Person",
    "Interesting Project",
    "Job to apply",
];

/// Tags whose assignment sends a share notification to the remote channel.
pub const SHARE_TAGS: &[&str] = &[PROTECTED_TAG, VIDEO_TAG];

// =============================================================================
// REMOTE CHANNEL
// =============================================================================

/// Telegram Bot API base URL.
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Request timeout for Bot API calls (seconds).
pub const TELEGRAM_TIMEOUT_SECS: u64 = 60;

/// Parse mode used for text messages.
pub const TELEGRAM_PARSE_MODE: &str = "Markdown";

/// Prefix of uploaded backup file names; the UTC date and `.json` follow.
pub const BACKUP_FILENAME_PREFIX: &str = "readlater_backup_";

/// Caption attached to uploaded backup documents.
pub const BACKUP_CAPTION: &str = "📦 ReadLater Backup - Pin this message to restore from it later.";

/// Message sent by the connection test.
pub const CONNECTION_TEST_MESSAGE: &str =
    "✅ Connection successful! Your ReadLater extension is connected.";

// =============================================================================
// LOCAL STORE
// =============================================================================

/// Default path of the JSON file backing the key-value namespace.
pub const STORE_PATH: &str = "readlater.json";
