//! Structured logging field name constants for ReadLater.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log output can be filtered by the same names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Operation failed and the caller was told |
//! | WARN  | Recoverable issue (pin failed, share skipped) |
//! | INFO  | Lifecycle events, backup/restore completions |
//! | DEBUG | Repository mutations, request mapping |
//! | TRACE | Raw payload sizes, per-item iteration |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "db", "telegram", "backup", "cli"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "items", "tags", "settings", "snapshot", "file_store"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "add_reading_item", "link_items", "sendDocument"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Reading item id being operated on.
pub const READING_ID: &str = "reading_id";

/// Todo item id being operated on.
pub const TODO_ID: &str = "todo_id";

/// Tag name being added or removed.
pub const TAG: &str = "tag";

/// Key-value slot name.
pub const SLOT: &str = "slot";

/// Remote message id (upload or pin target).
pub const MESSAGE_ID: &str = "message_id";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte length of a snapshot or download.
pub const BYTE_LEN: &str = "byte_len";

/// Number of reading items in a loaded or restored namespace.
pub const READING_COUNT: &str = "reading_count";

/// Number of todo items in a loaded or restored namespace.
pub const TODO_COUNT: &str = "todo_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
