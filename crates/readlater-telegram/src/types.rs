//! Bot API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Envelope wrapping every Bot API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<u16>,
}

/// Result of `getFile`.
#[derive(Debug, Deserialize)]
pub struct FileInfo {
    pub file_id: String,
    #[serde(default)]
    pub file_path: Option<String>,
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// Request body for `sendMessage`.
#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'a str,
}

/// Request body for `pinChatMessage`.
#[derive(Debug, Serialize)]
pub struct PinMessageRequest<'a> {
    pub chat_id: &'a str,
    pub message_id: i64,
}

/// Request body for `getChat`.
#[derive(Debug, Serialize)]
pub struct GetChatRequest<'a> {
    pub chat_id: &'a str,
}

/// Request body for `getFile`.
#[derive(Debug, Serialize)]
pub struct GetFileRequest<'a> {
    pub file_id: &'a str,
}
