//! Core data models for ReadLater.
//!
//! These types are shared across all ReadLater crates. Their serde shape is
//! the persisted layout: camelCase field names inside the `readingList` and
//! `todoList` slots, ids as UUID strings, timestamps as epoch milliseconds.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Identifier of a reading or todo item.
pub type ItemId = Uuid;

// =============================================================================
// READING ITEMS
// =============================================================================

/// Read state of a saved link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    #[default]
    Unread,
    Done,
}

/// A saved link/page entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingItem {
    pub id: ItemId,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: ReadingStatus,
    #[serde(default)]
    pub linked_todo_ids: Vec<ItemId>,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Fields this version does not model, kept so a rewrite never drops them.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Request for creating a reading item.
#[derive(Debug, Clone, Default)]
pub struct NewReadingItem {
    pub url: String,
    pub title: String,
    pub fav_icon_url: Option<String>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

impl NewReadingItem {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fav_icon_url(mut self, url: impl Into<String>) -> Self {
        self.fav_icon_url = Some(url.into());
        self
    }
}

/// Shallow field replacement for a reading item.
///
/// `None` leaves the field untouched. Identity, creation time, and links are
/// not part of the payload; links only change through link/unlink/delete.
#[derive(Debug, Clone, Default)]
pub struct ReadingItemUpdate {
    pub url: Option<String>,
    pub title: Option<String>,
    pub fav_icon_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<ReadingStatus>,
    pub notes: Option<String>,
}

impl ReadingItemUpdate {
    /// Apply the present fields to `item`.
    pub fn apply(self, item: &mut ReadingItem) {
        if let Some(url) = self.url {
            item.url = url;
        }
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(fav_icon_url) = self.fav_icon_url {
            item.fav_icon_url = Some(fav_icon_url);
        }
        if let Some(tags) = self.tags {
            item.tags = tags;
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(notes) = self.notes {
            item.notes = Some(notes);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.title.is_none()
            && self.fav_icon_url.is_none()
            && self.tags.is_none()
            && self.status.is_none()
            && self.notes.is_none()
    }
}

// =============================================================================
// TODO ITEMS
// =============================================================================

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    #[default]
    Open,
    Done,
}

/// A task entry, optionally tied to a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: TodoStatus,
    #[serde(default)]
    pub linked_reading_ids: Vec<ItemId>,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Request for creating a todo item.
#[derive(Debug, Clone, Default)]
pub struct NewTodoItem {
    pub title: String,
    pub description: String,
    /// Empty for manually created tasks.
    pub url: String,
    pub tags: Vec<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

impl NewTodoItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Shallow field replacement for a todo item.
#[derive(Debug, Clone, Default)]
pub struct TodoItemUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<TodoStatus>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

impl TodoItemUpdate {
    /// Apply the present fields to `item`.
    pub fn apply(self, item: &mut TodoItem) {
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(url) = self.url {
            item.url = url;
        }
        if let Some(tags) = self.tags {
            item.tags = tags;
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(priority) = self.priority {
            item.priority = Some(priority);
        }
        if let Some(due_date) = self.due_date {
            item.due_date = Some(due_date);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.url.is_none()
            && self.tags.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

// =============================================================================
// COLLECTION PAIR
// =============================================================================

/// Both collections, newest first, as loaded from the namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemLists {
    pub reading_list: Vec<ReadingItem>,
    pub todo_list: Vec<TodoItem>,
}

impl ItemLists {
    pub fn reading(&self, id: ItemId) -> Option<&ReadingItem> {
        self.reading_list.iter().find(|r| r.id == id)
    }

    pub fn todo(&self, id: ItemId) -> Option<&TodoItem> {
        self.todo_list.iter().find(|t| t.id == id)
    }

    pub fn reading_mut(&mut self, id: ItemId) -> Option<&mut ReadingItem> {
        self.reading_list.iter_mut().find(|r| r.id == id)
    }

    pub fn todo_mut(&mut self, id: ItemId) -> Option<&mut TodoItem> {
        self.todo_list.iter_mut().find(|t| t.id == id)
    }

    /// Check that every link is recorded on both sides.
    ///
    /// Returns the first one-sided `(todo_id, reading_id)` pair found.
    pub fn find_asymmetric_link(&self) -> Option<(ItemId, ItemId)> {
        let from_reading: HashSet<(ItemId, ItemId)> = self
            .reading_list
            .iter()
            .flat_map(|r| r.linked_todo_ids.iter().map(move |t| (*t, r.id)))
            .collect();
        let from_todo: HashSet<(ItemId, ItemId)> = self
            .todo_list
            .iter()
            .flat_map(|t| t.linked_reading_ids.iter().map(move |r| (t.id, *r)))
            .collect();

        from_reading
            .symmetric_difference(&from_todo)
            .next()
            .copied()
    }

    pub fn links_are_symmetric(&self) -> bool {
        self.find_asymmetric_link().is_none()
    }
}

// =============================================================================
// REMOTE CHANNEL TYPES
// =============================================================================

/// Credentials for the remote channel, stored in the namespace as opaque
/// pass-through values.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl Credentials {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Message created by an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub message_id: i64,
}

/// File attachment reference on a remote message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub file_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// The message currently pinned in the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedMessage {
    pub message_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentRef>,
}

/// The parts of a chat's state the restore protocol inspects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_message: Option<PinnedMessage>,
}
