//! Whole-namespace snapshots.
//!
//! A snapshot is the entire key-value namespace serialized as one JSON object
//! whose top-level keys are the slot names. Credentials and the tag registry
//! travel with the collections. Importing a snapshot replaces the namespace;
//! slots missing from the snapshot are gone afterwards.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use readlater_core::defaults::{READING_LIST_KEY, TODO_LIST_KEY};
use readlater_core::{Error, KeyValueStore, Namespace, ReadingItem, Result, TodoItem};

use crate::WriteGuard;

/// What an import put in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub slot_count: usize,
    pub reading_count: usize,
    pub todo_count: usize,
}

/// Parse and validate snapshot content without touching any store.
///
/// The content must be a JSON object holding a `readingList` or a
/// `todoList` slot (or both); present collection slots must decode as item
/// lists. Anything else is [`Error::InvalidBackup`].
pub fn parse_snapshot(content: &str) -> Result<(Namespace, ImportSummary)> {
    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| Error::InvalidBackup(format!("not a JSON document: {}", e)))?;

    let ns = match value {
        serde_json::Value::Object(ns) => ns,
        _ => return Err(Error::InvalidBackup("not a JSON object".to_string())),
    };

    let present = |key: &str| ns.get(key).is_some_and(|v| !v.is_null());
    if !present(READING_LIST_KEY) && !present(TODO_LIST_KEY) {
        return Err(Error::InvalidBackup("no recognized data found".to_string()));
    }

    let summary = ImportSummary {
        slot_count: ns.len(),
        reading_count: count_items::<ReadingItem>(&ns, READING_LIST_KEY)?,
        todo_count: count_items::<TodoItem>(&ns, TODO_LIST_KEY)?,
    };
    Ok((ns, summary))
}

/// Decode a collection slot to prove its shape; absent or null counts as empty.
fn count_items<T: DeserializeOwned>(ns: &Namespace, key: &str) -> Result<usize> {
    match ns.get(key).filter(|v| !v.is_null()) {
        Some(value) => Vec::<T>::deserialize(value)
            .map(|items| items.len())
            .map_err(|e| Error::InvalidBackup(format!("slot '{}' is malformed: {}", key, e))),
        None => Ok(0),
    }
}

/// Export and import of the whole namespace.
#[derive(Clone)]
pub struct SnapshotRepository {
    store: Arc<dyn KeyValueStore>,
    guard: WriteGuard,
}

impl SnapshotRepository {
    /// Create a repository sharing `guard` with the other repositories of the namespace.
    pub fn new(store: Arc<dyn KeyValueStore>, guard: WriteGuard) -> Self {
        Self { store, guard }
    }

    /// Serialize every slot of the namespace into one JSON document.
    pub async fn export_snapshot(&self) -> Result<String> {
        let ns = self.store.get_all().await?;
        let content = serde_json::to_string(&ns)?;
        info!(
            subsystem = "db",
            component = "snapshot",
            op = "export",
            slot_count = ns.len(),
            byte_len = content.len(),
            "Snapshot exported"
        );
        Ok(content)
    }

    /// Validate `content` and replace the namespace with it.
    ///
    /// Validation happens before any write; a rejected snapshot leaves the
    /// namespace untouched.
    pub async fn import_snapshot(&self, content: &str) -> Result<ImportSummary> {
        let start = Instant::now();
        let (ns, summary) = parse_snapshot(content).map_err(|e| {
            warn!(subsystem = "db", component = "snapshot", error = %e, "Snapshot rejected");
            e
        })?;

        let _guard = self.guard.lock().await;
        self.store.replace_all(ns).await?;

        info!(
            subsystem = "db",
            component = "snapshot",
            op = "import",
            slot_count = summary.slot_count,
            reading_count = summary.reading_count,
            todo_count = summary.todo_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "Snapshot imported"
        );
        Ok(summary)
    }
}
