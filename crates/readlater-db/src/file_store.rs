//! Single JSON file key-value store.
//!
//! The whole namespace lives in one JSON object on disk. Every read loads the
//! file; every write loads it, applies the change, and replaces the file
//! atomically (temp file + rename), so a crash never leaves a torn document.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

use readlater_core::{Error, KeyValueStore, Namespace, Result};

/// Key-value namespace persisted as one JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store at `path`.
    ///
    /// The file does not need to exist; it is created by the first write.
    /// An existing file must hold a JSON object.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        // Fail early on an unreadable or malformed file.
        store.load().await?;
        debug!(
            subsystem = "db",
            component = "file_store",
            path = %store.path.display(),
            "Opened JSON file store"
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Namespace> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Namespace::new()),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "file_store: read failed");
                return Err(Error::Io(e));
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Namespace::new());
        }

        trace!(path = %self.path.display(), byte_len = bytes.len(), "file_store: loaded");
        match serde_json::from_slice(&bytes)? {
            serde_json::Value::Object(ns) => Ok(ns),
            other => Err(Error::Storage(format!(
                "{} does not hold a JSON object (found {})",
                self.path.display(),
                json_kind(&other)
            ))),
        }
    }

    async fn persist(&self, ns: &Namespace) -> Result<()> {
        let data = serde_json::to_vec_pretty(ns)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                warn!(parent = %parent.display(), error = %e, "file_store: create_dir_all failed");
                e
            })?;
        }

        // Atomic write: temp file + rename
        let temp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            warn!(temp_path = %temp_path.display(), error = %e, "file_store: File::create failed");
            e
        })?;
        file.write_all(&data).await.map_err(|e| {
            warn!(error = %e, "file_store: write_all failed");
            e
        })?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            warn!(from = %temp_path.display(), to = %self.path.display(), error = %e, "file_store: rename failed");
            e
        })?;

        trace!(path = %self.path.display(), byte_len = data.len(), "file_store: persisted");
        Ok(())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, keys: &[&str]) -> Result<Namespace> {
        let mut ns = self.load().await?;
        Ok(keys
            .iter()
            .filter_map(|k| ns.remove(*k).map(|v| (k.to_string(), v)))
            .collect())
    }

    async fn get_all(&self) -> Result<Namespace> {
        self.load().await
    }

    async fn set(&self, entries: Namespace) -> Result<()> {
        let _lock = self.write_lock.lock().await;
        let mut ns = self.load().await?;
        ns.extend(entries);
        self.persist(&ns).await
    }

    async fn clear(&self) -> Result<()> {
        let _lock = self.write_lock.lock().await;
        self.persist(&Namespace::new()).await
    }

    async fn replace_all(&self, entries: Namespace) -> Result<()> {
        let _lock = self.write_lock.lock().await;
        self.persist(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn ns(pairs: &[(&str, serde_json::Value)]) -> Namespace {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("store.json"))
            .await
            .unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_set_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        store
            .set(ns(&[("allTags", json!(["Must-read", "Priority"]))]))
            .await
            .unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let got = reopened.get(&["allTags"]).await.unwrap();
        assert_eq!(got["allTags"], json!(["Must-read", "Priority"]));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_replace_all_overwrites_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let store = JsonFileStore::open(&path).await.unwrap();

        store.set(ns(&[("a", json!(1)), ("b", json!(2))])).await.unwrap();
        store.replace_all(ns(&[("c", json!(3))])).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all, ns(&[("c", json!(3))]));
    }

    #[tokio::test]
    async fn test_clear_empties_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("store.json"))
            .await
            .unwrap();
        store.set(ns(&[("a", json!(1))])).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_rejects_non_object_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = JsonFileStore::open(&path).await.err().unwrap();
        assert!(matches!(err, Error::Storage(_)));
        assert!(err.to_string().contains("array"));
    }

    #[tokio::test]
    async fn test_open_accepts_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "\n").unwrap();

        let store = JsonFileStore::open(&path).await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }
}
