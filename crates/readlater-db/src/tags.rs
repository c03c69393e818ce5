//! Tag registry over the `allTags` slot.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use readlater_core::defaults::{ALL_TAGS_KEY, DEFAULT_TAGS, PROTECTED_TAG};
use readlater_core::{Error, KeyValueStore, Namespace, Result, TagRepository};

use crate::slots::{put_slot, take_slot};
use crate::WriteGuard;

/// Apply registry defaults to a stored tag list.
///
/// An absent list becomes [`DEFAULT_TAGS`]; a list without the protected tag
/// gets it prepended. The flag reports whether the result differs from what
/// is stored.
pub fn heal_tags(stored: Option<Vec<String>>) -> (Vec<String>, bool) {
    match stored {
        None => (DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(), true),
        Some(tags) if !tags.iter().any(|t| t == PROTECTED_TAG) => {
            let mut healed = Vec::with_capacity(tags.len() + 1);
            healed.push(PROTECTED_TAG.to_string());
            healed.extend(tags);
            (healed, true)
        }
        Some(tags) => (tags, false),
    }
}

/// Key-value implementation of TagRepository.
#[derive(Clone)]
pub struct KvTagRepository {
    store: Arc<dyn KeyValueStore>,
    guard: WriteGuard,
}

impl KvTagRepository {
    /// Create a repository sharing `guard` with the other repositories of the namespace.
    pub fn new(store: Arc<dyn KeyValueStore>, guard: WriteGuard) -> Self {
        Self { store, guard }
    }

    async fn load_healed(&self) -> Result<(Vec<String>, bool)> {
        let mut ns = self.store.get(&[ALL_TAGS_KEY]).await?;
        Ok(heal_tags(take_slot(&mut ns, ALL_TAGS_KEY)?))
    }

    async fn save(&self, tags: &[String]) -> Result<()> {
        let mut entries = Namespace::new();
        put_slot(&mut entries, ALL_TAGS_KEY, tags)?;
        self.store.set(entries).await
    }
}

#[async_trait]
impl TagRepository for KvTagRepository {
    async fn ensure_initialized(&self) -> Result<Vec<String>> {
        let _guard = self.guard.lock().await;
        let (tags, healed) = self.load_healed().await?;
        if healed {
            self.save(&tags).await?;
            info!(
                subsystem = "db",
                component = "tags",
                op = "ensure_initialized",
                count = tags.len(),
                "Tag registry initialized"
            );
        }
        Ok(tags)
    }

    async fn list_tags(&self) -> Result<Vec<String>> {
        let (tags, _) = self.load_healed().await?;
        Ok(tags)
    }

    async fn add_tag(&self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("Tag name cannot be empty".to_string()));
        }

        let _guard = self.guard.lock().await;
        let (mut tags, healed) = self.load_healed().await?;
        let added = !tags.iter().any(|t| t == name);
        if added {
            tags.push(name.to_string());
        }
        if added || healed {
            self.save(&tags).await?;
        }
        debug!(subsystem = "db", component = "tags", op = "add_tag", tag = name, added, "Tag add");
        Ok(())
    }

    async fn remove_tag(&self, name: &str) -> Result<()> {
        if name == PROTECTED_TAG {
            debug!(tag = name, "Refusing to remove protected tag");
            return Ok(());
        }

        let _guard = self.guard.lock().await;
        let (mut tags, healed) = self.load_healed().await?;
        let removed = match tags.iter().position(|t| t == name) {
            Some(index) => {
                tags.remove(index);
                true
            }
            None => false,
        };
        if removed || healed {
            self.save(&tags).await?;
        }
        debug!(subsystem = "db", component = "tags", op = "remove_tag", tag = name, removed, "Tag remove");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_heal_absent_list_uses_defaults() {
        let (tags, healed) = heal_tags(None);
        assert!(healed);
        assert_eq!(tags, strings(DEFAULT_TAGS));
    }

    #[test]
    fn test_heal_prepends_protected_tag() {
        let (tags, healed) = heal_tags(Some(strings(&["Priority", "Work"])));
        assert!(healed);
        assert_eq!(tags, strings(&["Must-read", "Priority", "Work"]));
    }

    #[test]
    fn test_heal_keeps_existing_position() {
        let (tags, healed) = heal_tags(Some(strings(&["Work", "Must-read"])));
        assert!(!healed);
        assert_eq!(tags, strings(&["Work", "Must-read"]));
    }

    #[test]
    fn test_heal_empty_list_gets_protected_tag_only() {
        let (tags, healed) = heal_tags(Some(vec![]));
        assert!(healed);
        assert_eq!(tags, strings(&["Must-read"]));
    }
}
