//! Credential slots for the remote channel.
//!
//! The data layer never interprets these values; it only stores them and
//! hands them to the remote channel client.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::info;

use readlater_core::defaults::{BOT_TOKEN_KEY, CHAT_ID_KEY};
use readlater_core::{Credentials, Error, KeyValueStore, Namespace, Result, SettingsRepository};

use crate::WriteGuard;

/// Key-value implementation of SettingsRepository.
#[derive(Clone)]
pub struct KvSettingsRepository {
    store: Arc<dyn KeyValueStore>,
    guard: WriteGuard,
}

impl KvSettingsRepository {
    /// Create a repository sharing `guard` with the other repositories of the namespace.
    pub fn new(store: Arc<dyn KeyValueStore>, guard: WriteGuard) -> Self {
        Self { store, guard }
    }
}

fn non_blank(value: Option<&JsonValue>) -> Option<String> {
    let text = match value? {
        JsonValue::String(s) => s.trim().to_string(),
        // Chat ids are sometimes stored as numbers.
        JsonValue::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl SettingsRepository for KvSettingsRepository {
    async fn load_credentials(&self) -> Result<Option<Credentials>> {
        let ns = self.store.get(&[BOT_TOKEN_KEY, CHAT_ID_KEY]).await?;
        let token = non_blank(ns.get(BOT_TOKEN_KEY));
        let chat_id = non_blank(ns.get(CHAT_ID_KEY));
        Ok(match (token, chat_id) {
            (Some(bot_token), Some(chat_id)) => Some(Credentials { bot_token, chat_id }),
            _ => None,
        })
    }

    async fn save_credentials(&self, credentials: &Credentials) -> Result<()> {
        let bot_token = credentials.bot_token.trim();
        let chat_id = credentials.chat_id.trim();
        if bot_token.is_empty() || chat_id.is_empty() {
            return Err(Error::InvalidInput(
                "Bot token and chat id are both required".to_string(),
            ));
        }

        let mut entries = Namespace::new();
        entries.insert(BOT_TOKEN_KEY.to_string(), JsonValue::from(bot_token));
        entries.insert(CHAT_ID_KEY.to_string(), JsonValue::from(chat_id));

        let _guard = self.guard.lock().await;
        self.store.set(entries).await?;
        info!(subsystem = "db", component = "settings", chat_id, "Credentials saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde_json::json;
    use tokio::sync::Mutex;

    fn repo_with(slots: &[(&str, JsonValue)]) -> KvSettingsRepository {
        let ns: Namespace = slots
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        KvSettingsRepository::new(
            Arc::new(MemoryStore::with_slots(ns)),
            Arc::new(Mutex::new(())),
        )
    }

    #[tokio::test]
    async fn test_round_trip_trims_values() {
        let repo = repo_with(&[]);
        repo.save_credentials(&Credentials::new(" 123:abc ", " -100200 "))
            .await
            .unwrap();

        let creds = repo.load_credentials().await.unwrap().unwrap();
        assert_eq!(creds, Credentials::new("123:abc", "-100200"));
    }

    #[tokio::test]
    async fn test_blank_slot_means_no_credentials() {
        let repo = repo_with(&[
            ("telegramBotToken", json!("123:abc")),
            ("telegramChatId", json!("   ")),
        ]);
        assert!(repo.load_credentials().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_numeric_chat_id_is_accepted() {
        let repo = repo_with(&[
            ("telegramBotToken", json!("123:abc")),
            ("telegramChatId", json!(-100200)),
        ]);
        let creds = repo.load_credentials().await.unwrap().unwrap();
        assert_eq!(creds.chat_id, "-100200");
    }

    #[tokio::test]
    async fn test_save_rejects_blank_token() {
        let repo = repo_with(&[]);
        let err = repo
            .save_credentials(&Credentials::new("", "42"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
