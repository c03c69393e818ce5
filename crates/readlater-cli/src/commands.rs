//! Command execution.

use anyhow::{bail, Context};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use readlater_backup::BackupService;
use readlater_db::defaults::SHARE_TAGS;
use readlater_db::{
    filter_by_tag, priority_first, Credentials, Database, ItemRepository, NewReadingItem,
    NewTodoItem, ReadingItemUpdate, SettingsRepository, TagRepository, TodoItemUpdate,
};
use readlater_telegram::TelegramClient;

use crate::config::Config;
use crate::{CredentialCommands, Commands, ReadingFields, TagCommands, TodoFields};

/// Placeholder URL in share notifications for items without one.
const NO_URL: &str = "(No URL)";

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn backup_service(
    db: &Database,
    config: &Config,
) -> anyhow::Result<BackupService<TelegramClient>> {
    let client = TelegramClient::new(config.telegram.clone())?;
    Ok(BackupService::new(db.clone(), client))
}

/// Send share notifications for share tags in `added`. Failures are logged,
/// never fatal: the local write has already happened.
async fn share_added_tags(
    db: &Database,
    config: &Config,
    title: &str,
    url: &str,
    added: &[String],
) -> Vec<String> {
    let flagged: Vec<&String> = added
        .iter()
        .filter(|t| SHARE_TAGS.contains(&t.as_str()))
        .collect();
    if flagged.is_empty() {
        return Vec::new();
    }

    let service = match backup_service(db, config) {
        Ok(service) => service,
        Err(e) => {
            warn!(subsystem = "cli", error = %e, "Share skipped");
            return Vec::new();
        }
    };
    let url = if url.is_empty() { NO_URL } else { url };

    let mut shared = Vec::new();
    for tag in flagged {
        match service.share_if_flagged(title, url, tag).await {
            Ok(true) => shared.push(tag.clone()),
            Ok(false) => {}
            Err(e) => warn!(subsystem = "cli", tag = %tag, error = %e, "Share notification failed"),
        }
    }
    shared
}

fn newly_added(before: &[String], after: &[String]) -> Vec<String> {
    after
        .iter()
        .filter(|t| !before.contains(t))
        .cloned()
        .collect()
}

pub async fn run(command: Commands, config: &Config) -> anyhow::Result<()> {
    let db = Database::open(&config.store_path)
        .await
        .with_context(|| format!("Failed to open store {}", config.store_path.display()))?;
    db.tags.ensure_initialized().await?;

    match command {
        Commands::List { tag } => {
            let lists = db.items.load_all().await?;
            let mut reading = filter_by_tag(&lists.reading_list, tag.as_deref());
            let mut todos = filter_by_tag(&lists.todo_list, tag.as_deref());
            priority_first(&mut reading);
            priority_first(&mut todos);
            print_json(&json!({ "readingList": reading, "todoList": todos }))?;
        }

        Commands::AddReading {
            url,
            title,
            tags,
            fav_icon_url,
            notes,
        } => {
            let mut req = NewReadingItem::new(url, title).with_tags(tags);
            req.fav_icon_url = fav_icon_url;
            req.notes = notes;
            let item = db.items.add_reading_item(req).await?;
            let shared = share_added_tags(&db, config, &item.title, &item.url, &item.tags).await;
            print_json(&json!({ "item": item, "shared": shared }))?;
        }

        Commands::AddTodo {
            title,
            description,
            url,
            tags,
            priority,
            due_date,
        } => {
            let mut req = NewTodoItem::new(title)
                .with_description(description)
                .with_url(url)
                .with_tags(tags);
            req.priority = priority;
            req.due_date = due_date;
            let item = db.items.add_todo_item(req).await?;
            let shared = share_added_tags(&db, config, &item.title, &item.url, &item.tags).await;
            print_json(&json!({ "item": item, "shared": shared }))?;
        }

        Commands::UpdateReading { id, fields } => {
            let Some(before) = db.items.get_reading_item(id).await? else {
                bail!("No reading item with id {}", id);
            };
            let update = reading_update(fields);
            if update.is_empty() {
                bail!("Nothing to update");
            }
            db.items.update_reading_item(id, update).await?;

            let item = db.items.get_reading_item(id).await?;
            let shared = match &item {
                Some(item) => {
                    let added = newly_added(&before.tags, &item.tags);
                    share_added_tags(&db, config, &item.title, &item.url, &added).await
                }
                None => Vec::new(),
            };
            print_json(&json!({ "item": item, "shared": shared }))?;
        }

        Commands::UpdateTodo { id, fields } => {
            let Some(before) = db.items.get_todo_item(id).await? else {
                bail!("No todo item with id {}", id);
            };
            let update = todo_update(fields);
            if update.is_empty() {
                bail!("Nothing to update");
            }
            db.items.update_todo_item(id, update).await?;

            let item = db.items.get_todo_item(id).await?;
            let shared = match &item {
                Some(item) => {
                    let added = newly_added(&before.tags, &item.tags);
                    share_added_tags(&db, config, &item.title, &item.url, &added).await
                }
                None => Vec::new(),
            };
            print_json(&json!({ "item": item, "shared": shared }))?;
        }

        Commands::DeleteReading { id } => {
            db.items.delete_reading_item(id).await?;
            print_json(&json!({ "deleted": id }))?;
        }

        Commands::DeleteTodo { id } => {
            db.items.delete_todo_item(id).await?;
            print_json(&json!({ "deleted": id }))?;
        }

        Commands::Link {
            todo_id,
            reading_id,
        } => {
            db.items.link_items(todo_id, reading_id).await?;
            let todo = db.items.get_todo_item(todo_id).await?;
            let reading = db.items.get_reading_item(reading_id).await?;
            print_json(&json!({ "todo": todo, "reading": reading }))?;
        }

        Commands::Unlink {
            todo_id,
            reading_id,
        } => {
            db.items.unlink_items(todo_id, reading_id).await?;
            let todo = db.items.get_todo_item(todo_id).await?;
            let reading = db.items.get_reading_item(reading_id).await?;
            print_json(&json!({ "todo": todo, "reading": reading }))?;
        }

        Commands::Tags { command } => {
            match command {
                TagCommands::List => {}
                TagCommands::Add { name } => db.tags.add_tag(&name).await?,
                TagCommands::Remove { name } => db.tags.remove_tag(&name).await?,
            }
            print_json(&db.tags.list_tags().await?)?;
        }

        Commands::Credentials { command } => match command {
            CredentialCommands::Set {
                bot_token,
                chat_id,
                test,
            } => {
                let credentials = Credentials::new(bot_token.trim(), chat_id.trim());
                if test {
                    backup_service(&db, config)?
                        .test_connection(&credentials)
                        .await
                        .context("Connection test failed, credentials not saved")?;
                }
                db.settings.save_credentials(&credentials).await?;
                print_json(&json!({ "saved": true, "chat_id": credentials.chat_id }))?;
            }
            CredentialCommands::Show => {
                let credentials = db.settings.load_credentials().await?;
                print_json(&json!({
                    "configured": credentials.is_some(),
                    "chat_id": credentials.map(|c| c.chat_id),
                }))?;
            }
        },

        Commands::TestConnection => {
            let Some(credentials) = db.settings.load_credentials().await? else {
                bail!("Telegram credentials are not configured");
            };
            backup_service(&db, config)?
                .test_connection(&credentials)
                .await?;
            print_json(&json!({ "sent": true }))?;
        }

        Commands::Backup => {
            let status = backup_service(&db, config)?.backup().await?;
            if !status.is_pinned() {
                warn!(subsystem = "cli", "Backup uploaded but not pinned; restore will not find it");
            }
            print_json(&status)?;
        }

        Commands::Restore => {
            let outcome = backup_service(&db, config)?.restore().await?;
            print_json(&outcome)?;
        }

        Commands::Export { output } => {
            let content = db.snapshots.export_snapshot().await?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, content.as_bytes())
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(subsystem = "cli", path = %path.display(), "Snapshot written");
                    print_json(&json!({ "path": path, "byte_len": content.len() }))?;
                }
                None => println!("{}", content),
            }
        }

        Commands::Import { file } => {
            let content = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let summary = db.snapshots.import_snapshot(&content).await?;
            db.tags.ensure_initialized().await?;
            print_json(&summary)?;
        }
    }

    Ok(())
}

fn reading_update(fields: ReadingFields) -> ReadingItemUpdate {
    ReadingItemUpdate {
        url: fields.url,
        title: fields.title,
        fav_icon_url: fields.fav_icon_url,
        tags: fields.tags,
        status: fields.status.map(Into::into),
        notes: fields.notes,
    }
}

fn todo_update(fields: TodoFields) -> TodoItemUpdate {
    TodoItemUpdate {
        title: fields.title,
        description: fields.description,
        url: fields.url,
        tags: fields.tags,
        status: fields.status.map(Into::into),
        priority: fields.priority,
        due_date: fields.due_date,
    }
}
