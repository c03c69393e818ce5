//! Reading/todo item repository over the key-value namespace.
//!
//! Both collections are read and written together on every mutation. The
//! pair is small enough to hold in memory, which keeps cross-collection link
//! maintenance a plain in-memory edit.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use readlater_core::defaults::{READING_LIST_KEY, TODO_LIST_KEY};
use readlater_core::{
    extract_timestamp_millis, new_v7, ItemId, ItemLists, ItemRepository, KeyValueStore, Namespace,
    NewReadingItem, NewTodoItem, ReadingItem, ReadingItemUpdate, ReadingStatus, Result, TodoItem,
    TodoItemUpdate, TodoStatus,
};

use crate::slots::{put_slot, take_slot};
use crate::WriteGuard;

/// Key-value implementation of ItemRepository.
#[derive(Clone)]
pub struct KvItemRepository {
    store: Arc<dyn KeyValueStore>,
    guard: WriteGuard,
}

impl KvItemRepository {
    /// Create a repository sharing `guard` with the other repositories of the namespace.
    pub fn new(store: Arc<dyn KeyValueStore>, guard: WriteGuard) -> Self {
        Self { store, guard }
    }

    async fn load_lists(&self) -> Result<ItemLists> {
        let mut ns = self.store.get(&[READING_LIST_KEY, TODO_LIST_KEY]).await?;
        Ok(ItemLists {
            reading_list: take_slot(&mut ns, READING_LIST_KEY)?.unwrap_or_default(),
            todo_list: take_slot(&mut ns, TODO_LIST_KEY)?.unwrap_or_default(),
        })
    }

    async fn save_lists(&self, lists: &ItemLists) -> Result<()> {
        let mut entries = Namespace::new();
        put_slot(&mut entries, READING_LIST_KEY, &lists.reading_list)?;
        put_slot(&mut entries, TODO_LIST_KEY, &lists.todo_list)?;
        self.store.set(entries).await
    }

    /// Run one read-modify-write cycle under the namespace guard.
    ///
    /// `apply` returns `None` when nothing changed; the lists are then not
    /// written back.
    async fn mutate<T, F>(&self, op: &'static str, apply: F) -> Result<Option<T>>
    where
        T: Send,
        F: FnOnce(&mut ItemLists) -> Option<T> + Send,
    {
        let _guard = self.guard.lock().await;
        let mut lists = self.load_lists().await?;

        let outcome = apply(&mut lists);
        match outcome {
            Some(_) => {
                self.save_lists(&lists).await?;
                debug!(
                    subsystem = "db",
                    component = "items",
                    op,
                    reading_count = lists.reading_list.len(),
                    todo_count = lists.todo_list.len(),
                    "Item collections written"
                );
            }
            None => debug!(subsystem = "db", component = "items", op, "No-op, target missing"),
        }
        Ok(outcome)
    }
}

/// Fresh id plus a creation time that agrees with the id's embedded timestamp.
fn new_identity() -> (ItemId, i64) {
    let id = new_v7();
    let created_at =
        extract_timestamp_millis(&id).unwrap_or_else(|| Utc::now().timestamp_millis());
    (id, created_at)
}

fn push_unique(ids: &mut Vec<ItemId>, id: ItemId) -> bool {
    if ids.contains(&id) {
        false
    } else {
        ids.push(id);
        true
    }
}

fn remove_id(ids: &mut Vec<ItemId>, id: ItemId) -> bool {
    let before = ids.len();
    ids.retain(|x| *x != id);
    ids.len() != before
}

#[async_trait]
impl ItemRepository for KvItemRepository {
    async fn load_all(&self) -> Result<ItemLists> {
        self.load_lists().await
    }

    async fn get_reading_item(&self, id: ItemId) -> Result<Option<ReadingItem>> {
        let lists = self.load_lists().await?;
        Ok(lists.reading_list.into_iter().find(|r| r.id == id))
    }

    async fn get_todo_item(&self, id: ItemId) -> Result<Option<TodoItem>> {
        let lists = self.load_lists().await?;
        Ok(lists.todo_list.into_iter().find(|t| t.id == id))
    }

    async fn add_reading_item(&self, req: NewReadingItem) -> Result<ReadingItem> {
        let (id, created_at) = new_identity();
        let item = ReadingItem {
            id,
            url: req.url,
            title: req.title,
            fav_icon_url: req.fav_icon_url,
            tags: req.tags,
            status: ReadingStatus::Unread,
            linked_todo_ids: Vec::new(),
            created_at,
            notes: req.notes,
            extra: Default::default(),
        };

        let created = item.clone();
        self.mutate("add_reading_item", move |lists| {
            lists.reading_list.insert(0, item);
            Some(())
        })
        .await?;

        debug!(reading_id = %created.id, "Reading item created");
        Ok(created)
    }

    async fn add_todo_item(&self, req: NewTodoItem) -> Result<TodoItem> {
        let (id, created_at) = new_identity();
        let item = TodoItem {
            id,
            title: req.title,
            description: req.description,
            url: req.url,
            tags: req.tags,
            status: TodoStatus::Open,
            linked_reading_ids: Vec::new(),
            created_at,
            priority: req.priority,
            due_date: req.due_date,
            extra: Default::default(),
        };

        let created = item.clone();
        self.mutate("add_todo_item", move |lists| {
            lists.todo_list.insert(0, item);
            Some(())
        })
        .await?;

        debug!(todo_id = %created.id, "Todo item created");
        Ok(created)
    }

    async fn update_reading_item(&self, id: ItemId, update: ReadingItemUpdate) -> Result<()> {
        self.mutate("update_reading_item", move |lists| {
            let item = lists.reading_mut(id)?;
            update.apply(item);
            Some(())
        })
        .await?;
        Ok(())
    }

    async fn update_todo_item(&self, id: ItemId, update: TodoItemUpdate) -> Result<()> {
        self.mutate("update_todo_item", move |lists| {
            let item = lists.todo_mut(id)?;
            update.apply(item);
            Some(())
        })
        .await?;
        Ok(())
    }

    async fn delete_reading_item(&self, id: ItemId) -> Result<()> {
        self.mutate("delete_reading_item", move |lists| {
            let index = lists.reading_list.iter().position(|r| r.id == id)?;
            // Sever every reciprocal reference, including ones only the todo side recorded.
            for todo in lists.todo_list.iter_mut() {
                remove_id(&mut todo.linked_reading_ids, id);
            }
            lists.reading_list.remove(index);
            Some(())
        })
        .await?;
        Ok(())
    }

    async fn delete_todo_item(&self, id: ItemId) -> Result<()> {
        self.mutate("delete_todo_item", move |lists| {
            let index = lists.todo_list.iter().position(|t| t.id == id)?;
            for reading in lists.reading_list.iter_mut() {
                remove_id(&mut reading.linked_todo_ids, id);
            }
            lists.todo_list.remove(index);
            Some(())
        })
        .await?;
        Ok(())
    }

    async fn link_items(&self, todo_id: ItemId, reading_id: ItemId) -> Result<()> {
        self.mutate("link_items", move |lists| {
            if lists.todo(todo_id).is_none() || lists.reading(reading_id).is_none() {
                return None;
            }
            let todo_changed =
                push_unique(&mut lists.todo_mut(todo_id)?.linked_reading_ids, reading_id);
            let reading_changed =
                push_unique(&mut lists.reading_mut(reading_id)?.linked_todo_ids, todo_id);
            (todo_changed || reading_changed).then_some(())
        })
        .await?;
        Ok(())
    }

    async fn unlink_items(&self, todo_id: ItemId, reading_id: ItemId) -> Result<()> {
        self.mutate("unlink_items", move |lists| {
            let todo_changed = lists
                .todo_mut(todo_id)
                .map(|t| remove_id(&mut t.linked_reading_ids, reading_id))
                .unwrap_or(false);
            let reading_changed = lists
                .reading_mut(reading_id)
                .map(|r| remove_id(&mut r.linked_todo_ids, todo_id))
                .unwrap_or(false);
            (todo_changed || reading_changed).then_some(())
        })
        .await?;
        Ok(())
    }
}
