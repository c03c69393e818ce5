//! List views over loaded collections.
//!
//! Pure helpers for the presentation layer: tag filtering and the
//! "Priority first" ordering. Nothing here touches storage.

use crate::defaults::PRIORITY_TAG;
use crate::models::{ReadingItem, TodoItem};

/// Anything that carries a tag list.
pub trait TaggedItem {
    fn tags(&self) -> &[String];

    fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }
}

impl TaggedItem for ReadingItem {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl TaggedItem for TodoItem {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Items carrying `tag`, or all items when `tag` is `None` or empty.
pub fn filter_by_tag<'a, T: TaggedItem>(items: &'a [T], tag: Option<&str>) -> Vec<&'a T> {
    match tag {
        Some(tag) if !tag.is_empty() => items.iter().filter(|i| i.has_tag(tag)).collect(),
        _ => items.iter().collect(),
    }
}

/// Stable sort putting items tagged "Priority" first.
///
/// Relative order within each group is kept, so newest-first survives.
pub fn priority_first<T: TaggedItem>(items: &mut [&T]) {
    items.sort_by_key(|i| !i.has_tag(PRIORITY_TAG));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReadingStatus, TodoStatus};
    use serde_json::Map;
    use uuid::Uuid;

    fn reading(title: &str, tags: &[&str]) -> ReadingItem {
        ReadingItem {
            id: Uuid::new_v4(),
            url: format!("https://{}.example", title),
            title: title.to_string(),
            fav_icon_url: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            status: ReadingStatus::Unread,
            linked_todo_ids: vec![],
            created_at: 0,
            notes: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_filter_by_tag() {
        let items = vec![
            reading("a", &["Must-read"]),
            reading("b", &[]),
            reading("c", &["Must-read", "Priority"]),
        ];

        let filtered = filter_by_tag(&items, Some("Must-read"));
        let titles: Vec<&str> = filtered.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn test_filter_without_tag_returns_all() {
        let items = vec![reading("a", &[]), reading("b", &["x"])];
        assert_eq!(filter_by_tag(&items, None).len(), 2);
        assert_eq!(filter_by_tag(&items, Some("")).len(), 2);
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let items = vec![reading("a", &["must-read"])];
        assert!(filter_by_tag(&items, Some("Must-read")).is_empty());
    }

    #[test]
    fn test_priority_first_is_stable() {
        let items = vec![
            reading("a", &[]),
            reading("b", &["Priority"]),
            reading("c", &[]),
            reading("d", &["Priority"]),
        ];

        let mut view = filter_by_tag(&items, None);
        priority_first(&mut view);
        let titles: Vec<&str> = view.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_todo_items_are_tagged() {
        let todo = TodoItem {
            id: Uuid::new_v4(),
            title: "T".to_string(),
            description: String::new(),
            url: String::new(),
            tags: vec!["Priority".to_string()],
            status: TodoStatus::Open,
            linked_reading_ids: vec![],
            created_at: 0,
            priority: None,
            due_date: None,
            extra: Map::new(),
        };
        assert!(todo.has_tag("Priority"));
    }
}
