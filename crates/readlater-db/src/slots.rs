//! Typed access to JSON slots of a namespace.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use readlater_core::{Error, Namespace, Result};

/// Remove and decode a slot. Absent and `null` slots both read as `None`.
pub(crate) fn take_slot<T: DeserializeOwned>(ns: &mut Namespace, key: &str) -> Result<Option<T>> {
    match ns.remove(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| Error::Serialization(format!("slot '{}': {}", key, e))),
    }
}

/// Encode a value into a slot entry.
pub(crate) fn put_slot<T: Serialize + ?Sized>(
    ns: &mut Namespace,
    key: &str,
    value: &T,
) -> Result<()> {
    ns.insert(key.to_string(), serde_json::to_value(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_take_slot_absent_and_null() {
        let mut ns = Namespace::new();
        ns.insert("allTags".to_string(), JsonValue::Null);

        let absent: Option<Vec<String>> = take_slot(&mut ns, "todoList").unwrap();
        let null: Option<Vec<String>> = take_slot(&mut ns, "allTags").unwrap();
        assert!(absent.is_none());
        assert!(null.is_none());
    }

    #[test]
    fn test_take_slot_wrong_shape_names_slot() {
        let mut ns = Namespace::new();
        ns.insert("allTags".to_string(), json!({"not": "a list"}));

        let err = take_slot::<Vec<String>>(&mut ns, "allTags").unwrap_err();
        assert!(err.to_string().contains("allTags"));
    }

    #[test]
    fn test_put_then_take() {
        let mut ns = Namespace::new();
        put_slot(&mut ns, "allTags", &vec!["Must-read".to_string()]).unwrap();
        let tags: Option<Vec<String>> = take_slot(&mut ns, "allTags").unwrap();
        assert_eq!(tags, Some(vec!["Must-read".to_string()]));
    }
}
