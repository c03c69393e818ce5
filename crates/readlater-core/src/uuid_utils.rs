//! UUID v7 utilities for item identifiers.
//!
//! Item ids are UUIDv7: the first 48 bits carry the Unix timestamp in
//! milliseconds, so ids are unique, never reused, and sort by creation time.

use uuid::Uuid;

/// Generate a new UUIDv7 identifier.
///
/// # Example
///
/// ```
/// use readlater_core::uuid_utils::new_v7;
///
/// let a = new_v7();
/// let b = new_v7();
/// assert_ne!(a, b);
/// ```
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

/// Extract the embedded millisecond timestamp from a UUIDv7.
///
/// Returns `None` for any other UUID version.
pub fn extract_timestamp_millis(id: &Uuid) -> Option<i64> {
    if id.get_version_num() != 7 {
        return None;
    }
    let bytes = id.as_bytes();
    let mut millis: i64 = 0;
    for b in &bytes[..6] {
        millis = (millis << 8) | i64::from(*b);
    }
    Some(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_v7_is_version_7() {
        assert_eq!(new_v7().get_version_num(), 7);
    }

    #[test]
    fn test_extract_timestamp_close_to_now() {
        let before = chrono::Utc::now().timestamp_millis();
        let id = new_v7();
        let after = chrono::Utc::now().timestamp_millis();

        let ts = extract_timestamp_millis(&id).unwrap();
        assert!(ts >= before && ts <= after);
    }

    #[test]
    fn test_extract_timestamp_rejects_v4() {
        assert_eq!(extract_timestamp_millis(&Uuid::new_v4()), None);
    }
}
