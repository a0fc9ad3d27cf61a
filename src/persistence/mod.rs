//! Key-value persistence collaborator
//!
//! The game only sees string keys and string values. Scalars are stored as
//! plain strings, lists and structs as JSON. What sits behind the
//! trait (a JSON file, device storage, a test map) is not the game's concern.

pub mod keys;
pub mod store;

use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Read a plain string value through its `FromStr`
pub fn get_parsed<T: FromStr>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| StoreError::Parse {
                key: key.to_string(),
                value: raw,
            }),
        None => Ok(None),
    }
}

/// Read a JSON-encoded value
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn set_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_round_trip() {
        let mut store = MemoryStore::new();
        store.set("n", "42").unwrap();
        assert_eq!(get_parsed::<u64>(&store, "n").unwrap(), Some(42));
        assert_eq!(get_parsed::<u64>(&store, "missing").unwrap(), None);
    }

    #[test]
    fn test_bad_number_is_parse_error() {
        let mut store = MemoryStore::new();
        store.set("n", "forty").unwrap();
        let err = get_parsed::<u32>(&store, "n").unwrap_err();
        assert!(matches!(err, StoreError::Parse { ref key, .. } if key == "n"));
    }

    #[test]
    fn test_json_list() {
        let mut store = MemoryStore::new();
        set_json(&mut store, "list", &["a", "b"]).unwrap();
        assert_eq!(store.get("list").unwrap().as_deref(), Some(r#"["a","b"]"#));
        let list: Vec<String> = get_json(&store, "list").unwrap().unwrap();
        assert_eq!(list, vec!["a", "b"]);
    }
}
