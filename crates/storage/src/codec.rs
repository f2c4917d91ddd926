//! JSON encoding of values kept in the key-value store.
//!
//! Parsing is explicit: `parse` reports malformed documents, and the `load_*`
//! helpers decide to fall back to a default, logging the failure at debug level.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::repository::{KeyValueStore, StorageError};

/// A persisted document could not be decoded.
#[derive(Debug, Error)]
#[error("malformed JSON: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Decode a raw persisted document.
///
/// # Errors
///
/// Returns `ParseError` if `raw` is not valid JSON for `T`.
pub fn parse<T: DeserializeOwned>(raw: &str) -> Result<T, ParseError> {
    Ok(serde_json::from_str(raw)?)
}

/// Encode a value for storage.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the value cannot be encoded.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Read and decode `key`; `Ok(None)` when the key is absent.
///
/// # Errors
///
/// Returns `StorageError` on backend failures. Decode failures are returned as
/// `Ok(Err(_))` so callers can pick their own fallback.
pub async fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<Result<T, ParseError>>, StorageError> {
    Ok(store.get(key).await?.map(|raw| parse(&raw)))
}

/// Read and decode `key`, treating a missing or malformed value as `T::default()`.
///
/// # Errors
///
/// Returns `StorageError` only on backend failures.
pub async fn load_or_default<T: DeserializeOwned + Default>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<T, StorageError> {
    match load(store, key).await? {
        None => Ok(T::default()),
        Some(Ok(value)) => Ok(value),
        Some(Err(err)) => {
            debug!(key, error = %err, "discarding malformed stored value");
            Ok(T::default())
        }
    }
}

/// Encode `value` and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the write fails.
pub async fn save<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = encode(value)?;
    store.set(key, &raw).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStore;

    #[test]
    fn parse_reports_malformed_json() {
        assert!(parse::<Vec<u32>>("[1,2").is_err());
        assert!(parse::<Vec<u32>>("{\"a\":1}").is_err());
        assert_eq!(parse::<Vec<u32>>("[1,2]").unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn load_or_default_swallows_malformed_values() {
        let kv = InMemoryStore::new();
        kv.set("list", "not json").await.unwrap();
        let value: Vec<u32> = load_or_default(&kv, "list").await.unwrap();
        assert!(value.is_empty());

        let missing: Vec<u32> = load_or_default(&kv, "missing").await.unwrap();
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn load_exposes_parse_failures() {
        let kv = InMemoryStore::new();
        kv.set("n", "oops").await.unwrap();
        let loaded = load::<u32>(&kv, "n").await.unwrap();
        assert!(matches!(loaded, Some(Err(_))));
        assert!(load::<u32>(&kv, "absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_then_load() {
        let kv = InMemoryStore::new();
        save(&kv, "nums", &[3_u32, 4]).await.unwrap();
        let value: Vec<u32> = load_or_default(&kv, "nums").await.unwrap();
        assert_eq!(value, vec![3, 4]);
    }
}
