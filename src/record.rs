//! Record - the shape every persisted row shares.
//!
//! A record lives in a named collection (a table in SQL, a key prefix in a
//! KV store) and is identified by a storage key. Rows with a composite
//! identity, such as awards keyed by `(learner, achievement)`, encode each key
//! field as `len:value` so that ids containing `:` cannot collide. Use
//! `#[derive(Record)]` rather than implementing by hand.

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be persisted by a store.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this record type (e.g. "achievements", "awards").
    const COLLECTION: &'static str;

    /// The unique storage key for this record within its collection.
    fn key(&self) -> String;

    /// The fully-qualified `COLLECTION:key` used by flat key-value stores.
    fn storage_key(&self) -> String {
        storage_key::<Self>(&self.key())
    }
}

/// Build a `COLLECTION:key` string for a record type without an instance.
pub fn storage_key<R: Record>(key: &str) -> String {
    format!("{}:{}", R::COLLECTION, key)
}

/// Encode a composite key. Each part is length-prefixed, so
/// `("ann:5", "gold")` and `("ann", "5:gold")` stay distinct.
pub fn composite_key<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|part| {
            let part = part.as_ref();
            format!("{}:{}", part.len(), part)
        })
        .collect::<Vec<_>>()
        .join(":")
}
