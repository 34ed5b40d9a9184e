//! Persistent key/value store for session records.
//!
//! The controller never touches storage directly; it goes through an
//! injected [`Store`]. Values are JSON documents keyed by [`StoreKey`].
//!
//! Key names carry a version suffix. Changing the shape of a persisted
//! record means introducing a new key name: old rows are orphaned, never
//! migrated.
//!
//! Two implementations are provided:
//!
//! - [`SqliteStore`]: durable, one SQLite file per user
//! - [`MemoryStore`]: process-local, for tests and throwaway sessions

use std::fmt;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Logical records kept by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// `{ "username": .. }`
    Identity,
    /// Plan history, most recent first
    History,
    /// Last form values
    FormMemo,
    /// Number of generations consumed
    Usage,
}

impl StoreKey {
    /// Every key, in a stable order.
    pub const ALL: [StoreKey; 4] = [
        StoreKey::Identity,
        StoreKey::History,
        StoreKey::FormMemo,
        StoreKey::Usage,
    ];

    /// Versioned storage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Identity => "cadence_user_v2",
            StoreKey::History => "cadence_history_v2",
            StoreKey::FormMemo => "cadence_form_memo_v1",
            StoreKey::Usage => "cadence_usage_v1",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable mapping from [`StoreKey`] to a JSON string. Last writer wins.
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns the raw value under `key`, if any.
    async fn load(&self, key: StoreKey) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing what was there.
    async fn save(&self, key: StoreKey, value: &str) -> Result<()>;

    /// Deletes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: StoreKey) -> Result<()>;
}

/// Typed JSON access on top of any [`Store`].
#[async_trait]
pub trait StoreExt: Store {
    /// Loads and decodes `key`.
    ///
    /// A stored value that fails to decode is reported as
    /// [`crate::CadenceError::Serialization`]; callers decide whether that
    /// means "absent".
    async fn load_json<T>(&self, key: StoreKey) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.load(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encodes and saves `value` under `key`.
    async fn save_json<T>(&self, key: StoreKey, value: &T) -> Result<()>
    where
        T: Serialize + Sync + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.save(key, &raw).await
    }
}

impl<S: Store + ?Sized> StoreExt for S {}
