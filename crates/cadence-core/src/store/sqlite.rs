//! SQLite-backed store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::task;

use super::{Store, StoreKey};
use crate::{
    db::Database,
    error::{CadenceError, Result},
};

/// Store persisted in a SQLite file.
///
/// Every call opens its own connection on the blocking thread pool, so the
/// store can be shared freely between tasks.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::FileSystem` if the parent directory cannot be
    /// created, and `CadenceError::Database` if the schema cannot be
    /// initialized.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CadenceError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), CadenceError>(())
        })
        .await
        .map_err(join_error)??;

        Ok(Self { db_path })
    }

    /// Default location following the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/cadence/cadence.db`.
    pub fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("cadence")
            .place_data_file("cadence.db")
            .map_err(|e| CadenceError::XdgDirectory(e.to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }
}

fn join_error(e: task::JoinError) -> CadenceError {
    CadenceError::Configuration {
        message: format!("Task join error: {e}"),
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn load(&self, key: StoreKey) -> Result<Option<String>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_value(key.as_str())
        })
        .await
        .map_err(join_error)?
    }

    async fn save(&self, key: StoreKey, value: &str) -> Result<()> {
        let db_path = self.db_path.clone();
        let value = value.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.put_value(key.as_str(), &value)
        })
        .await
        .map_err(join_error)?
    }

    async fn remove(&self, key: StoreKey) -> Result<()> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_value(key.as_str()).map(|_| ())
        })
        .await
        .map_err(join_error)?
    }
}
