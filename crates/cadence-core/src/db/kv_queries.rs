//! Key/value queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_VALUE_SQL: &str = "SELECT value FROM kv WHERE key = ?1";
const UPSERT_VALUE_SQL: &str = "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_VALUE_SQL: &str = "DELETE FROM kv WHERE key = ?1";

impl super::Database {
    /// Reads the raw value stored under `key`.
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_VALUE_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read stored value")
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub fn put_value(&mut self, key: &str, value: &str) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(UPSERT_VALUE_SQL, params![key, value, Timestamp::now().to_string()])
            .db_context("Failed to write stored value")?;

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Removes `key`. Returns whether a row was deleted.
    pub fn delete_value(&mut self, key: &str) -> Result<bool> {
        let removed = self
            .connection
            .execute(DELETE_VALUE_SQL, params![key])
            .db_context("Failed to delete stored value")?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Database;

    #[test]
    fn test_put_get_replace_delete() {
        let mut db = Database::in_memory().unwrap();
        assert_eq!(db.get_value("k").unwrap(), None);

        db.put_value("k", "1").unwrap();
        db.put_value("k", "2").unwrap();
        assert_eq!(db.get_value("k").unwrap().as_deref(), Some("2"));

        assert!(db.delete_value("k").unwrap());
        assert!(!db.delete_value("k").unwrap());
        assert_eq!(db.get_value("k").unwrap(), None);
    }
}
