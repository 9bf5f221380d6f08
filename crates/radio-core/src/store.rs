//! Persistent history of generated names.
//!
//! One SQLite table, one column:
//! ```text
//! radio_names(name TEXT UNIQUE)
//! ```
//! The UNIQUE constraint is the only duplicate check. Callers never look a
//! name up before inserting it; a repeat surfaces as [`StoreError::Duplicate`].

use std::path::{Path, PathBuf};

use rusqlite::{ffi, Connection};

use crate::error::StoreError;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS radio_names (name TEXT UNIQUE)";

/// Read/append access to past names.
pub trait NameStore {
    fn list_all(&self) -> Result<Vec<String>, StoreError>;
    fn insert(&self, name: &str) -> Result<(), StoreError>;
}

impl<T: NameStore + ?Sized> NameStore for &T {
    fn list_all(&self) -> Result<Vec<String>, StoreError> {
        (**self).list_all()
    }

    fn insert(&self, name: &str) -> Result<(), StoreError> {
        (**self).insert(name)
    }
}

/// File-backed store. Every call opens its own connection and drops it
/// before returning, on success and on error alike.
#[derive(Debug, Clone)]
pub struct SqliteNameStore {
    path: PathBuf,
}

impl SqliteNameStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Create the `radio_names` table if it is missing. Idempotent.
    pub fn init(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = self.connect()?;
        conn.execute_batch(CREATE_TABLE)?;
        tracing::debug!(path = %self.path.display(), "radio_names table ready");
        Ok(())
    }
}

impl NameStore for SqliteNameStore {
    /// All stored names in rowid order.
    fn list_all(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT name FROM radio_names ORDER BY rowid")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn insert(&self, name: &str) -> Result<(), StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        match tx.execute("INSERT INTO radio_names (name) VALUES (?1)", [name]) {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                return Err(StoreError::Duplicate(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
        tx.commit()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_tmp() -> (TempDir, SqliteNameStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteNameStore::new(dir.path().join("radio_names.db"));
        store.init().unwrap();
        (dir, store)
    }

    #[test]
    fn empty_store_lists_nothing() {
        let (_dir, store) = open_tmp();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn insert_then_list_contains_name_once() {
        let (_dir, store) = open_tmp();
        store.insert("Sunset FM").unwrap();
        store.insert("Echo Drift").unwrap();

        let names = store.list_all().unwrap();
        assert_eq!(names.iter().filter(|n| *n == "Echo Drift").count(), 1);
        assert_eq!(names, vec!["Sunset FM", "Echo Drift"]);
    }

    #[test]
    fn duplicate_insert_fails_and_keeps_one_row() {
        let (_dir, store) = open_tmp();
        store.insert("Night Wave").unwrap();

        let err = store.insert("Night Wave").unwrap_err();
        assert!(
            matches!(err, StoreError::Duplicate(ref n) if n == "Night Wave"),
            "got {err:?}"
        );
        assert_eq!(store.list_all().unwrap(), vec!["Night Wave"]);
    }

    #[test]
    fn other_constraint_failures_are_not_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("radio_names.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE radio_names (name TEXT UNIQUE CHECK (name <> ''))")
            .unwrap();
        let store = SqliteNameStore::new(&path);
        store.init().unwrap();

        assert!(matches!(store.insert(""), Err(StoreError::Sqlite(_))));
        store.insert("Sunset FM").unwrap();
        assert!(matches!(
            store.insert("Sunset FM"),
            Err(StoreError::Duplicate(_))
        ));
    }

    #[test]
    fn names_differing_in_case_are_distinct() {
        let (_dir, store) = open_tmp();
        store.insert("night wave").unwrap();
        store.insert("Night Wave").unwrap();
        assert_eq!(store.list_all().unwrap().len(), 2);
    }

    #[test]
    fn init_is_idempotent_and_keeps_rows() {
        let (_dir, store) = open_tmp();
        store.insert("Sunset FM").unwrap();
        store.init().unwrap();
        assert_eq!(store.list_all().unwrap(), vec!["Sunset FM"]);
    }

    #[test]
    fn init_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = SqliteNameStore::new(dir.path().join("data/nested/names.db"));
        store.init().unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn missing_table_is_sqlite_error() {
        let dir = TempDir::new().unwrap();
        let store = SqliteNameStore::new(dir.path().join("uninitialised.db"));

        assert!(matches!(store.list_all(), Err(StoreError::Sqlite(_))));
        assert!(matches!(store.insert("x"), Err(StoreError::Sqlite(_))));
    }

    #[test]
    fn unopenable_path_is_error() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened as a database file.
        let store = SqliteNameStore::new(dir.path());
        assert!(store.list_all().is_err());
    }
}
