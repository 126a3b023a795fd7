//! Isolated stores for tests.
//!
//! Each context owns its own SQLite database, either a file inside a fresh
//! temporary directory or a private in-memory database, and drops it with
//! the context.

use airline::Airline;
use common::{Config, DbResult};
use std::path::{Path, PathBuf};
use storage::Store;
use tempfile::TempDir;

/// A store with isolated backing storage.
///
/// # Example
///
/// ```
/// use testsupport::prelude::*;
///
/// let ctx = TestContext::new().unwrap();
/// let airline = ctx.airline().unwrap();
/// assert!(airline.pilots.get_all().unwrap().is_empty());
/// assert!(ctx.db_path().unwrap().exists());
/// ```
pub struct TestContext {
    store: Store,
    db_path: Option<PathBuf>,
    _temp_dir: Option<TempDir>,
}

impl TestContext {
    /// File-backed store in a fresh temporary directory.
    pub fn new() -> DbResult<Self> {
        let temp_dir = tempfile::tempdir()?;
        Self::with_dir(temp_dir)
    }

    /// File-backed store in the given directory. The directory is removed
    /// when the context drops.
    pub fn with_dir(temp_dir: TempDir) -> DbResult<Self> {
        let db_path = temp_dir.path().join("airline.db");
        let config = Config::builder().db_path(db_path.clone()).build();
        let store = Store::open(&config)?;
        Ok(Self {
            store,
            db_path: Some(db_path),
            _temp_dir: Some(temp_dir),
        })
    }

    /// Private in-memory store.
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self {
            store: Store::open_in_memory()?,
            db_path: None,
            _temp_dir: None,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Database file, if the context is file-backed.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Repositories over this context's store with every table created.
    pub fn airline(&self) -> DbResult<Airline<'_>> {
        let airline = Airline::new(&self.store)?;
        airline.create_tables()?;
        Ok(airline)
    }
}
