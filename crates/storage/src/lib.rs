//! The single SQLite connection every repository shares.
//!
//! All helpers run one statement to completion and collect its rows before
//! returning, so no cursor outlives a call and multi-step operations are plain
//! sequential calls on the same handle.


use common::{Config, DbError, DbResult};
use rusqlite::{Connection, OptionalExtension, Params, Row};
use std::path::Path;
use tracing::{debug, info};

/// Owns the connection. Dropping the store closes it.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file named by the config.
    pub fn open(config: &Config) -> DbResult<Self> {
        let conn = Connection::open(&config.db_path)
            .map_err(|e| storage_error("connect to the database", e))?;
        info!(path = %config.db_path.display(), "opened airline database");
        Self::configure(conn, config.foreign_keys)
    }

    /// Open a database file with default settings.
    pub fn open_path(path: &Path) -> DbResult<Self> {
        let config = Config::builder().db_path(path.to_path_buf()).build();
        Self::open(&config)
    }

    /// Private in-memory database with foreign keys enforced.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| storage_error("open an in-memory database", e))?;
        Self::configure(conn, true)
    }

    fn configure(conn: Connection, foreign_keys: bool) -> DbResult<Self> {
        // Bundled builds may default to ON.
        let pragma = if foreign_keys {
            "PRAGMA foreign_keys = ON;"
        } else {
            "PRAGMA foreign_keys = OFF;"
        };
        conn.execute_batch(pragma)
            .map_err(|e| storage_error("set foreign key enforcement", e))?;
        Ok(Self { conn })
    }

    /// Close the connection explicitly, surfacing any error the implicit drop
    /// would swallow.
    pub fn close(self) -> DbResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| storage_error("close the database", e))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Whether `PRAGMA foreign_keys` is active on this connection.
    pub fn foreign_keys_enabled(&self) -> DbResult<bool> {
        self.query_one(
            "PRAGMA foreign_keys;",
            [],
            "read the foreign key setting",
            |row| row.get::<_, i64>(0),
        )
        .map(|flag| flag == 1)
    }

    /// Run one or more statements without parameters.
    pub fn execute_batch(&self, sql: &str, action: &str) -> DbResult<()> {
        debug!(sql = sql.trim(), "execute batch");
        self.conn
            .execute_batch(sql)
            .map_err(|e| storage_error(action, e))
    }

    /// Run a single statement and return the number of affected rows.
    pub fn execute<P: Params>(&self, sql: &str, params: P, action: &str) -> DbResult<usize> {
        debug!(sql = sql.trim(), "execute");
        let mut stmt = self
            .conn
            .prepare_cached(sql)
            .map_err(|e| storage_error(action, e))?;
        stmt.execute(params).map_err(|e| storage_error(action, e))
    }

    /// Run a query and map every returned row.
    pub fn query_rows<T, P, F>(&self, sql: &str, params: P, action: &str, map: F) -> DbResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        debug!(sql = sql.trim(), "query");
        let mut stmt = self
            .conn
            .prepare_cached(sql)
            .map_err(|e| storage_error(action, e))?;
        let rows = stmt
            .query_map(params, map)
            .map_err(|e| storage_error(action, e))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| storage_error(action, e))
    }

    /// Run a query that must produce exactly one row. Zero rows is a storage
    /// error: callers are expected to have checked existence first.
    pub fn query_one<T, P, F>(&self, sql: &str, params: P, action: &str, map: F) -> DbResult<T>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        debug!(sql = sql.trim(), "query one");
        let mut stmt = self
            .conn
            .prepare_cached(sql)
            .map_err(|e| storage_error(action, e))?;
        stmt.query_row(params, map)
            .map_err(|e| storage_error(action, e))
    }

    /// Run a query that produces at most one row.
    pub fn query_optional<T, P, F>(
        &self,
        sql: &str,
        params: P,
        action: &str,
        map: F,
    ) -> DbResult<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        debug!(sql = sql.trim(), "query optional");
        let mut stmt = self
            .conn
            .prepare_cached(sql)
            .map_err(|e| storage_error(action, e))?;
        stmt.query_row(params, map)
            .optional()
            .map_err(|e| storage_error(action, e))
    }

    /// Evaluate `SELECT EXISTS(...)`-style statements.
    pub fn exists<P: Params>(&self, sql: &str, params: P, action: &str) -> DbResult<bool> {
        self.query_one(sql, params, action, |row| row.get::<_, i64>(0))
            .map(|flag| flag != 0)
    }

    /// Whether a table with this name is present in the schema.
    pub fn table_exists(&self, table: &str) -> DbResult<bool> {
        self.exists(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table],
            "inspect the schema",
        )
    }
}

fn storage_error(action: &str, err: rusqlite::Error) -> DbError {
    DbError::Storage(format!("unable to {action}: {err}"))
}
