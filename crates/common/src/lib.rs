
pub mod pretty;

use serde::{Deserialize, Serialize};
use std::{io, path::PathBuf};
use thiserror::Error;

/// Anything that can be shown as one row of a table: a fixed header list and
/// the matching cells rendered as text.
pub trait Tabular {
    fn headers() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

/// Rectangular result set carrying column labels and text rows.
/// This is the only shape the display layer consumes.
/// Examples:
/// - `let rb = RecordBatch { columns: vec!["Pilot ID".into()], rows: vec![vec!["1".into()]] };`
/// - `let rb = RecordBatch::from_records(&pilots);`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBatch {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecordBatch {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a batch from typed records, using the record type's headers.
    pub fn from_records<T: Tabular>(records: &[T]) -> Self {
        Self {
            columns: T::headers().into_iter().map(String::from).collect(),
            rows: records.iter().map(Tabular::cells).collect(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Canonical error type shared across the airline crates.
#[derive(Error, Debug)]
pub enum DbError {
    /// Raw input failed a column predicate. Recovered by the caller.
    #[error("validation: {0}")]
    Validation(String),
    /// An id the operation depends on does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// A duplicate assignment or an occupied seat.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Unknown column label or malformed value list.
    #[error("catalog: {0}")]
    Catalog(String),
    /// Statement execution failed against the store.
    #[error("storage: {0}")]
    Storage(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl DbError {
    /// Storage failures end the session; everything else is reported and the
    /// caller carries on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DbError::Storage(_) | DbError::Io(_))
    }
}

/// Result alias that carries a `DbError`.
pub type DbResult<T> = Result<T, DbError>;

/// Runtime configuration for the airline store and its display layer.
///
/// # Example
/// ```
/// use common::Config;
/// use std::path::PathBuf;
///
/// let config = Config::builder()
///     .db_path(PathBuf::from("./ops.db"))
///     .page_size(20)
///     .build();
/// assert!(config.foreign_keys);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, bon::Builder)]
pub struct Config {
    /// SQLite database file.
    #[builder(default = PathBuf::from("airline.db"))]
    pub db_path: PathBuf,
    /// Enforce foreign keys on the connection. Cascading deletes rely on it.
    #[builder(default = true)]
    pub foreign_keys: bool,
    /// Rows shown per page when paginating result tables.
    #[builder(default = 10)]
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("airline.db"),
            foreign_keys: true,
            page_size: 10,
        }
    }
}

/// Convenient re-exports for downstream crates.
pub mod prelude {
    pub use crate::{Config, DbError, DbResult, RecordBatch, Tabular};
    pub use types::{AircraftType, EntityKind, RowId, SeatNumber};
}
