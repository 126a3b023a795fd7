//! Column metadata for the airline tables.
//!
//! Each repository is built from an ordered list of `(label, ColumnDescriptor)`
//! pairs. The label is what users see and what callers address columns by;
//! the descriptor carries the storage name, mutability, predicate and prompts.

pub mod validate;

use ahash::RandomState;
use common::{DbError, DbResult};
use hashbrown::HashMap;
use types::EntityKind;

pub use validate::{Lookup, Validator};

type Map<K, V> = HashMap<K, V, RandomState>;

/// Static metadata for one attribute of an entity.
///
/// # Example
/// ```
/// use catalog::{ColumnDescriptor, Validator};
///
/// let name = ColumnDescriptor::builder()
///     .name("airports.name")
///     .settable(true)
///     .validator(Validator::length(1, 100))
///     .message("An airport's name must be between 1 and 100 characters inclusive")
///     .insert_prompt("What's the name of this airport?")
///     .build();
/// assert_eq!(name.bare_name(), "name");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, bon::Builder)]
pub struct ColumnDescriptor {
    /// Table-qualified storage name, e.g. `flights.aircraft_id`.
    pub name: &'static str,
    /// Whether users may supply the value on insert and change it on update.
    #[builder(default)]
    pub settable: bool,
    pub validator: Validator,
    /// Shown when the predicate rejects input.
    pub message: &'static str,
    pub insert_prompt: Option<&'static str>,
    pub update_prompt: Option<&'static str>,
}

impl ColumnDescriptor {
    /// Column name without its table qualifier, for `INSERT` lists and `SET`.
    pub fn bare_name(&self) -> &'static str {
        self.name.rsplit('.').next().unwrap_or(self.name)
    }

    /// Checks raw input against the predicate, mapping a rejection to
    /// `DbError::Validation` carrying the descriptor's message.
    pub fn validate(&self, raw: &str, lookup: &dyn Lookup) -> DbResult<()> {
        if self.validator.accepts(raw, lookup)? {
            Ok(())
        } else {
            Err(DbError::Validation(format!("{}.", self.message)))
        }
    }
}

/// Ordered, immutable column layout for one table.
#[derive(Clone, Debug)]
pub struct TableSchema {
    kind: EntityKind,
    columns: Vec<(&'static str, ColumnDescriptor)>,
    label_index: Map<&'static str, usize>,
}

impl TableSchema {
    pub fn try_new(
        kind: EntityKind,
        columns: Vec<(&'static str, ColumnDescriptor)>,
    ) -> DbResult<Self> {
        if columns.is_empty() {
            return Err(DbError::Catalog(format!(
                "table '{kind}' must contain at least one column"
            )));
        }
        let mut label_index = Map::default();
        for (idx, (label, _)) in columns.iter().enumerate() {
            if label_index.insert(*label, idx).is_some() {
                return Err(DbError::Catalog(format!(
                    "duplicate column '{label}' found while building '{kind}'"
                )));
            }
        }
        Ok(Self {
            kind,
            columns,
            label_index,
        })
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn table_name(&self) -> &'static str {
        self.kind.table_name()
    }

    /// Looks a column up by its label.
    pub fn column(&self, label: &str) -> DbResult<&ColumnDescriptor> {
        self.label_index
            .get(label)
            .and_then(|idx| self.columns.get(*idx))
            .map(|(_, column)| column)
            .ok_or_else(|| {
                DbError::Catalog(format!("unknown column '{label}' on table '{}'", self.kind))
            })
    }

    /// Like [`TableSchema::column`] but rejects identity and junction-member
    /// columns.
    pub fn settable_column(&self, label: &str) -> DbResult<&ColumnDescriptor> {
        let column = self.column(label)?;
        if !column.settable {
            return Err(DbError::Catalog(format!(
                "column '{label}' on table '{}' cannot be set",
                self.kind
            )));
        }
        Ok(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&'static str, &ColumnDescriptor)> {
        self.columns.iter().map(|(label, column)| (*label, column))
    }

    pub fn settable_columns(&self) -> impl Iterator<Item = (&'static str, &ColumnDescriptor)> {
        self.columns().filter(|(_, column)| column.settable)
    }

    pub fn settable_count(&self) -> usize {
        self.settable_columns().count()
    }

    /// Labels offered to a user picking a column, optionally settable-only.
    pub fn column_choices(&self, all_columns: bool) -> Vec<&'static str> {
        self.columns()
            .filter(|(_, column)| all_columns || column.settable)
            .map(|(label, _)| label)
            .collect()
    }

    pub fn validate(&self, label: &str, raw: &str, lookup: &dyn Lookup) -> DbResult<()> {
        self.column(label)?.validate(raw, lookup)
    }
}
