//! The description an entity kind supplies to become a repository.
//!
//! Repositories know nothing about pilots or flights. They read the table
//! name, the ordered column descriptors and the row mappers from these traits
//! and derive every statement from them.

use catalog::ColumnDescriptor;
use common::Tabular;
use rusqlite::Row;
use types::EntityKind;

/// A row of a table keyed by a store-assigned surrogate id.
///
/// The first descriptor returned by [`Entity::columns`] is the identity
/// column; the remaining ones are listed in storage order and the struct
/// fields follow the same order, so [`Entity::from_row`] can map positionally.
pub trait Entity: Tabular + Sized {
    const KIND: EntityKind;
    /// `CREATE TABLE IF NOT EXISTS` statement for the table.
    const DDL: &'static str;

    /// Shape returned by reads. Tables without display joins use `Self`.
    type View: Tabular;

    fn columns() -> Vec<(&'static str, ColumnDescriptor)>;

    /// Maps a row whose columns follow [`Entity::columns`].
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// `SELECT … FROM …` (no `WHERE`) producing display rows. `None` reads
    /// the table's own columns.
    fn view_query() -> Option<&'static str> {
        None
    }

    fn view_from_row(row: &Row<'_>) -> rusqlite::Result<Self::View>;
}

/// A flight association row keyed by `(flight_id, member_id)`.
///
/// Descriptors list the flight key first, the member key second, then any
/// payload columns.
pub trait Junction: Tabular + Sized {
    const KIND: EntityKind;
    const DDL: &'static str;

    /// The entity on the far side of the association.
    type Member: Entity;

    fn columns() -> Vec<(&'static str, ColumnDescriptor)>;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Every column value in descriptor order.
    fn values(&self) -> Vec<i64>;
}

/// Converts an out-of-range stored value into a row mapping error.
pub(crate) fn conversion_error(
    idx: usize,
    message: impl Into<String>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Integer,
        Box::new(std::io::Error::other(message.into())),
    )
}
