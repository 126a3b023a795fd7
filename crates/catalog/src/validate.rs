//! Column predicates over raw text input.
//!
//! Foreign-key predicates need to ask sibling repositories whether an id
//! exists. They do so through [`Lookup`], a read-only handle passed in at
//! validation time, so descriptors never hold references to other
//! repositories.

use chrono::{NaiveDate, NaiveDateTime};
use common::DbResult;
use types::{EntityKind, RowId};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_LEN: usize = 10;
const DATE_TIME_LEN: usize = 19;

/// Read-only existence queries over the single-id tables.
pub trait Lookup {
    fn exists(&self, kind: EntityKind, id: RowId) -> DbResult<bool>;
}

/// A predicate over the raw text a user typed for one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Validator {
    /// Non-negative integer naming an existing row of the given table.
    ExistingId(EntityKind),
    /// Character count within `min..=max` (`max` unbounded when `None`).
    Length { min: usize, max: Option<usize> },
    /// `YYYY-MM-DD`, calendar-checked.
    Date,
    /// `YYYY-MM-DD HH:MM:SS`, calendar- and clock-checked.
    DateTime,
    /// Exactly one of the listed literals.
    OneOf(&'static [&'static str]),
    /// Non-negative integer no smaller than the bound.
    AtLeast(i64),
}

impl Validator {
    pub fn length(min: usize, max: usize) -> Self {
        Validator::Length {
            min,
            max: Some(max),
        }
    }

    pub fn min_length(min: usize) -> Self {
        Validator::Length { min, max: None }
    }

    /// Returns whether `raw` satisfies the predicate. Errors only when an
    /// existence lookup fails against the store.
    pub fn accepts(&self, raw: &str, lookup: &dyn Lookup) -> DbResult<bool> {
        match self {
            Validator::ExistingId(kind) => match parse_unsigned(raw) {
                Some(id) => lookup.exists(*kind, id),
                None => Ok(false),
            },
            Validator::Length { min, max } => {
                let len = raw.chars().count();
                Ok(len >= *min && max.is_none_or(|max| len <= max))
            }
            Validator::Date => Ok(is_valid_date(raw)),
            Validator::DateTime => Ok(is_valid_date_time(raw)),
            Validator::OneOf(options) => Ok(options.contains(&raw)),
            Validator::AtLeast(bound) => Ok(parse_unsigned(raw).is_some_and(|n| n >= *bound)),
        }
    }
}

/// Parses a string made only of ASCII digits. Signs, whitespace and values
/// that overflow `i64` are rejected.
pub fn parse_unsigned(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

pub fn is_valid_date(raw: &str) -> bool {
    raw.len() == DATE_LEN && NaiveDate::parse_from_str(raw, DATE_FORMAT).is_ok()
}

pub fn is_valid_date_time(raw: &str) -> bool {
    raw.len() == DATE_TIME_LEN && NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT).is_ok()
}
