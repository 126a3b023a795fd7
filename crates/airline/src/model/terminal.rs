use catalog::{ColumnDescriptor, Validator};
use common::Tabular;
use rusqlite::Row;
use serde::Serialize;
use types::{EntityKind, RowId};

use crate::entity::Entity;

/// Stored shape of a terminal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Terminal {
    pub terminal_id: RowId,
    pub airport_id: RowId,
    pub name: String,
}

/// A terminal together with the airport it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TerminalView {
    pub terminal_id: RowId,
    pub terminal_name: String,
    pub airport_id: RowId,
    pub airport_name: String,
    pub airport_address: String,
}

impl Tabular for Terminal {
    fn headers() -> Vec<&'static str> {
        vec!["Terminal ID", "Airport ID", "Name"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.terminal_id.to_string(),
            self.airport_id.to_string(),
            self.name.clone(),
        ]
    }
}

impl Tabular for TerminalView {
    fn headers() -> Vec<&'static str> {
        vec![
            "Terminal ID",
            "Terminal Name",
            "Airport ID",
            "Airport Name",
            "Airport Address",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.terminal_id.to_string(),
            self.terminal_name.clone(),
            self.airport_id.to_string(),
            self.airport_name.clone(),
            self.airport_address.clone(),
        ]
    }
}

impl Entity for Terminal {
    const KIND: EntityKind = EntityKind::Terminal;
    const DDL: &'static str = "
        CREATE TABLE IF NOT EXISTS terminals (
            terminal_id INTEGER PRIMARY KEY,
            airport_id INTEGER NOT NULL,
            name VARCHAR(100) NOT NULL,

            FOREIGN KEY (airport_id) REFERENCES airports (airport_id) ON DELETE CASCADE
        );
    ";

    type View = TerminalView;

    fn columns() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![
            (
                "Terminal ID",
                ColumnDescriptor::builder()
                    .name("terminals.terminal_id")
                    .validator(Validator::ExistingId(EntityKind::Terminal))
                    .message("A terminal's ID must be a non negative integer and must exist in the database")
                    .build(),
            ),
            (
                "Airport ID",
                ColumnDescriptor::builder()
                    .name("terminals.airport_id")
                    .settable(true)
                    .validator(Validator::ExistingId(EntityKind::Airport))
                    .message("A terminal's airport ID must be a non negative integer and must exist in the database")
                    .insert_prompt("What's the ID of the airport where this terminal is located?")
                    .update_prompt("What's the ID of the new airport where this terminal is located?")
                    .build(),
            ),
            (
                "Name",
                ColumnDescriptor::builder()
                    .name("terminals.name")
                    .settable(true)
                    .validator(Validator::length(1, 100))
                    .message("A terminal's name must be between 1 and 100 characters inclusive")
                    .insert_prompt("What's the name of this terminal?")
                    .update_prompt("What's the new name of this terminal?")
                    .build(),
            ),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            terminal_id: row.get(0)?,
            airport_id: row.get(1)?,
            name: row.get(2)?,
        })
    }

    fn view_query() -> Option<&'static str> {
        Some(
            "SELECT terminals.terminal_id, terminals.name, airports.airport_id, airports.name, airports.address
            FROM terminals
            JOIN airports ON terminals.airport_id = airports.airport_id",
        )
    }

    fn view_from_row(row: &Row<'_>) -> rusqlite::Result<Self::View> {
        Ok(TerminalView {
            terminal_id: row.get(0)?,
            terminal_name: row.get(1)?,
            airport_id: row.get(2)?,
            airport_name: row.get(3)?,
            airport_address: row.get(4)?,
        })
    }
}
