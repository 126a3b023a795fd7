use catalog::{ColumnDescriptor, Validator};
use common::Tabular;
use rusqlite::Row;
use serde::Serialize;
use types::{EntityKind, RowId};

use crate::entity::Entity;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Airport {
    pub airport_id: RowId,
    pub name: String,
    pub address: String,
}

impl Tabular for Airport {
    fn headers() -> Vec<&'static str> {
        vec!["Airport ID", "Name", "Address"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.airport_id.to_string(),
            self.name.clone(),
            self.address.clone(),
        ]
    }
}

impl Entity for Airport {
    const KIND: EntityKind = EntityKind::Airport;
    const DDL: &'static str = "
        CREATE TABLE IF NOT EXISTS airports (
            airport_id INTEGER PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            address TEXT NOT NULL
        );
    ";

    type View = Airport;

    fn columns() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![
            (
                "Airport ID",
                ColumnDescriptor::builder()
                    .name("airports.airport_id")
                    .validator(Validator::ExistingId(EntityKind::Airport))
                    .message("An airport's ID must be a non negative integer and must exist in the database")
                    .build(),
            ),
            (
                "Name",
                ColumnDescriptor::builder()
                    .name("airports.name")
                    .settable(true)
                    .validator(Validator::length(1, 100))
                    .message("An airport's name must be between 1 and 100 characters inclusive")
                    .insert_prompt("What's the name of this airport?")
                    .update_prompt("What's the new name of this airport?")
                    .build(),
            ),
            (
                "Address",
                ColumnDescriptor::builder()
                    .name("airports.address")
                    .settable(true)
                    .validator(Validator::min_length(2))
                    .message("An airport's address must be at least 2 characters")
                    .insert_prompt("What's the address of this airport?")
                    .update_prompt("What's the new address of this airport?")
                    .build(),
            ),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            airport_id: row.get(0)?,
            name: row.get(1)?,
            address: row.get(2)?,
        })
    }

    fn view_from_row(row: &Row<'_>) -> rusqlite::Result<Self::View> {
        Self::from_row(row)
    }
}
