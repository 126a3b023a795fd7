use catalog::{ColumnDescriptor, Validator};
use common::Tabular;
use rusqlite::Row;
use serde::Serialize;
use types::{AircraftType, EntityKind, RowId};

use crate::entity::{Entity, conversion_error};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Aircraft {
    pub aircraft_id: RowId,
    pub name: String,
    pub kind: AircraftType,
    pub max_passengers: i64,
}

impl Tabular for Aircraft {
    fn headers() -> Vec<&'static str> {
        vec!["Aircraft ID", "Name", "Type", "Max Passengers"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.aircraft_id.to_string(),
            self.name.clone(),
            self.kind.to_string(),
            self.max_passengers.to_string(),
        ]
    }
}

impl Entity for Aircraft {
    const KIND: EntityKind = EntityKind::Aircraft;
    const DDL: &'static str = "
        CREATE TABLE IF NOT EXISTS aircrafts (
            aircraft_id INTEGER PRIMARY KEY,
            name VARCHAR(50) NOT NULL,
            type INTEGER NOT NULL CHECK (type IN (1, 2)),
            max_passengers INTEGER NOT NULL CHECK (max_passengers >= 1)
        );
    ";

    type View = Aircraft;

    fn columns() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![
            (
                "Aircraft ID",
                ColumnDescriptor::builder()
                    .name("aircrafts.aircraft_id")
                    .validator(Validator::ExistingId(EntityKind::Aircraft))
                    .message("An aircraft's ID must be a non negative integer and must exist in the database")
                    .build(),
            ),
            (
                "Name",
                ColumnDescriptor::builder()
                    .name("aircrafts.name")
                    .settable(true)
                    .validator(Validator::length(1, 50))
                    .message("An aircraft's name must be between 1 and 50 characters inclusive")
                    .insert_prompt("What's the name of this aircraft?")
                    .update_prompt("What's the new name of this aircraft?")
                    .build(),
            ),
            (
                "Type",
                ColumnDescriptor::builder()
                    .name("aircrafts.type")
                    .settable(true)
                    .validator(Validator::OneOf(&["1", "2"]))
                    .message("An aircraft's type must be either 1 for plane or 2 for helicopter")
                    .insert_prompt("What type of aircraft is this?\n    1. Plane\n    2. Helicopter")
                    .update_prompt("What's the new type of this aircraft?\n    1. Plane\n    2. Helicopter")
                    .build(),
            ),
            (
                "Max Passengers",
                ColumnDescriptor::builder()
                    .name("aircrafts.max_passengers")
                    .settable(true)
                    .validator(Validator::AtLeast(1))
                    .message("An aircraft's maximum number of passengers must be a positive integer")
                    .insert_prompt("What's the maximum number of passengers for this aircraft?")
                    .update_prompt("What's the new maximum number of passengers for this aircraft?")
                    .build(),
            ),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let code: i64 = row.get(2)?;
        let kind = AircraftType::from_code(code)
            .ok_or_else(|| conversion_error(2, format!("unknown aircraft type {code}")))?;
        Ok(Self {
            aircraft_id: row.get(0)?,
            name: row.get(1)?,
            kind,
            max_passengers: row.get(3)?,
        })
    }

    fn view_from_row(row: &Row<'_>) -> rusqlite::Result<Self::View> {
        Self::from_row(row)
    }
}
