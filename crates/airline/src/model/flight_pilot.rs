use catalog::{ColumnDescriptor, Validator};
use common::Tabular;
use rusqlite::Row;
use serde::Serialize;
use types::{EntityKind, RowId};

use crate::entity::Junction;
use crate::model::Pilot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FlightPilot {
    pub flight_id: RowId,
    pub pilot_id: RowId,
}

impl Tabular for FlightPilot {
    fn headers() -> Vec<&'static str> {
        vec!["Flight ID", "Pilot ID"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.flight_id.to_string(), self.pilot_id.to_string()]
    }
}

impl Junction for FlightPilot {
    const KIND: EntityKind = EntityKind::FlightPilot;
    const DDL: &'static str = "
        CREATE TABLE IF NOT EXISTS flight_pilots (
            flight_id INTEGER NOT NULL,
            pilot_id INTEGER NOT NULL,

            PRIMARY KEY (flight_id, pilot_id),
            FOREIGN KEY (flight_id) REFERENCES flights (flight_id) ON DELETE CASCADE,
            FOREIGN KEY (pilot_id) REFERENCES pilots (pilot_id) ON DELETE CASCADE
        );
    ";

    type Member = Pilot;

    fn columns() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![
            (
                "Flight ID",
                ColumnDescriptor::builder()
                    .name("flight_pilots.flight_id")
                    .validator(Validator::ExistingId(EntityKind::Flight))
                    .message("A flight's ID must be a non negative integer and must exist in the database")
                    .insert_prompt("What's the ID of the flight you want to add a pilot to?")
                    .build(),
            ),
            (
                "Pilot ID",
                ColumnDescriptor::builder()
                    .name("flight_pilots.pilot_id")
                    .validator(Validator::ExistingId(EntityKind::Pilot))
                    .message("A pilot's ID must be a non negative integer and must exist in the database")
                    .insert_prompt("What's the ID of the pilot you want to add to this flight?")
                    .build(),
            ),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            flight_id: row.get(0)?,
            pilot_id: row.get(1)?,
        })
    }

    fn values(&self) -> Vec<i64> {
        vec![self.flight_id, self.pilot_id]
    }
}
