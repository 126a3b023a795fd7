use catalog::{ColumnDescriptor, Validator};
use common::Tabular;
use rusqlite::Row;
use serde::Serialize;
use types::{EntityKind, RowId};

use crate::entity::Entity;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pilot {
    pub pilot_id: RowId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
}

impl Tabular for Pilot {
    fn headers() -> Vec<&'static str> {
        vec!["Pilot ID", "First Name", "Last Name", "Date of Birth"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.pilot_id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.date_of_birth.clone(),
        ]
    }
}

impl Entity for Pilot {
    const KIND: EntityKind = EntityKind::Pilot;
    const DDL: &'static str = "
        CREATE TABLE IF NOT EXISTS pilots (
            pilot_id INTEGER PRIMARY KEY,
            first_name VARCHAR(40) NOT NULL,
            last_name VARCHAR(40) NOT NULL,
            date_of_birth VARCHAR(10) NOT NULL
        );
    ";

    type View = Pilot;

    fn columns() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![
            (
                "Pilot ID",
                ColumnDescriptor::builder()
                    .name("pilots.pilot_id")
                    .validator(Validator::ExistingId(EntityKind::Pilot))
                    .message("A pilot's ID must be a non negative integer and must exist in the database")
                    .build(),
            ),
            (
                "First Name",
                ColumnDescriptor::builder()
                    .name("pilots.first_name")
                    .settable(true)
                    .validator(Validator::length(1, 40))
                    .message("A pilot's first name must be between 1 and 40 characters inclusive")
                    .insert_prompt("What's the first name of this pilot?")
                    .update_prompt("What's the new first name of this pilot?")
                    .build(),
            ),
            (
                "Last Name",
                ColumnDescriptor::builder()
                    .name("pilots.last_name")
                    .settable(true)
                    .validator(Validator::length(1, 40))
                    .message("A pilot's last name must be between 1 and 40 characters inclusive")
                    .insert_prompt("What's the last name of this pilot?")
                    .update_prompt("What's the new last name of this pilot?")
                    .build(),
            ),
            (
                "Date of Birth",
                ColumnDescriptor::builder()
                    .name("pilots.date_of_birth")
                    .settable(true)
                    .validator(Validator::Date)
                    .message("A pilot's date of birth must be in the format YYYY-MM-DD")
                    .insert_prompt("What's the date of birth of this pilot in YYYY-MM-DD format?")
                    .update_prompt("What's the new date of birth of this pilot in YYYY-MM-DD format?")
                    .build(),
            ),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            pilot_id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            date_of_birth: row.get(3)?,
        })
    }

    fn view_from_row(row: &Row<'_>) -> rusqlite::Result<Self::View> {
        Self::from_row(row)
    }
}
