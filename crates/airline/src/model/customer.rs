use catalog::{ColumnDescriptor, Validator};
use common::Tabular;
use rusqlite::Row;
use serde::Serialize;
use types::{EntityKind, RowId};

use crate::entity::Entity;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub customer_id: RowId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub home_address: String,
    pub phone_number: String,
}

impl Tabular for Customer {
    fn headers() -> Vec<&'static str> {
        vec![
            "Customer ID",
            "First Name",
            "Last Name",
            "Date of Birth",
            "Home Address",
            "Phone Number",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.date_of_birth.clone(),
            self.home_address.clone(),
            self.phone_number.clone(),
        ]
    }
}

impl Entity for Customer {
    const KIND: EntityKind = EntityKind::Customer;
    const DDL: &'static str = "
        CREATE TABLE IF NOT EXISTS customers (
            customer_id INTEGER PRIMARY KEY,
            first_name VARCHAR(40) NOT NULL,
            last_name VARCHAR(40) NOT NULL,
            date_of_birth VARCHAR(10) NOT NULL,
            home_address TEXT NOT NULL,
            phone_number VARCHAR(15) NOT NULL
        );
    ";

    type View = Customer;

    fn columns() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![
            (
                "Customer ID",
                ColumnDescriptor::builder()
                    .name("customers.customer_id")
                    .validator(Validator::ExistingId(EntityKind::Customer))
                    .message("A customer's ID must be a non negative integer and must exist in the database")
                    .build(),
            ),
            (
                "First Name",
                ColumnDescriptor::builder()
                    .name("customers.first_name")
                    .settable(true)
                    .validator(Validator::length(1, 40))
                    .message("A customer's first name must be between 1 and 40 characters inclusive")
                    .insert_prompt("What's the first name of this customer?")
                    .update_prompt("What's the new first name of this customer?")
                    .build(),
            ),
            (
                "Last Name",
                ColumnDescriptor::builder()
                    .name("customers.last_name")
                    .settable(true)
                    .validator(Validator::length(1, 40))
                    .message("A customer's last name must be between 1 and 40 characters inclusive")
                    .insert_prompt("What's the last name of this customer?")
                    .update_prompt("What's the new last name of this customer?")
                    .build(),
            ),
            (
                "Date of Birth",
                ColumnDescriptor::builder()
                    .name("customers.date_of_birth")
                    .settable(true)
                    .validator(Validator::Date)
                    .message("A customer's date of birth must be in the format YYYY-MM-DD")
                    .insert_prompt("What's the date of birth of this customer in YYYY-MM-DD format?")
                    .update_prompt("What's the new date of birth of this customer in YYYY-MM-DD format?")
                    .build(),
            ),
            (
                "Home Address",
                ColumnDescriptor::builder()
                    .name("customers.home_address")
                    .settable(true)
                    .validator(Validator::min_length(2))
                    .message("A customer's home address must be at least 2 characters")
                    .insert_prompt("What's the home address of this customer?")
                    .update_prompt("What's the new home address of this customer?")
                    .build(),
            ),
            (
                "Phone Number",
                ColumnDescriptor::builder()
                    .name("customers.phone_number")
                    .settable(true)
                    .validator(Validator::length(1, 15))
                    .message("A customer's phone number must be between 1 and 15 characters inclusive")
                    .insert_prompt("What's the phone number of this customer?")
                    .update_prompt("What's the new phone number of this customer?")
                    .build(),
            ),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            customer_id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            date_of_birth: row.get(3)?,
            home_address: row.get(4)?,
            phone_number: row.get(5)?,
        })
    }

    fn view_from_row(row: &Row<'_>) -> rusqlite::Result<Self::View> {
        Self::from_row(row)
    }
}
