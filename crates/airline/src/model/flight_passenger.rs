use catalog::{ColumnDescriptor, Validator};
use common::Tabular;
use rusqlite::Row;
use serde::Serialize;
use types::{EntityKind, RowId, SeatNumber};

use crate::entity::Junction;
use crate::model::Customer;

/// A customer booked on a flight in a particular seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FlightPassenger {
    pub flight_id: RowId,
    pub customer_id: RowId,
    pub seat_number: SeatNumber,
}

impl Tabular for FlightPassenger {
    fn headers() -> Vec<&'static str> {
        vec!["Flight ID", "Customer ID", "Seat Number"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.flight_id.to_string(),
            self.customer_id.to_string(),
            self.seat_number.to_string(),
        ]
    }
}

impl Junction for FlightPassenger {
    const KIND: EntityKind = EntityKind::FlightPassenger;
    const DDL: &'static str = "
        CREATE TABLE IF NOT EXISTS flight_passengers (
            flight_id INTEGER NOT NULL,
            customer_id INTEGER NOT NULL,
            seat_number INTEGER NOT NULL CHECK (seat_number >= 1),

            PRIMARY KEY (flight_id, customer_id),
            UNIQUE (flight_id, seat_number),
            FOREIGN KEY (flight_id) REFERENCES flights (flight_id) ON DELETE CASCADE,
            FOREIGN KEY (customer_id) REFERENCES customers (customer_id) ON DELETE CASCADE
        );
    ";

    type Member = Customer;

    fn columns() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![
            (
                "Flight ID",
                ColumnDescriptor::builder()
                    .name("flight_passengers.flight_id")
                    .validator(Validator::ExistingId(EntityKind::Flight))
                    .message("A flight's ID must be a non negative integer and must exist in the database")
                    .insert_prompt("What's the ID of the flight you want to add a passenger to?")
                    .build(),
            ),
            (
                "Customer ID",
                ColumnDescriptor::builder()
                    .name("flight_passengers.customer_id")
                    .validator(Validator::ExistingId(EntityKind::Customer))
                    .message("A customer's ID must be a non negative integer and must exist in the database")
                    .insert_prompt("What's the ID of the customer you want to add to this flight?")
                    .build(),
            ),
            (
                "Seat Number",
                ColumnDescriptor::builder()
                    .name("flight_passengers.seat_number")
                    .settable(true)
                    .validator(Validator::AtLeast(1))
                    .message("A seat number must be a positive integer")
                    .insert_prompt("What seat number should this passenger have?")
                    .update_prompt("What's the new seat number of this passenger?")
                    .build(),
            ),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            flight_id: row.get(0)?,
            customer_id: row.get(1)?,
            seat_number: row.get(2)?,
        })
    }

    fn values(&self) -> Vec<i64> {
        vec![self.flight_id, self.customer_id, self.seat_number]
    }
}
