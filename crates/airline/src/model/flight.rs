use catalog::{ColumnDescriptor, Validator};
use common::Tabular;
use rusqlite::Row;
use serde::Serialize;
use types::{EntityKind, RowId};

use crate::entity::Entity;

/// Stored shape of a flight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Flight {
    pub flight_id: RowId,
    pub aircraft_id: RowId,
    pub terminal_id: RowId,
    pub destination: String,
    pub boarding_time: String,
    pub departure_time: String,
    pub arrival_time: String,
}

/// A flight with the names of its aircraft, terminal and departure airport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlightView {
    pub flight_id: RowId,
    pub aircraft_id: RowId,
    pub aircraft_name: String,
    pub terminal_id: RowId,
    pub airport_name: String,
    pub terminal_name: String,
    pub destination: String,
    pub boarding_time: String,
    pub departure_time: String,
    pub arrival_time: String,
}

impl Tabular for Flight {
    fn headers() -> Vec<&'static str> {
        vec![
            "Flight ID",
            "Aircraft ID",
            "Terminal ID",
            "Destination",
            "Boarding Time",
            "Departure Time",
            "Arrival Time",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.flight_id.to_string(),
            self.aircraft_id.to_string(),
            self.terminal_id.to_string(),
            self.destination.clone(),
            self.boarding_time.clone(),
            self.departure_time.clone(),
            self.arrival_time.clone(),
        ]
    }
}

impl Tabular for FlightView {
    fn headers() -> Vec<&'static str> {
        vec![
            "Flight ID",
            "Aircraft ID",
            "Aircraft Name",
            "Terminal ID",
            "Airport Name",
            "Terminal Name",
            "Destination",
            "Boarding Time",
            "Departure Time",
            "Arrival Time",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.flight_id.to_string(),
            self.aircraft_id.to_string(),
            self.aircraft_name.clone(),
            self.terminal_id.to_string(),
            self.airport_name.clone(),
            self.terminal_name.clone(),
            self.destination.clone(),
            self.boarding_time.clone(),
            self.departure_time.clone(),
            self.arrival_time.clone(),
        ]
    }
}

fn timestamp_column(
    name: &'static str,
    message: &'static str,
    insert_prompt: &'static str,
    update_prompt: &'static str,
) -> ColumnDescriptor {
    ColumnDescriptor::builder()
        .name(name)
        .settable(true)
        .validator(Validator::DateTime)
        .message(message)
        .insert_prompt(insert_prompt)
        .update_prompt(update_prompt)
        .build()
}

impl Entity for Flight {
    const KIND: EntityKind = EntityKind::Flight;
    const DDL: &'static str = "
        CREATE TABLE IF NOT EXISTS flights (
            flight_id INTEGER PRIMARY KEY,
            aircraft_id INTEGER NOT NULL,
            terminal_id INTEGER NOT NULL,
            destination VARCHAR(100) NOT NULL,
            boarding_time VARCHAR(19) NOT NULL,
            departure_time VARCHAR(19) NOT NULL,
            arrival_time VARCHAR(19) NOT NULL,

            FOREIGN KEY (aircraft_id) REFERENCES aircrafts (aircraft_id) ON DELETE CASCADE,
            FOREIGN KEY (terminal_id) REFERENCES terminals (terminal_id) ON DELETE CASCADE
        );
    ";

    type View = FlightView;

    fn columns() -> Vec<(&'static str, ColumnDescriptor)> {
        vec![
            (
                "Flight ID",
                ColumnDescriptor::builder()
                    .name("flights.flight_id")
                    .validator(Validator::ExistingId(EntityKind::Flight))
                    .message("A flight's ID must be a non negative integer and must exist in the database")
                    .build(),
            ),
            (
                "Aircraft ID",
                ColumnDescriptor::builder()
                    .name("flights.aircraft_id")
                    .settable(true)
                    .validator(Validator::ExistingId(EntityKind::Aircraft))
                    .message("An aircraft's ID must be a non negative integer and must exist in the database")
                    .insert_prompt("What's the ID of the aircraft for this flight?")
                    .update_prompt("What's the ID of the new aircraft for this flight?")
                    .build(),
            ),
            (
                "Terminal ID",
                ColumnDescriptor::builder()
                    .name("flights.terminal_id")
                    .settable(true)
                    .validator(Validator::ExistingId(EntityKind::Terminal))
                    .message("A terminal's ID must be a non negative integer and must exist in the database")
                    .insert_prompt("What's the ID of the terminal for this flight?")
                    .update_prompt("What's the ID of the new terminal for this flight?")
                    .build(),
            ),
            (
                "Destination",
                ColumnDescriptor::builder()
                    .name("flights.destination")
                    .settable(true)
                    .validator(Validator::length(1, 100))
                    .message("A flight's destination must be between 1 and 100 characters inclusive")
                    .insert_prompt("What's the destination of this flight?")
                    .update_prompt("What's the new destination of this flight?")
                    .build(),
            ),
            (
                "Boarding Time",
                timestamp_column(
                    "flights.boarding_time",
                    "A flight's boarding time must be in the format YYYY-MM-DD HH:MM:SS",
                    "What's the boarding time of this flight in YYYY-MM-DD HH:MM:SS format?",
                    "What's the new boarding time of this flight in YYYY-MM-DD HH:MM:SS format?",
                ),
            ),
            (
                "Departure Time",
                timestamp_column(
                    "flights.departure_time",
                    "A flight's departure time must be in the format YYYY-MM-DD HH:MM:SS",
                    "What's the departure time of this flight in YYYY-MM-DD HH:MM:SS format?",
                    "What's the new departure time of this flight in YYYY-MM-DD HH:MM:SS format?",
                ),
            ),
            (
                "Arrival Time",
                timestamp_column(
                    "flights.arrival_time",
                    "A flight's arrival time must be in the format YYYY-MM-DD HH:MM:SS",
                    "What's the arrival time of this flight in YYYY-MM-DD HH:MM:SS format?",
                    "What's the new arrival time of this flight in YYYY-MM-DD HH:MM:SS format?",
                ),
            ),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            flight_id: row.get(0)?,
            aircraft_id: row.get(1)?,
            terminal_id: row.get(2)?,
            destination: row.get(3)?,
            boarding_time: row.get(4)?,
            departure_time: row.get(5)?,
            arrival_time: row.get(6)?,
        })
    }

    fn view_query() -> Option<&'static str> {
        Some(
            "SELECT flights.flight_id, flights.aircraft_id, aircrafts.name, flights.terminal_id,
                airports.name, terminals.name, flights.destination, flights.boarding_time,
                flights.departure_time, flights.arrival_time
            FROM flights
            JOIN aircrafts ON flights.aircraft_id = aircrafts.aircraft_id
            JOIN terminals ON flights.terminal_id = terminals.terminal_id
            JOIN airports ON terminals.airport_id = airports.airport_id",
        )
    }

    fn view_from_row(row: &Row<'_>) -> rusqlite::Result<Self::View> {
        Ok(FlightView {
            flight_id: row.get(0)?,
            aircraft_id: row.get(1)?,
            aircraft_name: row.get(2)?,
            terminal_id: row.get(3)?,
            airport_name: row.get(4)?,
            terminal_name: row.get(5)?,
            destination: row.get(6)?,
            boarding_time: row.get(7)?,
            departure_time: row.get(8)?,
            arrival_time: row.get(9)?,
        })
    }
}
