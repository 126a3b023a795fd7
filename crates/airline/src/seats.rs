//! Seat occupancy for passengers on a flight.
//!
//! Seats are numbered from 1 up to the capacity of the flight's aircraft and
//! are unique within a flight. A full flight is an ordinary outcome and is
//! reported as `None`, never as an error.

use common::{DbError, DbResult};
use rusqlite::params;
use types::{RowId, SeatNumber};

use crate::entity::Junction;
use crate::junction::JunctionRepository;
use crate::model::FlightPassenger;

/// Lowest free seat given the occupied seats in ascending order.
///
/// Walks the occupied run 1, 2, 3, ... and stops at the first break; with no
/// break the candidate follows the last occupied seat. The candidate is only
/// returned if it fits within `capacity`.
pub fn next_free_seat(occupied: &[SeatNumber], capacity: i64) -> Option<SeatNumber> {
    let mut previous = 0;
    for &seat in occupied {
        if seat != previous + 1 {
            break;
        }
        previous = seat;
    }
    let candidate = previous + 1;
    (candidate <= capacity).then_some(candidate)
}

impl JunctionRepository<'_, FlightPassenger> {
    /// Capacity of the aircraft flying this flight.
    pub fn get_max_passengers(&self, flight_id: RowId) -> DbResult<i64> {
        self.store
            .query_optional(
                "SELECT aircrafts.max_passengers
                FROM flights
                JOIN aircrafts ON flights.aircraft_id = aircrafts.aircraft_id
                WHERE flights.flight_id = ?1",
                [flight_id],
                "read the flight's capacity",
                |row| row.get::<_, i64>(0),
            )?
            .ok_or_else(|| DbError::NotFound(format!("flight {flight_id} does not exist")))
    }

    /// Occupied seats on a flight in ascending order.
    pub fn occupied_seats(&self, flight_id: RowId) -> DbResult<Vec<SeatNumber>> {
        self.store.query_rows(
            "SELECT seat_number FROM flight_passengers WHERE flight_id = ?1 ORDER BY seat_number ASC",
            [flight_id],
            "read occupied seats",
            |row| row.get::<_, SeatNumber>(0),
        )
    }

    pub fn is_seat_available(&self, flight_id: RowId, seat_number: SeatNumber) -> DbResult<bool> {
        self.store
            .exists(
                "SELECT EXISTS(SELECT 1 FROM flight_passengers WHERE flight_id = ?1 AND seat_number = ?2)",
                params![flight_id, seat_number],
                "check seat availability",
            )
            .map(|taken| !taken)
    }

    /// Lowest free seat on the flight, or `None` when it is full.
    pub fn get_next_available_seat(&self, flight_id: RowId) -> DbResult<Option<SeatNumber>> {
        let capacity = self.get_max_passengers(flight_id)?;
        let occupied = self.occupied_seats(flight_id)?;
        Ok(next_free_seat(&occupied, capacity))
    }

    /// Highest occupied seat on a flight.
    pub fn highest_seat(&self, flight_id: RowId) -> DbResult<Option<SeatNumber>> {
        self.store.query_one(
            "SELECT MAX(seat_number) FROM flight_passengers WHERE flight_id = ?1",
            [flight_id],
            "read the highest seat",
            |row| row.get::<_, Option<SeatNumber>>(0),
        )
    }

    /// Highest occupied seat across every flight flown by an aircraft.
    pub fn highest_seat_on_aircraft(&self, aircraft_id: RowId) -> DbResult<Option<SeatNumber>> {
        self.store.query_one(
            "SELECT MAX(flight_passengers.seat_number)
            FROM flight_passengers
            JOIN flights ON flight_passengers.flight_id = flights.flight_id
            WHERE flights.aircraft_id = ?1",
            [aircraft_id],
            "read the highest seat on the aircraft",
            |row| row.get::<_, Option<SeatNumber>>(0),
        )
    }

    /// Move a passenger to another seat and return the updated row.
    pub fn update_seat_number(
        &self,
        flight_id: RowId,
        customer_id: RowId,
        seat_number: SeatNumber,
    ) -> DbResult<FlightPassenger> {
        self.store.query_one(
            "UPDATE flight_passengers SET seat_number = ?1
            WHERE flight_id = ?2 AND customer_id = ?3
            RETURNING flight_id, customer_id, seat_number",
            params![seat_number, flight_id, customer_id],
            "update the seat number",
            FlightPassenger::from_row,
        )
    }
}
