//! Seed data for repository and workflow tests.
//!
//! Values are valid for their column validators so tests can insert them
//! without going through validation first.

use airline::Airline;
use airline::model::{Aircraft, Airport, Customer, Flight, Pilot, Terminal};
use common::DbResult;

/// Rows created by [`seed_network`].
#[derive(Clone, Debug)]
pub struct SeededNetwork {
    pub airport: Airport,
    pub terminal: Terminal,
    pub aircraft: Aircraft,
    pub flight: Flight,
}

pub fn seed_pilot(airline: &Airline<'_>, first_name: &str, last_name: &str) -> DbResult<Pilot> {
    airline
        .pilots
        .insert(&[first_name, last_name, "1980-04-12"])
}

pub fn seed_customer(airline: &Airline<'_>, first_name: &str, last_name: &str) -> DbResult<Customer> {
    airline.customers.insert(&[
        first_name,
        last_name,
        "1992-11-03",
        "12 Harbour Road, Leith",
        "07700900123",
    ])
}

/// `count` customers named `Customer 1`, `Customer 2`, ...
pub fn seed_customers(airline: &Airline<'_>, count: usize) -> DbResult<Vec<Customer>> {
    (1..=count)
        .map(|n| seed_customer(airline, "Customer", &n.to_string()))
        .collect()
}

pub fn seed_airport(airline: &Airline<'_>, name: &str) -> DbResult<Airport> {
    airline.airports.insert(&[name, "Airport Way, Edinburgh"])
}

pub fn seed_terminal(airline: &Airline<'_>, airport: &Airport, name: &str) -> DbResult<Terminal> {
    airline
        .terminals
        .insert(&[&airport.airport_id.to_string(), name])
}

/// A plane seating `capacity` passengers.
pub fn seed_aircraft(airline: &Airline<'_>, name: &str, capacity: i64) -> DbResult<Aircraft> {
    airline
        .aircrafts
        .insert(&[name, "1", &capacity.to_string()])
}

/// A flight boarding at `boarding_time`, departing 30 minutes and arriving
/// two and a half hours later on the same day.
pub fn seed_flight(
    airline: &Airline<'_>,
    aircraft: &Aircraft,
    terminal: &Terminal,
    destination: &str,
    boarding_time: &str,
) -> DbResult<Flight> {
    let day = boarding_time.get(..10).unwrap_or("2030-01-01");
    airline.flights.insert(&[
        &aircraft.aircraft_id.to_string(),
        &terminal.terminal_id.to_string(),
        destination,
        boarding_time,
        &format!("{day} 10:30:00"),
        &format!("{day} 12:30:00"),
    ])
}

/// One airport, terminal, aircraft of the given capacity and a flight to
/// Lisbon using them.
pub fn seed_network_with_capacity(airline: &Airline<'_>, capacity: i64) -> DbResult<SeededNetwork> {
    let airport = seed_airport(airline, "Edinburgh")?;
    let terminal = seed_terminal(airline, &airport, "Main")?;
    let aircraft = seed_aircraft(airline, "A320", capacity)?;
    let flight = seed_flight(airline, &aircraft, &terminal, "Lisbon", "2030-06-14 10:00:00")?;
    Ok(SeededNetwork {
        airport,
        terminal,
        aircraft,
        flight,
    })
}

/// [`seed_network_with_capacity`] with room for five passengers.
pub fn seed_network(airline: &Airline<'_>) -> DbResult<SeededNetwork> {
    seed_network_with_capacity(airline, 5)
}
