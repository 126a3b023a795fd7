//! Integration tests demonstrating testsupport usage.

use airline::SeatAssignment;
use airline::SeatRequest;
use testsupport::prelude::*;

#[test]
fn file_backed_context_survives_reopen_of_airline() {
    let ctx = TestContext::new().unwrap();
    {
        let airline = ctx.airline().unwrap();
        seed_network(&airline).unwrap();
    }
    // Creating the tables a second time keeps the rows.
    let airline = ctx.airline().unwrap();
    assert_eq!(airline.flights.get_all().unwrap().len(), 1);
}

#[test]
fn seeded_network_accepts_bookings() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let seeded = seed_network_with_capacity(&airline, 1).unwrap();
    let customers = seed_customers(&airline, 2).unwrap();

    let first = airline
        .assign_passenger(seeded.flight.flight_id, customers[0].customer_id, SeatRequest::Next)
        .unwrap();
    assert!(matches!(first, SeatAssignment::Seated(row) if row.seat_number == 1));

    let second = airline
        .assign_passenger(seeded.flight.flight_id, customers[1].customer_id, SeatRequest::Next)
        .unwrap();
    assert_eq!(second, SeatAssignment::FlightFull);
}

#[test]
fn assertion_helpers_match_error_kinds() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    assert_not_found(airline.crew(42));
    assert_error_contains(airline.crew(42), "flight 42");
}
