//! Seat allocation and the booking workflow over a real store.

use airline::prelude::*;
use pretty_assertions::assert_eq;
use testsupport::prelude::*;

fn seat(airline: &Airline<'_>, flight_id: RowId, customer_id: RowId, seat_number: SeatNumber) {
    airline
        .flight_passengers
        .insert(&FlightPassenger {
            flight_id,
            customer_id,
            seat_number,
        })
        .unwrap();
}

/// A flight of the given capacity with passengers in `seats`.
fn flight_with_seats(airline: &Airline<'_>, capacity: i64, seats: &[SeatNumber]) -> RowId {
    let seeded = seed_network_with_capacity(airline, capacity).unwrap();
    let customers = seed_customers(airline, seats.len()).unwrap();
    for (customer, &seat_number) in customers.iter().zip(seats) {
        seat(airline, seeded.flight.flight_id, customer.customer_id, seat_number);
    }
    seeded.flight.flight_id
}

#[test]
fn next_seat_follows_the_occupied_run() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let flight_id = flight_with_seats(&airline, 5, &[1, 2]);
    let seats = &airline.flight_passengers;

    assert_eq!(seats.get_max_passengers(flight_id).unwrap(), 5);
    assert_eq!(seats.get_next_available_seat(flight_id).unwrap(), Some(3));
    assert!(seats.is_seat_available(flight_id, 3).unwrap());
    assert!(!seats.is_seat_available(flight_id, 1).unwrap());
}

#[test]
fn next_seat_fills_a_gap_first() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let flight_id = flight_with_seats(&airline, 3, &[3, 1]);

    assert_eq!(
        airline.flight_passengers.occupied_seats(flight_id).unwrap(),
        vec![1, 3]
    );
    assert_eq!(
        airline.flight_passengers.get_next_available_seat(flight_id).unwrap(),
        Some(2)
    );
}

#[test]
fn full_flight_has_no_next_seat() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let flight_id = flight_with_seats(&airline, 3, &[1, 2, 3]);

    assert_eq!(
        airline.flight_passengers.get_next_available_seat(flight_id).unwrap(),
        None
    );
}

#[test]
fn empty_flight_starts_at_seat_one() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let flight_id = flight_with_seats(&airline, 2, &[]);

    assert_eq!(
        airline.flight_passengers.get_next_available_seat(flight_id).unwrap(),
        Some(1)
    );
}

#[test]
fn capacity_of_unknown_flight_is_not_found() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();

    assert_not_found(airline.flight_passengers.get_max_passengers(77));
    assert_not_found(airline.flight_passengers.get_next_available_seat(77));
}

#[test]
fn capacity_follows_the_flights_aircraft() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let seeded = seed_network_with_capacity(&airline, 5).unwrap();
    let jumbo = seed_aircraft(&airline, "747", 400).unwrap();
    let flight_id = seeded.flight.flight_id;

    airline
        .flights
        .update(flight_id, "Aircraft ID", &jumbo.aircraft_id.to_string())
        .unwrap();

    assert_eq!(airline.flight_passengers.get_max_passengers(flight_id).unwrap(), 400);
}

#[test]
fn store_rejects_duplicate_seats_on_one_flight() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let flight_id = flight_with_seats(&airline, 5, &[1]);
    let other = seed_customer(&airline, "Ada", "Lovelace").unwrap();

    assert_storage_error(airline.flight_passengers.insert(&FlightPassenger {
        flight_id,
        customer_id: other.customer_id,
        seat_number: 1,
    }));
}

#[test]
fn booking_next_seats_keeps_them_distinct_and_dense() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let seeded = seed_network_with_capacity(&airline, 3).unwrap();
    let flight_id = seeded.flight.flight_id;
    let customers = seed_customers(&airline, 4).unwrap();

    let mut seated = Vec::new();
    for customer in &customers[..3] {
        match airline
            .assign_passenger(flight_id, customer.customer_id, SeatRequest::Next)
            .unwrap()
        {
            SeatAssignment::Seated(row) => seated.push(row.seat_number),
            SeatAssignment::FlightFull => panic!("flight filled early"),
        }
    }
    assert_eq!(seated, vec![1, 2, 3]);

    assert_eq!(
        airline
            .assign_passenger(flight_id, customers[3].customer_id, SeatRequest::Next)
            .unwrap(),
        SeatAssignment::FlightFull
    );

    let remaining = airline
        .unassign_passenger(flight_id, customers[1].customer_id)
        .unwrap();
    assert_eq!(remaining.len(), 2);

    let refill = airline
        .assign_passenger(flight_id, customers[3].customer_id, SeatRequest::Next)
        .unwrap();
    assert_eq!(
        refill,
        SeatAssignment::Seated(FlightPassenger {
            flight_id,
            customer_id: customers[3].customer_id,
            seat_number: 2,
        })
    );
}

#[test]
fn exact_seat_requests_are_checked() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let flight_id = flight_with_seats(&airline, 3, &[2]);
    let customer = seed_customer(&airline, "Ada", "Lovelace").unwrap();
    let id = customer.customer_id;

    assert_validation(
        airline.assign_passenger(flight_id, id, SeatRequest::Exact(4)),
        "between 1 and 3",
    );
    assert_validation(
        airline.assign_passenger(flight_id, id, SeatRequest::Exact(0)),
        "between 1 and 3",
    );
    assert_conflict(airline.assign_passenger(flight_id, id, SeatRequest::Exact(2)));

    let booked = airline
        .assign_passenger(flight_id, id, SeatRequest::Exact(3))
        .unwrap();
    assert!(matches!(booked, SeatAssignment::Seated(row) if row.seat_number == 3));

    assert_conflict(airline.assign_passenger(flight_id, id, SeatRequest::Next));
}

#[test]
fn booking_requires_existing_flight_and_customer() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let seeded = seed_network(&airline).unwrap();
    let customer = seed_customer(&airline, "Ada", "Lovelace").unwrap();

    assert_not_found(airline.assign_passenger(99, customer.customer_id, SeatRequest::Next));
    assert_not_found(airline.assign_passenger(seeded.flight.flight_id, 99, SeatRequest::Next));
}

#[test]
fn reseating_moves_a_passenger_to_a_chosen_seat() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let flight_id = flight_with_seats(&airline, 4, &[1, 2]);
    let passengers = airline.flight_passengers.memberships(flight_id).unwrap();
    let first = passengers
        .iter()
        .find(|row| row.seat_number == 1)
        .copied()
        .unwrap();
    let customer_id = first.customer_id;

    assert_conflict(airline.reassign_seat(flight_id, customer_id, SeatRequest::Exact(2)));
    assert_validation(
        airline.reassign_seat(flight_id, customer_id, SeatRequest::Exact(5)),
        "between 1 and 4",
    );
    assert_not_found(airline.reassign_seat(flight_id, 999, SeatRequest::Exact(3)));

    let moved = airline
        .reassign_seat(flight_id, customer_id, SeatRequest::Exact(4))
        .unwrap();
    assert_eq!(
        moved,
        SeatAssignment::Seated(FlightPassenger {
            flight_id,
            customer_id,
            seat_number: 4,
        })
    );
    assert_eq!(
        airline.flight_passengers.occupied_seats(flight_id).unwrap(),
        vec![2, 4]
    );
    assert_eq!(
        airline.flight_passengers.get_next_available_seat(flight_id).unwrap(),
        Some(1)
    );
}

#[test]
fn reseating_to_the_next_free_seat() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let flight_id = flight_with_seats(&airline, 4, &[1, 3]);
    let passengers = airline.flight_passengers.memberships(flight_id).unwrap();
    let back_row = passengers
        .iter()
        .find(|row| row.seat_number == 3)
        .copied()
        .unwrap();

    let moved = airline
        .reassign_seat(flight_id, back_row.customer_id, SeatRequest::Next)
        .unwrap();
    assert!(matches!(moved, SeatAssignment::Seated(row) if row.seat_number == 2));
    assert_eq!(
        airline.flight_passengers.occupied_seats(flight_id).unwrap(),
        vec![1, 2]
    );
    assert_not_found(airline.reassign_seat(flight_id, 999, SeatRequest::Next));
}

#[test]
fn reseating_on_a_full_flight_keeps_the_seat() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let flight_id = flight_with_seats(&airline, 2, &[1, 2]);
    let passenger = airline.flight_passengers.memberships(flight_id).unwrap()[0];

    assert_eq!(
        airline
            .reassign_seat(flight_id, passenger.customer_id, SeatRequest::Next)
            .unwrap(),
        SeatAssignment::FlightFull
    );
    assert_eq!(
        airline.flight_passengers.occupied_seats(flight_id).unwrap(),
        vec![1, 2]
    );
}

#[test]
fn passengers_lists_customers_on_the_flight() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let seeded = seed_network(&airline).unwrap();
    let grace = seed_customer(&airline, "Grace", "Hopper").unwrap();
    seed_customer(&airline, "Ada", "Lovelace").unwrap();

    airline
        .assign_passenger(seeded.flight.flight_id, grace.customer_id, SeatRequest::Next)
        .unwrap();

    assert_eq!(airline.passengers(seeded.flight.flight_id).unwrap(), vec![grace]);
    assert_not_found(airline.passengers(404));
}

#[test]
fn capacity_cannot_drop_below_a_booked_seat() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let seeded = seed_network_with_capacity(&airline, 5).unwrap();
    let flight_id = seeded.flight.flight_id;
    let aircraft_id = seeded.aircraft.aircraft_id;
    for customer in seed_customers(&airline, 5).unwrap() {
        airline
            .assign_passenger(flight_id, customer.customer_id, SeatRequest::Next)
            .unwrap();
    }

    assert_conflict(airline.update(
        EntityKind::Aircraft,
        aircraft_id,
        "Max Passengers",
        "2",
    ));
    assert_eq!(airline.flight_passengers.get_max_passengers(flight_id).unwrap(), 5);

    let grown = airline
        .update(EntityKind::Aircraft, aircraft_id, "Max Passengers", "8")
        .unwrap();
    assert_eq!(grown.rows[0][3], "8");
    assert_eq!(airline.flight_passengers.highest_seat(flight_id).unwrap(), Some(5));
}

#[test]
fn flight_cannot_move_to_an_aircraft_too_small_for_its_passengers() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let flight_id = flight_with_seats(&airline, 5, &[1, 4]);
    let small = seed_aircraft(&airline, "Cessna", 3).unwrap();
    let roomy = seed_aircraft(&airline, "A321", 4).unwrap();

    assert_conflict(airline.update(
        EntityKind::Flight,
        flight_id,
        "Aircraft ID",
        &small.aircraft_id.to_string(),
    ));
    assert_eq!(airline.flight_passengers.get_max_passengers(flight_id).unwrap(), 5);

    airline
        .update(EntityKind::Flight, flight_id, "Aircraft ID", &roomy.aircraft_id.to_string())
        .unwrap();
    assert_eq!(airline.flight_passengers.get_max_passengers(flight_id).unwrap(), 4);

    airline
        .update(EntityKind::Flight, flight_id, "Destination", "Porto")
        .unwrap();
}
