//! Generic repository behaviour against a real SQLite store.

use airline::prelude::*;
use common::DbError;
use pretty_assertions::assert_eq;
use testsupport::prelude::*;

#[test]
fn insert_returns_supplied_values_with_fresh_id() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();

    let amelia = airline
        .pilots
        .insert(&["Amelia", "Earhart", "1897-07-24"])
        .unwrap();
    let chuck = airline
        .pilots
        .insert(&["Chuck", "Yeager", "1923-02-13"])
        .unwrap();

    assert_ne!(amelia.pilot_id, chuck.pilot_id);
    assert_eq!(
        amelia,
        Pilot {
            pilot_id: amelia.pilot_id,
            first_name: "Amelia".into(),
            last_name: "Earhart".into(),
            date_of_birth: "1897-07-24".into(),
        }
    );
}

#[test]
fn insert_rejects_wrong_number_of_values() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();

    let err = airline.airports.insert(&["Heathrow"]).unwrap_err();
    assert!(matches!(err, DbError::Catalog(_)));
    assert!(!err.is_fatal());
}

#[test]
fn exists_tracks_insert_and_delete() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();

    let airport = seed_airport(&airline, "Heathrow").unwrap();
    assert!(airline.airports.exists(airport.airport_id).unwrap());

    let remaining = airline
        .airports
        .delete_and_return("Airport ID", &airport.airport_id.to_string())
        .unwrap();
    assert!(remaining.is_empty());
    assert!(!airline.airports.exists(airport.airport_id).unwrap());
}

#[test]
fn create_table_is_idempotent() {
    let ctx = TestContext::new().unwrap();
    let airline = ctx.airline().unwrap();
    seed_customer(&airline, "Grace", "Hopper").unwrap();

    airline.create_tables().unwrap();
    airline.customers.create_table().unwrap();

    assert!(ctx.store().table_exists("customers").unwrap());
    assert_eq!(airline.customers.get_all().unwrap().len(), 1);
}

#[test]
fn update_changes_only_the_named_column() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let before = seed_customer(&airline, "Grace", "Hopper").unwrap();

    let after = airline
        .customers
        .update(before.customer_id, "Phone Number", "07700900999")
        .unwrap();

    assert_eq!(
        after,
        Customer {
            phone_number: "07700900999".into(),
            ..before.clone()
        }
    );
    assert_eq!(airline.customers.get_by_id(before.customer_id).unwrap(), Some(after));
}

#[test]
fn update_rejects_identity_and_unknown_columns() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let pilot = seed_pilot(&airline, "Amelia", "Earhart").unwrap();

    let err = airline.pilots.update(pilot.pilot_id, "Pilot ID", "7").unwrap_err();
    assert!(matches!(err, DbError::Catalog(_)));
    let err = airline.pilots.update(pilot.pilot_id, "Callsign", "Lady Lindy").unwrap_err();
    assert!(matches!(err, DbError::Catalog(_)));
}

#[test]
fn update_of_missing_row_is_a_storage_error() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();

    assert_storage_error(airline.pilots.update(99, "First Name", "Nobody"));
}

#[test]
fn aircraft_type_round_trips_through_its_code() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();

    let heli = airline.aircrafts.insert(&["Sea King", "2", "12"]).unwrap();
    assert_eq!(heli.kind, AircraftType::Helicopter);
    assert_eq!(heli.max_passengers, 12);
    assert_eq!(heli.cells()[2], "Helicopter");

    let plane = airline.aircrafts.update(heli.aircraft_id, "Type", "1").unwrap();
    assert_eq!(plane.kind, AircraftType::Plane);
}

#[test]
fn get_filters_on_one_column() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    seed_customer(&airline, "Grace", "Hopper").unwrap();
    seed_customer(&airline, "Ada", "Lovelace").unwrap();
    seed_customer(&airline, "Grace", "Kelly").unwrap();

    let graces = airline.customers.get("First Name", "Grace").unwrap();
    let surnames: Vec<_> = graces.iter().map(|c| c.last_name.as_str()).collect();
    assert_eq!(surnames.len(), 2);
    assert!(surnames.contains(&"Hopper"));
    assert!(surnames.contains(&"Kelly"));

    assert!(airline.customers.get("First Name", "Alan").unwrap().is_empty());
    assert!(matches!(
        airline.customers.get("Nickname", "Amazing Grace"),
        Err(DbError::Catalog(_))
    ));
}

#[test]
fn terminal_reads_join_their_airport() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let airport = seed_airport(&airline, "Edinburgh").unwrap();
    let terminal = seed_terminal(&airline, &airport, "Main").unwrap();

    let views = airline.terminals.get("Name", "Main").unwrap();
    assert_eq!(
        views,
        vec![TerminalView {
            terminal_id: terminal.terminal_id,
            terminal_name: "Main".into(),
            airport_id: airport.airport_id,
            airport_name: "Edinburgh".into(),
            airport_address: "Airport Way, Edinburgh".into(),
        }]
    );
}

#[test]
fn flight_reads_join_aircraft_terminal_and_airport() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let seeded = seed_network(&airline).unwrap();

    let views = airline.flights.get_all().unwrap();
    assert_eq!(views.len(), 1);
    let view = &views[0];
    assert_eq!(view.flight_id, seeded.flight.flight_id);
    assert_eq!(view.aircraft_name, "A320");
    assert_eq!(view.airport_name, "Edinburgh");
    assert_eq!(view.terminal_name, "Main");
    assert_eq!(view.destination, "Lisbon");
    assert_eq!(view.boarding_time, "2030-06-14 10:00:00");

    let by_destination = airline.flights.get("Destination", "Lisbon").unwrap();
    assert_eq!(by_destination, views);
}

#[test]
fn delete_with_no_match_returns_everything() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    seed_airport(&airline, "Heathrow").unwrap();
    seed_airport(&airline, "Gatwick").unwrap();

    let before = airline.airports.get_all().unwrap();
    let after = airline.airports.delete_and_return("Name", "Stansted").unwrap();
    assert_eq!(after, before);
}

#[test]
fn deleting_a_flight_cascades_to_assignments() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let seeded = seed_network(&airline).unwrap();
    let flight_id = seeded.flight.flight_id;
    let pilot = seed_pilot(&airline, "Amelia", "Earhart").unwrap();
    let customer = seed_customer(&airline, "Grace", "Hopper").unwrap();
    airline.assign_pilot(flight_id, pilot.pilot_id).unwrap();
    airline
        .assign_passenger(flight_id, customer.customer_id, SeatRequest::Next)
        .unwrap();

    let remaining = airline
        .flights
        .delete_and_return("Flight ID", &flight_id.to_string())
        .unwrap();

    assert!(remaining.is_empty());
    assert!(!airline.flights.exists(flight_id).unwrap());
    assert!(airline.flight_pilots.get(flight_id).unwrap().is_empty());
    assert!(airline.flight_passengers.get(flight_id).unwrap().is_empty());
    assert!(airline.pilots.exists(pilot.pilot_id).unwrap());
    assert!(airline.customers.exists(customer.customer_id).unwrap());
}

#[test]
fn deleting_an_airport_cascades_through_terminals_and_flights() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let seeded = seed_network(&airline).unwrap();

    airline
        .airports
        .delete_and_return("Name", "Edinburgh")
        .unwrap();

    assert!(!airline.terminals.exists(seeded.terminal.terminal_id).unwrap());
    assert!(!airline.flights.exists(seeded.flight.flight_id).unwrap());
    assert!(airline.aircrafts.exists(seeded.aircraft.aircraft_id).unwrap());
}

#[test]
fn runtime_dispatch_returns_display_batches() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    seed_network(&airline).unwrap();

    let terminals = airline.table(EntityKind::Terminal).unwrap();
    assert_eq!(terminals.kind(), EntityKind::Terminal);
    let batch = terminals.get_all_batch().unwrap();
    assert_eq!(
        batch.columns,
        vec!["Terminal ID", "Terminal Name", "Airport ID", "Airport Name", "Airport Address"]
    );
    assert_eq!(batch.rows[0][1], "Main");

    assert!(airline.table(EntityKind::FlightPilot).is_none());
    assert!(airline.list(EntityKind::FlightPilot).unwrap().is_empty());

    let inserted = airline
        .table(EntityKind::Airport)
        .unwrap()
        .insert_batch(&["Gatwick", "Horley, Surrey"])
        .unwrap();
    assert_eq!(inserted.rows[0][1], "Gatwick");
}

#[test]
fn validation_consults_sibling_tables() {
    let ctx = TestContext::in_memory().unwrap();
    let airline = ctx.airline().unwrap();
    let airport = seed_airport(&airline, "Edinburgh").unwrap();

    airline
        .validate(EntityKind::Terminal, "Airport ID", &airport.airport_id.to_string())
        .unwrap();
    assert_validation(
        airline.validate(EntityKind::Terminal, "Airport ID", "404"),
        "must exist in the database",
    );
    assert_validation(
        airline.validate(EntityKind::Terminal, "Airport ID", "-1"),
        "non negative integer",
    );
    assert_validation(
        airline.validate(EntityKind::Flight, "Boarding Time", "2031-02-30 10:00:00"),
        "YYYY-MM-DD HH:MM:SS",
    );
    assert_validation(
        airline.validate(EntityKind::Aircraft, "Type", "3"),
        "plane or 2 for helicopter",
    );
    airline
        .validate(EntityKind::Customer, "Date of Birth", "2000-02-29")
        .unwrap();
}
