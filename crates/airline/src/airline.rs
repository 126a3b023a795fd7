//! The eight repositories wired over one store.
//!
//! [`Airline`] owns every repository, serves as the [`Lookup`] handle that
//! foreign-key validators query, and carries the checks that must pass before
//! a pilot or passenger is attached to a flight.

use catalog::{Lookup, TableSchema};
use common::{DbError, DbResult, RecordBatch};
use storage::Store;
use tracing::{info, warn};
use types::{EntityKind, RowId, SeatNumber};

use crate::junction::JunctionRepository;
use crate::model::{
    Aircraft, Airport, Customer, Flight, FlightPassenger, FlightPilot, Pilot, Terminal,
};
use crate::repository::{AnyRepository, Repository};
use crate::stats::Statistics;

pub type FlightPassengers<'c> = JunctionRepository<'c, FlightPassenger>;
pub type FlightPilots<'c> = JunctionRepository<'c, FlightPilot>;

/// Which seat a new passenger should get.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeatRequest {
    /// Lowest free seat.
    Next,
    Exact(SeatNumber),
}

/// Outcome of booking a passenger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeatAssignment {
    Seated(FlightPassenger),
    /// Every seat up to the aircraft's capacity is taken.
    FlightFull,
}

pub struct Airline<'c> {
    store: &'c Store,
    pub pilots: Repository<'c, Pilot>,
    pub customers: Repository<'c, Customer>,
    pub aircrafts: Repository<'c, Aircraft>,
    pub airports: Repository<'c, Airport>,
    pub terminals: Repository<'c, Terminal>,
    pub flights: Repository<'c, Flight>,
    pub flight_passengers: FlightPassengers<'c>,
    pub flight_pilots: FlightPilots<'c>,
}

impl<'c> Airline<'c> {
    /// Build every repository over `store`. No statement is issued.
    pub fn new(store: &'c Store) -> DbResult<Self> {
        Ok(Self {
            store,
            pilots: Repository::new(store)?,
            customers: Repository::new(store)?,
            aircrafts: Repository::new(store)?,
            airports: Repository::new(store)?,
            terminals: Repository::new(store)?,
            flights: Repository::new(store)?,
            flight_passengers: JunctionRepository::new(store)?,
            flight_pilots: JunctionRepository::new(store)?,
        })
    }

    pub fn store(&self) -> &'c Store {
        self.store
    }

    /// Create all tables, referenced tables first.
    pub fn create_tables(&self) -> DbResult<()> {
        self.pilots.create_table()?;
        self.airports.create_table()?;
        self.terminals.create_table()?;
        self.customers.create_table()?;
        self.aircrafts.create_table()?;
        self.flights.create_table()?;
        self.flight_passengers.create_table()?;
        self.flight_pilots.create_table()?;
        info!("airline schema ready");
        Ok(())
    }

    /// Runtime-dispatched repository for a single-id table. Junction tables
    /// return `None`.
    pub fn table(&self, kind: EntityKind) -> Option<&dyn AnyRepository> {
        match kind {
            EntityKind::Pilot => Some(&self.pilots),
            EntityKind::Customer => Some(&self.customers),
            EntityKind::Aircraft => Some(&self.aircrafts),
            EntityKind::Airport => Some(&self.airports),
            EntityKind::Terminal => Some(&self.terminals),
            EntityKind::Flight => Some(&self.flights),
            EntityKind::FlightPassenger | EntityKind::FlightPilot => None,
        }
    }

    /// Single-id repository, or a `Catalog` error for junction tables.
    pub fn entity_table(&self, kind: EntityKind) -> DbResult<&dyn AnyRepository> {
        self.table(kind).ok_or_else(|| {
            DbError::Catalog(format!(
                "{kind} is managed through flight assignments, not directly"
            ))
        })
    }

    pub fn schema(&self, kind: EntityKind) -> &TableSchema {
        match kind {
            EntityKind::FlightPassenger => self.flight_passengers.schema(),
            EntityKind::FlightPilot => self.flight_pilots.schema(),
            EntityKind::Pilot => self.pilots.schema(),
            EntityKind::Customer => self.customers.schema(),
            EntityKind::Aircraft => self.aircrafts.schema(),
            EntityKind::Airport => self.airports.schema(),
            EntityKind::Terminal => self.terminals.schema(),
            EntityKind::Flight => self.flights.schema(),
        }
    }

    /// Every row of any table, in display shape.
    pub fn list(&self, kind: EntityKind) -> DbResult<RecordBatch> {
        match kind {
            EntityKind::FlightPassenger => {
                Ok(RecordBatch::from_records(&self.flight_passengers.get_all()?))
            }
            EntityKind::FlightPilot => Ok(RecordBatch::from_records(&self.flight_pilots.get_all()?)),
            _ => self.entity_table(kind)?.get_all_batch(),
        }
    }

    /// Check raw input against a column of any table.
    pub fn validate(&self, kind: EntityKind, label: &str, raw: &str) -> DbResult<()> {
        self.schema(kind).validate(label, raw, self)
    }

    /// Change one column of a single-id row.
    ///
    /// Capacity changes are refused with `Conflict` when a booked seat would
    /// fall outside the new capacity, whether the aircraft shrinks or a
    /// flight moves to a smaller one.
    pub fn update(&self, kind: EntityKind, id: RowId, label: &str, value: &str) -> DbResult<RecordBatch> {
        let table = self.entity_table(kind)?;
        let column = table.schema().settable_column(label)?;
        match column.name {
            "aircrafts.max_passengers" => {
                if let Ok(capacity) = value.parse::<i64>() {
                    let highest = self.flight_passengers.highest_seat_on_aircraft(id)?;
                    check_capacity(capacity, highest, &format!("aircraft {id}"))?;
                }
            }
            "flights.aircraft_id" => {
                let aircraft = match value.parse::<RowId>() {
                    Ok(aircraft_id) => self.aircrafts.get_by_id(aircraft_id)?,
                    Err(_) => None,
                };
                if let Some(aircraft) = aircraft {
                    let highest = self.flight_passengers.highest_seat(id)?;
                    check_capacity(aircraft.max_passengers, highest, &format!("flight {id}"))?;
                }
            }
            _ => {}
        }
        table.update_batch(id, label, value)
    }

    /// `NotFound` unless the id exists in its table.
    pub fn require(&self, kind: EntityKind, id: RowId) -> DbResult<()> {
        if self.exists(kind, id)? {
            Ok(())
        } else {
            Err(DbError::NotFound(format!("{} {id} does not exist", kind.noun())))
        }
    }

    /// Put a pilot on a flight.
    pub fn assign_pilot(&self, flight_id: RowId, pilot_id: RowId) -> DbResult<FlightPilot> {
        self.require(EntityKind::Flight, flight_id)?;
        self.require(EntityKind::Pilot, pilot_id)?;
        if self.flight_pilots.exists(flight_id, pilot_id)? {
            warn!(flight_id, pilot_id, "pilot already assigned");
            return Err(DbError::Conflict(format!(
                "pilot {pilot_id} is already on flight {flight_id}"
            )));
        }
        self.flight_pilots.insert(&FlightPilot {
            flight_id,
            pilot_id,
        })
    }

    /// Book a customer onto a flight, either in the lowest free seat or in a
    /// specific one.
    pub fn assign_passenger(
        &self,
        flight_id: RowId,
        customer_id: RowId,
        request: SeatRequest,
    ) -> DbResult<SeatAssignment> {
        self.require(EntityKind::Flight, flight_id)?;
        self.require(EntityKind::Customer, customer_id)?;
        if self.flight_passengers.exists(flight_id, customer_id)? {
            warn!(flight_id, customer_id, "customer already booked");
            return Err(DbError::Conflict(format!(
                "customer {customer_id} is already on flight {flight_id}"
            )));
        }

        let seat_number = match request {
            SeatRequest::Next => match self.flight_passengers.get_next_available_seat(flight_id)? {
                Some(seat) => seat,
                None => {
                    warn!(flight_id, customer_id, "flight is full");
                    return Ok(SeatAssignment::FlightFull);
                }
            },
            SeatRequest::Exact(seat) => {
                self.check_seat(flight_id, seat)?;
                seat
            }
        };

        let row = self.flight_passengers.insert(&FlightPassenger {
            flight_id,
            customer_id,
            seat_number,
        })?;
        Ok(SeatAssignment::Seated(row))
    }

    /// Move a booked passenger to another free seat, either the lowest free
    /// one or a specific one.
    pub fn reassign_seat(
        &self,
        flight_id: RowId,
        customer_id: RowId,
        request: SeatRequest,
    ) -> DbResult<SeatAssignment> {
        self.require(EntityKind::Flight, flight_id)?;
        if !self.flight_passengers.exists(flight_id, customer_id)? {
            return Err(DbError::NotFound(format!(
                "customer {customer_id} is not on flight {flight_id}"
            )));
        }

        let seat_number = match request {
            SeatRequest::Next => match self.flight_passengers.get_next_available_seat(flight_id)? {
                Some(seat) => seat,
                None => {
                    warn!(flight_id, customer_id, "no free seat to move to");
                    return Ok(SeatAssignment::FlightFull);
                }
            },
            SeatRequest::Exact(seat) => {
                self.check_seat(flight_id, seat)?;
                seat
            }
        };

        let row = self
            .flight_passengers
            .update_seat_number(flight_id, customer_id, seat_number)?;
        Ok(SeatAssignment::Seated(row))
    }

    fn check_seat(&self, flight_id: RowId, seat_number: SeatNumber) -> DbResult<()> {
        let capacity = self.flight_passengers.get_max_passengers(flight_id)?;
        if !(1..=capacity).contains(&seat_number) {
            return Err(DbError::Validation(format!(
                "Seat number must be between 1 and {capacity} inclusive."
            )));
        }
        if !self.flight_passengers.is_seat_available(flight_id, seat_number)? {
            warn!(flight_id, seat_number, "seat already taken");
            return Err(DbError::Conflict(format!(
                "seat {seat_number} on flight {flight_id} is already taken"
            )));
        }
        Ok(())
    }

    /// Take a pilot off a flight and return the remaining crew.
    pub fn unassign_pilot(&self, flight_id: RowId, pilot_id: RowId) -> DbResult<Vec<Pilot>> {
        self.require(EntityKind::Flight, flight_id)?;
        if !self.flight_pilots.exists(flight_id, pilot_id)? {
            return Err(DbError::NotFound(format!(
                "pilot {pilot_id} is not on flight {flight_id}"
            )));
        }
        self.flight_pilots.delete_and_return(flight_id, pilot_id)
    }

    /// Take a passenger off a flight and return the remaining passengers.
    pub fn unassign_passenger(&self, flight_id: RowId, customer_id: RowId) -> DbResult<Vec<Customer>> {
        self.require(EntityKind::Flight, flight_id)?;
        if !self.flight_passengers.exists(flight_id, customer_id)? {
            return Err(DbError::NotFound(format!(
                "customer {customer_id} is not on flight {flight_id}"
            )));
        }
        self.flight_passengers.delete_and_return(flight_id, customer_id)
    }

    pub fn crew(&self, flight_id: RowId) -> DbResult<Vec<Pilot>> {
        self.require(EntityKind::Flight, flight_id)?;
        self.flight_pilots.get(flight_id)
    }

    pub fn passengers(&self, flight_id: RowId) -> DbResult<Vec<Customer>> {
        self.require(EntityKind::Flight, flight_id)?;
        self.flight_passengers.get(flight_id)
    }

    pub fn stats(&self) -> Statistics<'_, 'c> {
        Statistics::new(self)
    }
}

fn check_capacity(capacity: i64, highest: Option<SeatNumber>, subject: &str) -> DbResult<()> {
    match highest {
        Some(seat) if seat > capacity => {
            warn!(capacity, seat, "capacity below a booked seat");
            Err(DbError::Conflict(format!(
                "{subject} has a passenger in seat {seat}, above the new capacity of {capacity}"
            )))
        }
        _ => Ok(()),
    }
}

impl Lookup for Airline<'_> {
    fn exists(&self, kind: EntityKind, id: RowId) -> DbResult<bool> {
        match self.table(kind) {
            Some(table) => table.exists(id),
            None => Err(DbError::Catalog(format!(
                "{kind} rows are not addressed by a single id"
            ))),
        }
    }
}
