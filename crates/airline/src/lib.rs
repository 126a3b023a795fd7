//! Airline operations records over SQLite.
//!
//! Seven entity kinds and two flight associations are described once as
//! column descriptors ([`entity`], [`model`]) and served by a generic
//! [`Repository`] and [`JunctionRepository`]. [`Airline`] wires them over a
//! single [`storage::Store`], answers foreign-key lookups for validators, and
//! runs the pilot and passenger assignment workflow. Seat allocation lives in
//! [`seats`]; reports in [`stats`].
//!
//! # Example
//!
//! ```
//! use airline::prelude::*;
//! use storage::Store;
//!
//! let store = Store::open_in_memory().unwrap();
//! let airline = Airline::new(&store).unwrap();
//! airline.create_tables().unwrap();
//!
//! let pilot = airline.pilots.insert(&["Amelia", "Earhart", "1897-07-24"]).unwrap();
//! assert!(airline.pilots.exists(pilot.pilot_id).unwrap());
//! ```

mod airline;
pub mod entity;
pub mod junction;
pub mod model;
pub mod repository;
pub mod seats;
pub mod stats;

pub use airline::{Airline, FlightPassengers, FlightPilots, SeatAssignment, SeatRequest};
pub use junction::JunctionRepository;
pub use repository::{AnyRepository, Repository};

pub mod prelude {
    pub use crate::entity::{Entity, Junction};
    pub use crate::model::*;
    pub use crate::{
        Airline, AnyRepository, FlightPassengers, FlightPilots, JunctionRepository, Repository,
        SeatAssignment, SeatRequest,
    };
    pub use common::prelude::*;
}
