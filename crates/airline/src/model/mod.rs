//! Row types for the eight airline tables and their descriptors.

mod aircraft;
mod airport;
mod customer;
mod flight;
mod flight_passenger;
mod flight_pilot;
mod pilot;
mod terminal;

pub use aircraft::Aircraft;
pub use airport::Airport;
pub use customer::Customer;
pub use flight::{Flight, FlightView};
pub use flight_passenger::FlightPassenger;
pub use flight_pilot::FlightPilot;
pub use pilot::Pilot;
pub use terminal::{Terminal, TerminalView};
