//! Aggregate reports over flights, passengers and crews.
//!
//! Reports that depend on the current time take an `as_of` timestamp in
//! `YYYY-MM-DD HH:MM:SS` form instead of reading the store's clock.

use common::{DbResult, Tabular};
use rusqlite::{Row, params};
use serde::Serialize;
use types::{EntityKind, RowId};

use crate::airline::Airline;
use crate::entity::conversion_error;

/// `strftime('%w')` numbering.
const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

fn weekday(row: &Row<'_>, idx: usize) -> rusqlite::Result<&'static str> {
    let code: String = row.get(idx)?;
    code.parse::<usize>()
        .ok()
        .and_then(|day| WEEKDAYS.get(day).copied())
        .ok_or_else(|| conversion_error(idx, format!("unknown weekday {code}")))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlightsPerWeek {
    pub year: String,
    pub week: String,
    pub flights: i64,
}

impl Tabular for FlightsPerWeek {
    fn headers() -> Vec<&'static str> {
        vec!["Year", "Week Number", "Number of Flights"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.year.clone(), self.week.clone(), self.flights.to_string()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlightsPerMonth {
    pub year: String,
    pub month: String,
    pub flights: i64,
}

impl Tabular for FlightsPerMonth {
    fn headers() -> Vec<&'static str> {
        vec!["Year", "Month", "Number of Flights"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.year.clone(), self.month.clone(), self.flights.to_string()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CustomersByWeekday {
    pub day: &'static str,
    pub customers: i64,
}

impl Tabular for CustomersByWeekday {
    fn headers() -> Vec<&'static str> {
        vec!["Day of Week", "Number of Customers"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.day.to_string(), self.customers.to_string()]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AirTime {
    pub hours: f64,
}

impl Tabular for AirTime {
    fn headers() -> Vec<&'static str> {
        vec!["Time in the Air (hours)"]
    }

    fn cells(&self) -> Vec<String> {
        vec![format!("{:.2}", self.hours)]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlightsByWeekday {
    pub day: &'static str,
    pub flights: i64,
}

impl Tabular for FlightsByWeekday {
    fn headers() -> Vec<&'static str> {
        vec!["Day of Week", "Number of Flights"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.day.to_string(), self.flights.to_string()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DestinationPopularity {
    pub destination: String,
    pub passengers: i64,
}

impl Tabular for DestinationPopularity {
    fn headers() -> Vec<&'static str> {
        vec!["Destination", "Number of Passengers"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.destination.clone(), self.passengers.to_string()]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeatOccupancy {
    pub flight_id: RowId,
    pub aircraft_id: RowId,
    pub airport_name: String,
    pub terminal_name: String,
    pub boarding_time: String,
    pub destination: String,
    pub percentage: f64,
}

impl Tabular for SeatOccupancy {
    fn headers() -> Vec<&'static str> {
        vec![
            "Flight ID",
            "Aircraft ID",
            "Airport Name",
            "Terminal Name",
            "Boarding Time",
            "Destination",
            "Percentage",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.flight_id.to_string(),
            self.aircraft_id.to_string(),
            self.airport_name.clone(),
            self.terminal_name.clone(),
            self.boarding_time.clone(),
            self.destination.clone(),
            format!("{:.2}", self.percentage),
        ]
    }
}

/// A person with the number of flights they are on. Used for both pilots and
/// customers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlightCount {
    pub id: RowId,
    pub first_name: String,
    pub last_name: String,
    pub flights: i64,
}

impl FlightCount {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            flights: row.get(3)?,
        })
    }
}

impl Tabular for FlightCount {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "First Name", "Last Name", "Number of Flights"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.flights.to_string(),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlightLoad {
    pub flight_id: RowId,
    pub destination: String,
    pub max_passengers: i64,
    pub passengers: i64,
    pub percentage: f64,
}

impl Tabular for FlightLoad {
    fn headers() -> Vec<&'static str> {
        vec![
            "Flight ID",
            "Destination",
            "Max Passengers",
            "Current No. Passengers",
            "Percentage",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.flight_id.to_string(),
            self.destination.clone(),
            self.max_passengers.to_string(),
            self.passengers.to_string(),
            format!("{:.2}", self.percentage),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlightCrewSize {
    pub flight_id: RowId,
    pub destination: String,
    pub pilots: i64,
}

impl Tabular for FlightCrewSize {
    fn headers() -> Vec<&'static str> {
        vec!["Flight ID", "Destination", "Number of Pilots"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.flight_id.to_string(),
            self.destination.clone(),
            self.pilots.to_string(),
        ]
    }
}

/// Report runner borrowing the airline's repositories.
pub struct Statistics<'a, 'c> {
    airline: &'a Airline<'c>,
}

impl<'a, 'c> Statistics<'a, 'c> {
    pub fn new(airline: &'a Airline<'c>) -> Self {
        Self { airline }
    }

    /// Flights per calendar week of arrival, latest first.
    pub fn flights_per_week(&self) -> DbResult<Vec<FlightsPerWeek>> {
        self.airline.store().query_rows(
            "SELECT strftime('%Y', arrival_time) AS year, strftime('%W', arrival_time) AS week,
                COUNT(flight_id) AS num_of_flights
            FROM flights
            GROUP BY year, week
            ORDER BY year DESC, week DESC",
            [],
            "count flights per week",
            |row| {
                Ok(FlightsPerWeek {
                    year: row.get(0)?,
                    week: row.get(1)?,
                    flights: row.get(2)?,
                })
            },
        )
    }

    /// Flights to one destination per month of arrival, latest first.
    pub fn flights_per_month(&self, destination: &str) -> DbResult<Vec<FlightsPerMonth>> {
        self.airline.store().query_rows(
            "SELECT strftime('%Y', arrival_time) AS year, strftime('%m', arrival_time) AS month,
                COUNT(flight_id) AS num_of_flights
            FROM flights
            WHERE destination = ?1
            GROUP BY year, month
            ORDER BY year DESC, month DESC",
            [destination],
            "count flights to a destination per month",
            |row| {
                Ok(FlightsPerMonth {
                    year: row.get(0)?,
                    month: row.get(1)?,
                    flights: row.get(2)?,
                })
            },
        )
    }

    /// Days of the week by number of customers boarding, busiest first.
    pub fn busiest_weekdays(&self) -> DbResult<Vec<CustomersByWeekday>> {
        self.airline.store().query_rows(
            "SELECT strftime('%w', boarding_time) AS day_of_week, COUNT(customer_id) AS num_of_customers
            FROM flights
            LEFT JOIN flight_passengers ON flights.flight_id = flight_passengers.flight_id
            GROUP BY day_of_week
            ORDER BY num_of_customers DESC, day_of_week ASC",
            [],
            "rank days of the week",
            |row| {
                Ok(CustomersByWeekday {
                    day: weekday(row, 0)?,
                    customers: row.get(1)?,
                })
            },
        )
    }

    /// Hours a pilot has spent flying on flights that arrived by `as_of`.
    /// `None` when there are no such flights.
    pub fn pilot_air_time(&self, pilot_id: RowId, as_of: &str) -> DbResult<Option<AirTime>> {
        self.airline.require(EntityKind::Pilot, pilot_id)?;
        let seconds = self.airline.store().query_one(
            "SELECT SUM(CAST(strftime('%s', arrival_time) AS INTEGER)
                    - CAST(strftime('%s', departure_time) AS INTEGER))
            FROM flights
            JOIN flight_pilots ON flights.flight_id = flight_pilots.flight_id
            WHERE flight_pilots.pilot_id = ?1 AND arrival_time <= ?2",
            params![pilot_id, as_of],
            "read the pilot's air time",
            |row| row.get::<_, Option<i64>>(0),
        )?;
        Ok(seconds.map(|seconds| AirTime {
            hours: round2(seconds as f64 / 3600.0),
        }))
    }

    /// A pilot's days of the week by number of flights, busiest first.
    pub fn pilot_weekdays(&self, pilot_id: RowId) -> DbResult<Vec<FlightsByWeekday>> {
        self.airline.require(EntityKind::Pilot, pilot_id)?;
        self.airline.store().query_rows(
            "SELECT strftime('%w', boarding_time) AS day_of_week,
                COUNT(flight_pilots.flight_id) AS num_of_flights
            FROM flights
            JOIN flight_pilots ON flights.flight_id = flight_pilots.flight_id
            WHERE flight_pilots.pilot_id = ?1
            GROUP BY day_of_week
            ORDER BY num_of_flights DESC, day_of_week ASC",
            [pilot_id],
            "rank the pilot's days of the week",
            |row| {
                Ok(FlightsByWeekday {
                    day: weekday(row, 0)?,
                    flights: row.get(1)?,
                })
            },
        )
    }

    /// Destinations by total passengers, most popular first.
    pub fn popular_destinations(&self) -> DbResult<Vec<DestinationPopularity>> {
        self.airline.store().query_rows(
            "SELECT destination, COUNT(customer_id) AS num_of_passengers
            FROM flights
            LEFT JOIN flight_passengers ON flights.flight_id = flight_passengers.flight_id
            GROUP BY destination
            ORDER BY num_of_passengers DESC, destination ASC",
            [],
            "rank destinations",
            |row| {
                Ok(DestinationPopularity {
                    destination: row.get(0)?,
                    passengers: row.get(1)?,
                })
            },
        )
    }

    /// Flights boarding at or after `as_of` by percentage of seats taken,
    /// fullest first.
    pub fn upcoming_occupancy(&self, as_of: &str) -> DbResult<Vec<SeatOccupancy>> {
        self.airline.store().query_rows(
            "SELECT flights.flight_id, flights.aircraft_id, airports.name, terminals.name,
                flights.boarding_time, flights.destination,
                COUNT(flight_passengers.customer_id) * 100.0 / aircrafts.max_passengers AS percentage
            FROM flights
            LEFT JOIN flight_passengers ON flights.flight_id = flight_passengers.flight_id
            JOIN aircrafts ON flights.aircraft_id = aircrafts.aircraft_id
            JOIN terminals ON flights.terminal_id = terminals.terminal_id
            JOIN airports ON terminals.airport_id = airports.airport_id
            WHERE flights.boarding_time >= ?1
            GROUP BY flights.flight_id
            ORDER BY percentage DESC, flights.flight_id ASC",
            [as_of],
            "rank upcoming flights by occupancy",
            |row| {
                Ok(SeatOccupancy {
                    flight_id: row.get(0)?,
                    aircraft_id: row.get(1)?,
                    airport_name: row.get(2)?,
                    terminal_name: row.get(3)?,
                    boarding_time: row.get(4)?,
                    destination: row.get(5)?,
                    percentage: round2(row.get(6)?),
                })
            },
        )
    }

    /// Every pilot with their number of flights, busiest first.
    pub fn pilots_by_flights(&self) -> DbResult<Vec<FlightCount>> {
        self.airline.store().query_rows(
            "SELECT pilots.pilot_id, pilots.first_name, pilots.last_name,
                COUNT(flight_pilots.flight_id) AS num_of_flights
            FROM pilots
            LEFT JOIN flight_pilots ON flight_pilots.pilot_id = pilots.pilot_id
            GROUP BY pilots.pilot_id
            ORDER BY num_of_flights DESC, pilots.pilot_id ASC",
            [],
            "rank pilots by flights",
            FlightCount::from_row,
        )
    }

    /// Every customer with their number of flights, most frequent first.
    pub fn customers_by_flights(&self) -> DbResult<Vec<FlightCount>> {
        self.airline.store().query_rows(
            "SELECT customers.customer_id, customers.first_name, customers.last_name,
                COUNT(flight_passengers.flight_id) AS num_of_flights
            FROM customers
            LEFT JOIN flight_passengers ON flight_passengers.customer_id = customers.customer_id
            GROUP BY customers.customer_id
            ORDER BY num_of_flights DESC, customers.customer_id ASC",
            [],
            "rank customers by flights",
            FlightCount::from_row,
        )
    }

    pub fn flight_load(&self, flight_id: RowId) -> DbResult<FlightLoad> {
        self.airline.require(EntityKind::Flight, flight_id)?;
        self.airline.store().query_one(
            "SELECT flights.flight_id, flights.destination, aircrafts.max_passengers,
                COUNT(flight_passengers.customer_id) AS num_of_passengers
            FROM flights
            JOIN aircrafts ON flights.aircraft_id = aircrafts.aircraft_id
            LEFT JOIN flight_passengers ON flights.flight_id = flight_passengers.flight_id
            WHERE flights.flight_id = ?1
            GROUP BY flights.flight_id",
            [flight_id],
            "count passengers on the flight",
            |row| {
                let max_passengers: i64 = row.get(2)?;
                let passengers: i64 = row.get(3)?;
                Ok(FlightLoad {
                    flight_id: row.get(0)?,
                    destination: row.get(1)?,
                    max_passengers,
                    passengers,
                    percentage: round2(passengers as f64 * 100.0 / max_passengers as f64),
                })
            },
        )
    }

    pub fn flight_crew_size(&self, flight_id: RowId) -> DbResult<FlightCrewSize> {
        self.airline.require(EntityKind::Flight, flight_id)?;
        self.airline.store().query_one(
            "SELECT flights.flight_id, flights.destination, COUNT(flight_pilots.pilot_id) AS num_of_pilots
            FROM flights
            LEFT JOIN flight_pilots ON flights.flight_id = flight_pilots.flight_id
            WHERE flights.flight_id = ?1
            GROUP BY flights.flight_id",
            [flight_id],
            "count pilots on the flight",
            |row| {
                Ok(FlightCrewSize {
                    flight_id: row.get(0)?,
                    destination: row.get(1)?,
                    pilots: row.get(2)?,
                })
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round2(2.0 / 3.0 * 100.0), 66.67);
        assert_eq!(round2(1.5), 1.5);
    }

    #[test]
    fn weekday_numbering_starts_on_sunday() {
        assert_eq!(WEEKDAYS[0], "Sunday");
        assert_eq!(WEEKDAYS[6], "Saturday");
    }

    #[test]
    fn percentages_render_with_two_decimals() {
        let load = FlightLoad {
            flight_id: 1,
            destination: "Lisbon".into(),
            max_passengers: 3,
            passengers: 1,
            percentage: 33.33,
        };
        assert_eq!(load.cells()[4], "33.33");
    }
}
