use std::fmt;

/// Surrogate key assigned by the store to a single-id entity.
pub type RowId = i64;

/// Seat position of a passenger on a flight, counted from 1.
pub type SeatNumber = i64;

/// Every table the airline schema persists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EntityKind {
    Pilot,
    Customer,
    Aircraft,
    Airport,
    Terminal,
    Flight,
    FlightPassenger,
    FlightPilot,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Pilot,
        EntityKind::Customer,
        EntityKind::Aircraft,
        EntityKind::Airport,
        EntityKind::Terminal,
        EntityKind::Flight,
        EntityKind::FlightPassenger,
        EntityKind::FlightPilot,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            EntityKind::Pilot => "pilots",
            EntityKind::Customer => "customers",
            EntityKind::Aircraft => "aircrafts",
            EntityKind::Airport => "airports",
            EntityKind::Terminal => "terminals",
            EntityKind::Flight => "flights",
            EntityKind::FlightPassenger => "flight_passengers",
            EntityKind::FlightPilot => "flight_pilots",
        }
    }

    /// Primary key column of a single-id table. Junction tables have none.
    pub fn id_column(self) -> Option<&'static str> {
        match self {
            EntityKind::Pilot => Some("pilot_id"),
            EntityKind::Customer => Some("customer_id"),
            EntityKind::Aircraft => Some("aircraft_id"),
            EntityKind::Airport => Some("airport_id"),
            EntityKind::Terminal => Some("terminal_id"),
            EntityKind::Flight => Some("flight_id"),
            EntityKind::FlightPassenger | EntityKind::FlightPilot => None,
        }
    }

    /// Singular noun used in user-facing messages.
    pub fn noun(self) -> &'static str {
        match self {
            EntityKind::Pilot => "pilot",
            EntityKind::Customer => "customer",
            EntityKind::Aircraft => "aircraft",
            EntityKind::Airport => "airport",
            EntityKind::Terminal => "terminal",
            EntityKind::Flight => "flight",
            EntityKind::FlightPassenger => "flight passenger",
            EntityKind::FlightPilot => "flight pilot",
        }
    }

    pub fn from_table_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.table_name().eq_ignore_ascii_case(name))
    }

    pub fn is_junction(self) -> bool {
        self.id_column().is_none()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Aircraft category, persisted as `1` (plane) or `2` (helicopter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AircraftType {
    Plane,
    Helicopter,
}

impl AircraftType {
    pub fn code(self) -> i64 {
        match self {
            AircraftType::Plane => 1,
            AircraftType::Helicopter => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(AircraftType::Plane),
            2 => Some(AircraftType::Helicopter),
            _ => None,
        }
    }
}

impl fmt::Display for AircraftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AircraftType::Plane => f.write_str("Plane"),
            AircraftType::Helicopter => f.write_str("Helicopter"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_resolve_back_to_kinds() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_table_name(kind.table_name()), Some(kind));
        }
        assert_eq!(EntityKind::from_table_name("FLIGHTS"), Some(EntityKind::Flight));
        assert_eq!(EntityKind::from_table_name("crew"), None);
    }

    #[test]
    fn only_junctions_lack_an_id_column() {
        assert!(EntityKind::FlightPilot.is_junction());
        assert!(EntityKind::FlightPassenger.is_junction());
        assert_eq!(EntityKind::Terminal.id_column(), Some("terminal_id"));
    }

    #[test]
    fn aircraft_type_codes() {
        assert_eq!(AircraftType::from_code(1), Some(AircraftType::Plane));
        assert_eq!(AircraftType::from_code(2), Some(AircraftType::Helicopter));
        assert_eq!(AircraftType::from_code(3), None);
        assert_eq!(AircraftType::Helicopter.code(), 2);
        assert_eq!(AircraftType::Plane.to_string(), "Plane");
    }

    #[test]
    fn kinds_serialize_by_name() {
        let json = serde_json::to_string(&EntityKind::FlightPilot).unwrap();
        assert_eq!(json, "\"FlightPilot\"");
    }
}
