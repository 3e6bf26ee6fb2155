use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InputError;
use crate::evaluation::cost::TimeBreakdown;

pub type VehicleId = i64;

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// OSRM wants longitude,latitude in that order
    pub fn to_lon_lat(&self) -> String {
        format!("{},{}", self.lon, self.lat)
    }
}

// Parses the "lat,lon" form used by dispatch sheets.
impl FromStr for Coordinates {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InputError::MalformedCoordinates(s.to_string());
        let (lat, lon) = s.split_once(',').ok_or_else(malformed)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| malformed())?;
        let lon = lon.trim().parse::<f64>().map_err(|_| malformed())?;
        Ok(Coordinates { lat, lon })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub capacity: f64,
    pub coords: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyStation {
    pub name: String,
    pub coords: Coordinates,
    /// Dispensers on site. Informational only, the queue model is serial.
    pub filling_points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub name: String,
    pub coords: Coordinates,
    /// Historical average sales, used for ordering only.
    pub average_sales: f64,
}

/// Quantity requested by a daughter station for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indent {
    pub station: String,
    pub requirement: Option<f64>,
}

/// A demand point paired with the indent requested for this run.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandRequest {
    pub point: DemandPoint,
    pub requirement: Option<f64>,
}

impl DemandRequest {
    pub fn new(point: DemandPoint, requirement: Option<f64>) -> Self {
        Self { point, requirement }
    }

    /// The requirement when it takes part in matching; zero and absent indents do not.
    pub fn active_requirement(&self) -> Option<f64> {
        self.requirement.filter(|r| *r > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub lcv_id: VehicleId,
    pub filling_station: String,
    pub daughter_station: String,
    pub requirement: f64,
    pub total_time_min: f64,
    /// Number of fillings already committed at the station when this one was costed.
    pub queue_position: usize,
    pub breakdown: TimeBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedDemand {
    pub daughter_station: String,
    pub requirement: f64,
}

impl fmt::Display for UnmatchedDemand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No suitable LCV found for {}.", self.daughter_station)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AllocationOutcome {
    Assigned(Assignment),
    Unmatched(UnmatchedDemand),
}

impl AllocationOutcome {
    pub fn daughter_station(&self) -> &str {
        match self {
            AllocationOutcome::Assigned(a) => &a.daughter_station,
            AllocationOutcome::Unmatched(u) => &u.daughter_station,
        }
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            AllocationOutcome::Assigned(a) => Some(a),
            AllocationOutcome::Unmatched(_) => None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, AllocationOutcome::Assigned(_))
    }
}
