use thiserror::Error;

use crate::domain::types::VehicleId;

/// Malformed run input. Any of these aborts the run before matching starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{entity} '{name}' has invalid coordinates ({lat}, {lon})")]
    InvalidCoordinates {
        entity: &'static str,
        name: String,
        lat: f64,
        lon: f64,
    },

    #[error("malformed coordinates '{0}', expected 'lat,lon'")]
    MalformedCoordinates(String),

    #[error("malformed number '{value}' in {field}")]
    MalformedNumber { field: &'static str, value: String },

    #[error("LCV with ID {0} not found")]
    UnknownVehicle(VehicleId),

    #[error("LCV {id} has non-positive capacity {capacity}")]
    NonPositiveCapacity { id: VehicleId, capacity: f64 },

    #[error("indent for '{station}' must be a non-negative number, got {requirement}")]
    InvalidRequirement { station: String, requirement: f64 },

    #[error("LCV {0} appears more than once")]
    DuplicateVehicle(VehicleId),

    #[error("supply station '{0}' appears more than once")]
    DuplicateStation(String),

    #[error("daughter station '{0}' appears more than once")]
    DuplicateDemandPoint(String),

    #[error("indent for daughter station '{0}' appears more than once")]
    DuplicateIndent(String),

    #[error("indent references unknown daughter station '{0}'")]
    UnknownDemandPoint(String),

    #[error("daughter station '{station}' has invalid average sales {value}")]
    InvalidPriority { station: String, value: f64 },

    #[error("{name} must be positive, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
