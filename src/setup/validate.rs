use std::collections::HashSet;

use crate::config::EngineParams;
use crate::domain::{Coordinates, DemandRequest, InputError, SupplyStation, Vehicle};

fn check_coords(entity: &'static str, name: String, coords: Coordinates) -> Result<(), InputError> {
    if coords.is_valid() {
        Ok(())
    } else {
        Err(InputError::InvalidCoordinates {
            entity,
            name,
            lat: coords.lat,
            lon: coords.lon,
        })
    }
}

/// Reject malformed run input before any allocation state exists.
pub fn validate_run(
    vehicles: &[Vehicle],
    stations: &[SupplyStation],
    demands: &[DemandRequest],
    params: &EngineParams,
) -> Result<(), InputError> {
    params.validate()?;

    let mut seen_ids = HashSet::new();
    for vehicle in vehicles {
        if !seen_ids.insert(vehicle.id) {
            return Err(InputError::DuplicateVehicle(vehicle.id));
        }
        if !(vehicle.capacity.is_finite() && vehicle.capacity > 0.0) {
            return Err(InputError::NonPositiveCapacity {
                id: vehicle.id,
                capacity: vehicle.capacity,
            });
        }
        check_coords("LCV", vehicle.id.to_string(), vehicle.coords)?;
    }

    let mut seen_stations = HashSet::new();
    for station in stations {
        if !seen_stations.insert(station.name.as_str()) {
            return Err(InputError::DuplicateStation(station.name.clone()));
        }
        check_coords("supply station", station.name.clone(), station.coords)?;
    }

    let mut seen_points = HashSet::new();
    for demand in demands {
        let point = &demand.point;
        if !seen_points.insert(point.name.as_str()) {
            return Err(InputError::DuplicateDemandPoint(point.name.clone()));
        }
        check_coords("daughter station", point.name.clone(), point.coords)?;
        if !point.average_sales.is_finite() {
            return Err(InputError::InvalidPriority {
                station: point.name.clone(),
                value: point.average_sales,
            });
        }
        if let Some(requirement) = demand.requirement {
            if !(requirement.is_finite() && requirement >= 0.0) {
                return Err(InputError::InvalidRequirement {
                    station: point.name.clone(),
                    requirement,
                });
            }
        }
    }

    Ok(())
}
