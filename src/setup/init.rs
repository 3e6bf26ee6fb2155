use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::EngineParams;
use crate::database::{RegistryError, VehicleRegistry};
use crate::domain::{
    Coordinates, DemandPoint, DemandRequest, Indent, InputError, SupplyStation, Vehicle, VehicleId,
};
use crate::setup::validate::validate_run;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// A vehicle dispatched for this run: registry id plus its current position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleRequest {
    pub lcv_id: VehicleId,
    pub coords: Coordinates,
}

/// Look up every requested vehicle in the registry. An unknown id rejects the run.
pub async fn resolve_vehicles<R>(
    registry: &R,
    requests: &[VehicleRequest],
) -> Result<Vec<Vehicle>, SetupError>
where
    R: VehicleRegistry,
{
    let mut vehicles = Vec::with_capacity(requests.len());
    for request in requests {
        match registry.find_vehicle(request.lcv_id).await? {
            Some(record) => {
                debug!(
                    "Retrieved LCV ID: {}, Coordinates: {}, {}",
                    record.id, request.coords.lat, request.coords.lon
                );
                vehicles.push(Vehicle {
                    id: record.id,
                    capacity: record.capacity,
                    coords: request.coords,
                });
            }
            None => {
                error!("LCV with ID {} not found", request.lcv_id);
                return Err(InputError::UnknownVehicle(request.lcv_id).into());
            }
        }
    }
    Ok(vehicles)
}

/// Pair each demand point with its indent for this run, leaving the point untouched.
/// Points without an indent get no requirement.
pub fn attach_indents(
    points: &[DemandPoint],
    indents: &[Indent],
) -> Result<Vec<DemandRequest>, InputError> {
    let mut by_station: HashMap<&str, Option<f64>> = HashMap::with_capacity(indents.len());
    for indent in indents {
        if !points.iter().any(|p| p.name == indent.station) {
            return Err(InputError::UnknownDemandPoint(indent.station.clone()));
        }
        if by_station
            .insert(indent.station.as_str(), indent.requirement)
            .is_some()
        {
            return Err(InputError::DuplicateIndent(indent.station.clone()));
        }
    }

    Ok(points
        .iter()
        .map(|point| {
            let requirement = by_station.get(point.name.as_str()).copied().flatten();
            DemandRequest::new(point.clone(), requirement)
        })
        .collect())
}

/// Validated input for one allocation run.
#[derive(Debug, Clone)]
pub struct RunInput {
    vehicles: Vec<Vehicle>,
    stations: Vec<SupplyStation>,
    demands: Vec<DemandRequest>,
    params: EngineParams,
}

impl RunInput {
    pub fn new(
        vehicles: Vec<Vehicle>,
        stations: Vec<SupplyStation>,
        demands: Vec<DemandRequest>,
        params: EngineParams,
    ) -> Result<Self, InputError> {
        validate_run(&vehicles, &stations, &demands, &params)?;
        info!(
            "Run input: {} LCVs, {} filling stations, {} daughter stations ({} with indents)",
            vehicles.len(),
            stations.len(),
            demands.len(),
            demands.iter().filter(|d| d.active_requirement().is_some()).count()
        );
        Ok(Self {
            vehicles,
            stations,
            demands,
            params,
        })
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn stations(&self) -> &[SupplyStation] {
        &self.stations
    }

    pub fn demands(&self) -> &[DemandRequest] {
        &self.demands
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn station(&self, name: &str) -> Option<&SupplyStation> {
        self.stations.iter().find(|s| s.name == name)
    }

    pub fn demand_point(&self, name: &str) -> Option<&DemandPoint> {
        self.demands
            .iter()
            .map(|d| &d.point)
            .find(|p| p.name == name)
    }
}
