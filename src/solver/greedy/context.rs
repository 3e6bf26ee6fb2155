use std::collections::{HashMap, HashSet};

use crate::domain::{SupplyStation, VehicleId};

/// Mutable state of a single allocation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunContext {
    used_vehicles: HashSet<VehicleId>,
    station_queue: HashMap<String, usize>,
}

impl RunContext {
    pub fn new(stations: &[SupplyStation]) -> Self {
        Self {
            used_vehicles: HashSet::new(),
            station_queue: stations.iter().map(|s| (s.name.clone(), 0)).collect(),
        }
    }

    pub fn is_used(&self, id: VehicleId) -> bool {
        self.used_vehicles.contains(&id)
    }

    /// Fillings committed at `station` so far in this run.
    pub fn queue_depth(&self, station: &str) -> usize {
        self.station_queue.get(station).copied().unwrap_or(0)
    }

    pub fn used_count(&self) -> usize {
        self.used_vehicles.len()
    }

    /// Mark the vehicle used and push one filling onto the station queue.
    /// Returns the new queue depth.
    pub fn commit(&mut self, vehicle: VehicleId, station: &str) -> usize {
        self.used_vehicles.insert(vehicle);
        let depth = self.station_queue.entry(station.to_string()).or_insert(0);
        *depth += 1;
        *depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;

    #[test]
    fn commit_tracks_vehicles_and_queue_depth() {
        let stations = vec![SupplyStation {
            name: "CGS".into(),
            coords: Coordinates::new(17.59, 78.54),
            filling_points: 5,
        }];
        let mut ctx = RunContext::new(&stations);
        assert_eq!(ctx.queue_depth("CGS"), 0);
        assert!(!ctx.is_used(1));

        assert_eq!(ctx.commit(1, "CGS"), 1);
        assert_eq!(ctx.commit(2, "CGS"), 2);
        assert!(ctx.is_used(1) && ctx.is_used(2));
        assert_eq!(ctx.used_count(), 2);
        assert_eq!(ctx.queue_depth("CGS"), 2);
        assert_eq!(ctx.queue_depth("elsewhere"), 0);
    }
}
