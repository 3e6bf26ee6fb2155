use serde::Serialize;

use crate::config::EngineParams;
use crate::distance::haversine_km;
use crate::domain::{DemandPoint, SupplyStation, Vehicle};
use crate::evaluation::filling::{filling_minutes, travel_minutes};

/// Minutes spent on each leg of a candidate delivery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeBreakdown {
    pub travel_to_station: f64,
    pub filling: f64,
    pub station_wait: f64,
    pub travel_to_demand: f64,
    pub total: f64,
    /// The vehicle reached the station before its queue cleared.
    pub queued: bool,
}

/// Combine the legs into a total time.
///
/// A vehicle that arrives strictly before the accumulated wait has elapsed is
/// absorbed into the queue: its own travel and filling are not added on top of
/// the wait. Ties go to the additive branch.
pub fn queue_overlap_total(
    travel_to_station: f64,
    filling: f64,
    station_wait: f64,
    travel_to_demand: f64,
) -> (f64, bool) {
    if travel_to_station < station_wait {
        (station_wait + travel_to_demand, true)
    } else {
        (travel_to_station + filling + travel_to_demand, false)
    }
}

/// Cost of sending `vehicle` through `station` to `demand`, with `committed`
/// fillings already queued at the station in this run.
pub fn evaluate_candidate(
    vehicle: &Vehicle,
    station: &SupplyStation,
    demand: &DemandPoint,
    committed: usize,
    params: &EngineParams,
) -> TimeBreakdown {
    let travel_to_station = travel_minutes(haversine_km(vehicle.coords, station.coords), params);
    let travel_to_demand = travel_minutes(haversine_km(station.coords, demand.coords), params);
    let filling = filling_minutes(vehicle.capacity, params);
    let station_wait = filling * committed as f64;

    let (total, queued) =
        queue_overlap_total(travel_to_station, filling, station_wait, travel_to_demand);

    TimeBreakdown {
        travel_to_station,
        filling,
        station_wait,
        travel_to_demand,
        total,
        queued,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;

    fn vehicle(capacity: f64, lat: f64, lon: f64) -> Vehicle {
        Vehicle {
            id: 1,
            capacity,
            coords: Coordinates::new(lat, lon),
        }
    }

    fn station(lat: f64, lon: f64) -> SupplyStation {
        SupplyStation {
            name: "CGS".into(),
            coords: Coordinates::new(lat, lon),
            filling_points: 5,
        }
    }

    fn demand(lat: f64, lon: f64) -> DemandPoint {
        DemandPoint {
            name: "Hakimpet".into(),
            coords: Coordinates::new(lat, lon),
            average_sales: 100.0,
        }
    }

    #[test]
    fn empty_queue_uses_additive_branch() {
        let b = evaluate_candidate(
            &vehicle(4000.0, 17.60, 78.50),
            &station(17.59705278, 78.54384722),
            &demand(17.54600556, 78.53618056),
            0,
            &EngineParams::default(),
        );
        assert!(!b.queued);
        assert_eq!(b.station_wait, 0.0);
        assert_eq!(b.filling, 800.0);
        assert_eq!(b.total, b.travel_to_station + b.filling + b.travel_to_demand);
    }

    #[test]
    fn vehicle_arriving_before_queue_clears_is_absorbed() {
        let b = evaluate_candidate(
            &vehicle(4000.0, 17.60, 78.54),
            &station(17.59705278, 78.54384722),
            &demand(17.54600556, 78.53618056),
            2,
            &EngineParams::default(),
        );
        assert!(b.queued);
        assert_eq!(b.station_wait, 1600.0);
        assert_eq!(b.total, b.station_wait + b.travel_to_demand);
    }

    #[test]
    fn tie_goes_to_additive_branch() {
        let (total, queued) = queue_overlap_total(10.0, 5.0, 10.0, 3.0);
        assert!(!queued);
        assert_eq!(total, 18.0);

        let (total, queued) = queue_overlap_total(9.999, 5.0, 10.0, 3.0);
        assert!(queued);
        assert_eq!(total, 13.0);
    }
}
