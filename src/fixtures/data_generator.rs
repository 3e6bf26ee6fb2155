use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::domain::{Coordinates, DemandPoint, Indent, Vehicle, VehicleId};
use crate::setup::VehicleRequest;

const LAT_RANGE: (f64, f64) = (17.30, 17.65);
const LON_RANGE: (f64, f64) = (78.34, 78.56);
const CAPACITIES: [f64; 3] = [4000.0, 4500.0, 5000.0];

fn random_coords(rng: &mut ChaCha8Rng) -> Coordinates {
    Coordinates::new(
        rng.gen_range(LAT_RANGE.0..LAT_RANGE.1),
        rng.gen_range(LON_RANGE.0..LON_RANGE.1),
    )
}

/// Random positions around the service area for registered vehicles.
pub fn generate_vehicle_requests(ids: &[VehicleId], seed: u64) -> Vec<VehicleRequest> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    ids.iter()
        .map(|&lcv_id| VehicleRequest {
            lcv_id,
            coords: random_coords(&mut rng),
        })
        .collect()
}

/// A fleet of `count` vehicles with ids starting at 1.
pub fn generate_random_vehicles(count: usize, seed: u64) -> Vec<Vehicle> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|idx| Vehicle {
            id: idx as VehicleId + 1,
            capacity: CAPACITIES[rng.gen_range(0..CAPACITIES.len())],
            coords: random_coords(&mut rng),
        })
        .collect()
}

/// Indents for the given daughter stations. About a quarter are left blank and
/// requests fall between 1500 and 5500 kg in steps of 100.
pub fn generate_random_indents(points: &[DemandPoint], seed: u64) -> Vec<Indent> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let indents: Vec<Indent> = points
        .iter()
        .map(|point| {
            let requirement = if rng.gen_bool(0.25) {
                None
            } else {
                Some(f64::from(rng.gen_range(15..=55_u32)) * 100.0)
            };
            Indent {
                station: point.name.clone(),
                requirement,
            }
        })
        .collect();

    let total: f64 = indents.iter().filter_map(|i| i.requirement).sum();
    info!(
        "Generated {} indents ({} blank), total demand {}",
        indents.len(),
        indents.iter().filter(|i| i.requirement.is_none()).count(),
        total
    );
    indents
}
