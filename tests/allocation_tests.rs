use std::collections::HashSet;

use lcv_alloc::config::EngineParams;
use lcv_alloc::domain::{
    AllocationOutcome, Coordinates, DemandPoint, DemandRequest, SupplyStation, Vehicle,
};
use lcv_alloc::fixtures::{
    daughter_stations, filling_stations, generate_random_indents, generate_random_vehicles,
};
use lcv_alloc::setup::{attach_indents, RunInput};
use lcv_alloc::solver::greedy::{allocate, allocate_with_context, prioritized_demands, RunContext};

fn vehicle(id: i64, capacity: f64, lat: f64, lon: f64) -> Vehicle {
    Vehicle {
        id,
        capacity,
        coords: Coordinates::new(lat, lon),
    }
}

fn cgs() -> SupplyStation {
    SupplyStation {
        name: "CGS".into(),
        coords: Coordinates::new(17.59705278, 78.54384722),
        filling_points: 5,
    }
}

fn demand(name: &str, average_sales: f64, lat: f64, lon: f64, requirement: f64) -> DemandRequest {
    DemandRequest::new(
        DemandPoint {
            name: name.into(),
            coords: Coordinates::new(lat, lon),
            average_sales,
        },
        Some(requirement),
    )
}

#[test]
fn single_vehicle_single_station_single_demand() {
    let input = RunInput::new(
        vec![vehicle(1, 4000.0, 17.55, 78.50)],
        vec![cgs()],
        vec![demand("Hakimpet", 100.0, 17.54600556, 78.53618056, 3000.0)],
        EngineParams::default(),
    )
    .unwrap();

    let outcomes = allocate(&input);
    assert_eq!(outcomes.len(), 1);
    let a = outcomes[0].assignment().expect("should be assigned");
    assert_eq!(a.lcv_id, 1);
    assert_eq!(a.filling_station, "CGS");
    assert_eq!(a.daughter_station, "Hakimpet");
    assert_eq!(a.queue_position, 0);
    assert_eq!(a.total_time_min, a.breakdown.total);
    assert!(a.total_time_min > 800.0);
}

#[test]
fn infeasible_high_priority_demand_does_not_block_feasible_one() {
    let input = RunInput::new(
        vec![vehicle(1, 4000.0, 17.55, 78.50)],
        vec![cgs()],
        vec![
            demand("Small", 100.0, 17.40, 78.49, 3000.0),
            demand("Large", 200.0, 17.35, 78.54, 5000.0),
        ],
        EngineParams::default(),
    )
    .unwrap();

    let outcomes = allocate(&input);
    assert_eq!(outcomes.len(), 2);
    match &outcomes[0] {
        AllocationOutcome::Unmatched(u) => {
            assert_eq!(u.daughter_station, "Large");
            assert_eq!(u.to_string(), "No suitable LCV found for Large.");
        }
        other => panic!("expected unmatched, got {other:?}"),
    }
    let a = outcomes[1].assignment().expect("small demand should be served");
    assert_eq!(a.daughter_station, "Small");
    assert_eq!(a.lcv_id, 1);
}

#[test]
fn second_demand_at_shared_station_sees_the_queue() {
    let input = RunInput::new(
        vec![
            vehicle(1, 4000.0, 17.58, 78.54),
            vehicle(2, 4000.0, 17.50, 78.45),
        ],
        vec![cgs()],
        vec![
            demand("First", 500.0, 17.45, 78.50, 2000.0),
            demand("Second", 500.0, 17.38, 78.48, 2000.0),
        ],
        EngineParams::default(),
    )
    .unwrap();

    let outcomes = allocate(&input);
    let first = outcomes[0].assignment().unwrap();
    let second = outcomes[1].assignment().unwrap();

    assert_eq!(first.daughter_station, "First");
    assert_eq!(second.daughter_station, "Second");
    assert_ne!(first.lcv_id, second.lcv_id);
    assert_eq!(first.queue_position, 0);
    assert_eq!(second.queue_position, 1);
    assert_eq!(first.breakdown.station_wait, 0.0);
    assert_eq!(second.breakdown.station_wait, 800.0);
    assert!(second.breakdown.station_wait > first.breakdown.station_wait);
}

#[test]
fn vehicles_exhausted_leaves_remaining_demand_unmatched() {
    let input = RunInput::new(
        vec![vehicle(1, 5000.0, 17.55, 78.50)],
        vec![cgs()],
        vec![
            demand("A", 300.0, 17.40, 78.49, 1000.0),
            demand("B", 200.0, 17.41, 78.48, 1000.0),
            demand("C", 100.0, 17.42, 78.47, 1000.0),
        ],
        EngineParams::default(),
    )
    .unwrap();

    let outcomes = allocate(&input);
    assert!(outcomes[0].is_assigned());
    assert!(!outcomes[1].is_assigned());
    assert!(!outcomes[2].is_assigned());
}

#[test]
fn shared_context_carries_queue_between_calls() {
    let input = RunInput::new(
        vec![vehicle(1, 4000.0, 17.59, 78.54)],
        vec![cgs()],
        vec![demand("A", 1.0, 17.45, 78.50, 1000.0)],
        EngineParams::default(),
    )
    .unwrap();

    let mut ctx = RunContext::new(input.stations());
    let first = allocate_with_context(&mut ctx, &input);
    assert!(first[0].is_assigned());
    assert_eq!(ctx.queue_depth("CGS"), 1);

    // The only vehicle is already used in this context.
    let second = allocate_with_context(&mut ctx, &input);
    assert!(!second[0].is_assigned());
    assert_eq!(ctx.queue_depth("CGS"), 1);
}

#[test]
fn invariants_hold_for_random_reference_runs() {
    let points = daughter_stations();
    for seed in 0..25_u64 {
        let vehicles = generate_random_vehicles(3 + (seed as usize % 12), seed);
        let indents = generate_random_indents(&points, seed + 100);
        let demands = attach_indents(&points, &indents).unwrap();
        let input = RunInput::new(
            vehicles.clone(),
            filling_stations(),
            demands.clone(),
            EngineParams::default(),
        )
        .unwrap();

        let outcomes = allocate(&input);

        let expected_order: Vec<&str> = prioritized_demands(&demands)
            .into_iter()
            .map(|(p, _)| p.name.as_str())
            .collect();
        let actual_order: Vec<&str> = outcomes.iter().map(|o| o.daughter_station()).collect();
        assert_eq!(actual_order, expected_order, "seed {seed}");

        let with_indent = demands
            .iter()
            .filter(|d| d.requirement.map_or(false, |r| r > 0.0))
            .count();
        assert_eq!(outcomes.len(), with_indent, "seed {seed}");

        let mut used = HashSet::new();
        for a in outcomes.iter().filter_map(|o| o.assignment()) {
            assert!(used.insert(a.lcv_id), "LCV {} used twice (seed {seed})", a.lcv_id);
            let capacity = vehicles.iter().find(|v| v.id == a.lcv_id).unwrap().capacity;
            assert!(capacity >= a.requirement, "seed {seed}");
        }

        assert_eq!(allocate(&input), outcomes, "rerun differs for seed {seed}");
    }
}
