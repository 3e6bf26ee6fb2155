use itertools::iproduct;
use tracing::{debug, info, span, trace, warn, Level};

use crate::config::EngineParams;
use crate::domain::{
    AllocationOutcome, Assignment, DemandPoint, DemandRequest, SupplyStation, UnmatchedDemand,
    Vehicle,
};
use crate::evaluation::cost::{evaluate_candidate, TimeBreakdown};
use crate::setup::RunInput;

use super::context::RunContext;

struct Candidate<'a> {
    vehicle: &'a Vehicle,
    station: &'a SupplyStation,
    queue_position: usize,
    breakdown: TimeBreakdown,
}

/// Demand points that take part in the run, highest average sales first.
/// The sort is stable, so equal priorities keep their input order.
pub fn prioritized_demands(demands: &[DemandRequest]) -> Vec<(&DemandPoint, f64)> {
    let mut active: Vec<(&DemandPoint, f64)> = demands
        .iter()
        .filter_map(|d| d.active_requirement().map(|r| (&d.point, r)))
        .collect();
    active.sort_by(|a, b| b.0.average_sales.total_cmp(&a.0.average_sales));
    active
}

/// Cheapest unused vehicle and station for one demand point.
/// Vehicles are scanned outer, stations inner; the first strictly smaller total wins.
fn best_candidate<'a>(
    ctx: &RunContext,
    vehicles: &'a [Vehicle],
    stations: &'a [SupplyStation],
    demand: &DemandPoint,
    requirement: f64,
    params: &EngineParams,
) -> Option<Candidate<'a>> {
    let eligible = vehicles
        .iter()
        .filter(|v| !ctx.is_used(v.id) && v.capacity >= requirement);

    let mut best: Option<Candidate<'a>> = None;
    for (vehicle, station) in iproduct!(eligible, stations.iter()) {
        let queue_position = ctx.queue_depth(&station.name);
        let breakdown = evaluate_candidate(vehicle, station, demand, queue_position, params);
        trace!(
            "LCV {} via {}: {:.2} min",
            vehicle.id,
            station.name,
            breakdown.total
        );

        if best
            .as_ref()
            .map_or(true, |b| breakdown.total < b.breakdown.total)
        {
            best = Some(Candidate {
                vehicle,
                station,
                queue_position,
                breakdown,
            });
        }
    }
    best
}

/// Allocate with a fresh run context.
pub fn allocate(input: &RunInput) -> Vec<AllocationOutcome> {
    let mut ctx = RunContext::new(input.stations());
    allocate_with_context(&mut ctx, input)
}

/// Greedy allocation: one outcome per demand point with an indent, in priority order.
pub fn allocate_with_context(ctx: &mut RunContext, input: &RunInput) -> Vec<AllocationOutcome> {
    let alloc_span = span!(Level::INFO, "allocate", lcvs = input.vehicles().len());
    let _guard = alloc_span.enter();

    let ordered = prioritized_demands(input.demands());
    let mut outcomes = Vec::with_capacity(ordered.len());

    for (demand, requirement) in ordered {
        match best_candidate(
            ctx,
            input.vehicles(),
            input.stations(),
            demand,
            requirement,
            input.params(),
        ) {
            Some(candidate) => {
                ctx.commit(candidate.vehicle.id, &candidate.station.name);
                debug!(
                    "LCV {} -> {} -> {} ({:.2} min, queue position {})",
                    candidate.vehicle.id,
                    candidate.station.name,
                    demand.name,
                    candidate.breakdown.total,
                    candidate.queue_position
                );
                outcomes.push(AllocationOutcome::Assigned(Assignment {
                    lcv_id: candidate.vehicle.id,
                    filling_station: candidate.station.name.clone(),
                    daughter_station: demand.name.clone(),
                    requirement,
                    total_time_min: candidate.breakdown.total,
                    queue_position: candidate.queue_position,
                    breakdown: candidate.breakdown,
                }));
            }
            None => {
                let unmatched = UnmatchedDemand {
                    daughter_station: demand.name.clone(),
                    requirement,
                };
                warn!("{unmatched}");
                outcomes.push(AllocationOutcome::Unmatched(unmatched));
            }
        }
    }

    info!(
        "Allocated {} of {} daughter stations using {} LCVs",
        outcomes.iter().filter(|o| o.is_assigned()).count(),
        outcomes.len(),
        ctx.used_count()
    );
    outcomes
}
