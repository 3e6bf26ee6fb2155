use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;
use tokio::task;
use tracing::{error, info, span, warn, Instrument, Level};

use crate::api::{RouteError, RouteGeometryService};
use crate::domain::{AllocationOutcome, Coordinates, VehicleId};
use crate::render::map::{render_route_map_html, route_map_file_name, save_route_map, RenderError};
use crate::setup::RunInput;

#[derive(Debug, Error)]
pub enum VisualizationError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// The three stops of one committed assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteJob {
    pub outcome_index: usize,
    pub lcv_id: VehicleId,
    pub daughter_station: String,
    pub origin: Coordinates,
    pub loading_station: Coordinates,
    pub destination: Coordinates,
}

pub fn plan_route_jobs(input: &RunInput, outcomes: &[AllocationOutcome]) -> Vec<RouteJob> {
    outcomes
        .iter()
        .enumerate()
        .filter_map(|(outcome_index, outcome)| {
            let assignment = outcome.assignment()?;
            Some(RouteJob {
                outcome_index,
                lcv_id: assignment.lcv_id,
                daughter_station: assignment.daughter_station.clone(),
                origin: input.vehicle(assignment.lcv_id)?.coords,
                loading_station: input.station(&assignment.filling_station)?.coords,
                destination: input.demand_point(&assignment.daughter_station)?.coords,
            })
        })
        .collect()
}

async fn visualize_one<S: RouteGeometryService>(
    service: &S,
    map_dir: &Path,
    job: &RouteJob,
) -> Result<String, VisualizationError> {
    let geometry = service
        .fetch_route(job.origin, job.loading_station, job.destination)
        .await?;
    let title = format!("LCV {} to {}", job.lcv_id, job.daughter_station);
    let html = render_route_map_html(
        &title,
        &geometry,
        job.origin,
        job.loading_station,
        job.destination,
    )?;
    let file_name = route_map_file_name(job.lcv_id, &job.daughter_station);
    save_route_map(map_dir, &file_name, &html).await?;
    Ok(file_name)
}

/// Fetch and render a route map for every job concurrently.
///
/// The result is indexed like the allocation outcomes: `Some(file name)` where a
/// map was written, `None` for unmatched demand or a failed route/render.
pub async fn visualize_assignments<S: RouteGeometryService>(
    service: Arc<S>,
    map_dir: PathBuf,
    jobs: Vec<RouteJob>,
    outcome_count: usize,
) -> Vec<Option<String>> {
    let job_count = jobs.len();
    let tasks: Vec<_> = jobs
        .into_iter()
        .map(|job| {
            let service = Arc::clone(&service);
            let map_dir = map_dir.clone();
            let job_span = span!(Level::DEBUG, "route_map", lcv = job.lcv_id);
            task::spawn(
                async move {
                    let result = visualize_one(service.as_ref(), &map_dir, &job).await;
                    (job, result)
                }
                .instrument(job_span),
            )
        })
        .collect();

    let mut maps = vec![None; outcome_count];
    for joined in join_all(tasks).await {
        match joined {
            Ok((job, Ok(file_name))) => {
                if let Some(slot) = maps.get_mut(job.outcome_index) {
                    *slot = Some(file_name);
                }
            }
            Ok((job, Err(e))) => {
                warn!(
                    "No route map for LCV {} to {}: {}",
                    job.lcv_id, job.daughter_station, e
                );
            }
            Err(e) => error!("Route map task failed: {}", e),
        }
    }

    info!(
        "Rendered {} of {} route maps",
        maps.iter().filter(|m| m.is_some()).count(),
        job_count
    );
    maps
}
