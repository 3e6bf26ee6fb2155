use std::error::Error;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, span, warn, Instrument, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::api::OsrmRouteClient;
use crate::config::{constant::SEED, AppConfig};
use crate::database::sqlx::db_connection;
use crate::database::SqliteVehicleRegistry;
use crate::domain::{AllocationOutcome, Indent};
use crate::fixtures::{
    daughter_stations, filling_stations, generate_random_indents, generate_vehicle_requests,
    read_indents_csv, read_vehicle_requests_csv,
};
use crate::render::{plan_route_jobs, visualize_assignments};
use crate::report::{print_results, result_rows, save_to_csv};
use crate::setup::{attach_indents, resolve_vehicles, RunInput, VehicleRequest};

use super::matcher::allocate;

/// Initialize tracing and environment
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE)
                .pretty(),
        )
        .init();
}

fn load_indents(config: &AppConfig) -> Result<Vec<Indent>, Box<dyn Error>> {
    match &config.indents_csv {
        Some(path) => Ok(read_indents_csv(path)?),
        None => {
            warn!("LCV_INDENTS_CSV not set, generating random indents");
            Ok(generate_random_indents(&daughter_stations(), SEED))
        }
    }
}

async fn load_vehicle_requests(
    config: &AppConfig,
    registry: &SqliteVehicleRegistry,
) -> Result<Vec<VehicleRequest>, Box<dyn Error>> {
    if let Some(path) = &config.fleet_csv {
        return Ok(read_vehicle_requests_csv(path)?);
    }

    warn!("LCV_FLEET_CSV not set, placing every registered LCV at a random position");
    let ids: Vec<_> = registry
        .list_vehicles()
        .await?
        .into_iter()
        .map(|r| r.id)
        .collect();
    if ids.is_empty() {
        return Err("vehicle registry is empty, run populate-lcvs first".into());
    }
    Ok(generate_vehicle_requests(&ids, SEED))
}

/// Load inputs, allocate, render route maps, and write the results sheet.
pub async fn run() -> Result<Vec<AllocationOutcome>, Box<dyn Error>> {
    let started = Utc::now();
    let config = AppConfig::from_env();
    let pool = db_connection(&config.database_url).await?;
    let registry = SqliteVehicleRegistry::new(pool);

    let input = async {
        let indents = load_indents(&config)?;
        let requests = load_vehicle_requests(&config, &registry).await?;
        let vehicles = resolve_vehicles(&registry, &requests).await?;
        let demands = attach_indents(&daughter_stations(), &indents)?;
        let input = RunInput::new(vehicles, filling_stations(), demands, config.engine)?;
        Ok::<_, Box<dyn Error>>(input)
    }
    .instrument(span!(Level::INFO, "load_inputs"))
    .await?;

    let outcomes = allocate(&input);

    let jobs = plan_route_jobs(&input, &outcomes);
    let route_maps = visualize_assignments(
        Arc::new(OsrmRouteClient::new(config.osrm_base_url.clone())),
        config.map_dir.clone(),
        jobs,
        outcomes.len(),
    )
    .instrument(span!(Level::INFO, "visualize"))
    .await;

    let rows = result_rows(&outcomes, &route_maps);
    print_results(&rows);
    save_to_csv(&rows, &config.results_csv)?;

    info!(
        "Run finished in {} ms",
        (Utc::now() - started).num_milliseconds()
    );
    Ok(outcomes)
}
