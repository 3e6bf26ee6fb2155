use std::path::Path;

use colored::Colorize;
use csv::Writer;
use serde::Serialize;
use tracing::info;

use crate::domain::{AllocationOutcome, VehicleId};

/// One line of the results sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub lcv_id: Option<VehicleId>,
    pub filling_station: Option<String>,
    pub daughter_station: String,
    pub total_time_min: Option<f64>,
    pub route_map: Option<String>,
    pub requirement: f64,
    pub message: Option<String>,
}

/// Flatten outcomes and their optional route maps into rows.
pub fn result_rows(outcomes: &[AllocationOutcome], route_maps: &[Option<String>]) -> Vec<ResultRow> {
    outcomes
        .iter()
        .enumerate()
        .map(|(idx, outcome)| match outcome {
            AllocationOutcome::Assigned(a) => ResultRow {
                daughter_station: a.daughter_station.clone(),
                lcv_id: Some(a.lcv_id),
                filling_station: Some(a.filling_station.clone()),
                requirement: a.requirement,
                total_time_min: Some((a.total_time_min * 100.0).round() / 100.0),
                route_map: route_maps.get(idx).cloned().flatten(),
                message: None,
            },
            AllocationOutcome::Unmatched(u) => ResultRow {
                daughter_station: u.daughter_station.clone(),
                lcv_id: None,
                filling_station: None,
                requirement: u.requirement,
                total_time_min: None,
                route_map: None,
                message: Some(u.to_string()),
            },
        })
        .collect()
}

pub fn save_to_csv(rows: &[ResultRow], filename: &Path) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_path(filename)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    info!("Wrote {} result rows to {}", rows.len(), filename.display());
    Ok(())
}

pub fn print_results(rows: &[ResultRow]) {
    for row in rows {
        match (&row.lcv_id, &row.filling_station, row.total_time_min) {
            (Some(lcv), Some(station), Some(total)) => {
                let map = row.route_map.as_deref().unwrap_or("no map");
                println!(
                    "{} {} <- {} ({} kg, {:.2} min) [{}]",
                    format!("LCV {lcv}").green(),
                    row.daughter_station,
                    station,
                    row.requirement,
                    total,
                    map
                );
            }
            _ => println!(
                "{}",
                row.message
                    .clone()
                    .unwrap_or_else(|| row.daughter_station.clone())
                    .red()
            ),
        }
    }
}
