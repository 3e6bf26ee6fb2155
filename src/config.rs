use std::env;
use std::path::PathBuf;

use dotenv::dotenv;
use tracing::warn;

use crate::domain::InputError;

pub mod constant {
    pub const AVERAGE_SPEED_KMPH: f64 = 30.0;
    pub const FILLING_RATE_KG_PER_MIN: f64 = 5.0;
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:lcv.db";
    pub const OSRM_BASE_URL: &str = "http://router.project-osrm.org";
    pub const MAP_OUTPUT_DIR: &str = "static";
    pub const RESULTS_CSV_PATH: &str = "allocation_results.csv";
    pub const SEED: u64 = 12345;
}

/// Physical constants of the cost model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    pub average_speed_kmph: f64,
    pub filling_rate_kg_per_min: f64,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            average_speed_kmph: constant::AVERAGE_SPEED_KMPH,
            filling_rate_kg_per_min: constant::FILLING_RATE_KG_PER_MIN,
        }
    }
}

impl EngineParams {
    pub fn validate(&self) -> Result<(), InputError> {
        if !(self.average_speed_kmph.is_finite() && self.average_speed_kmph > 0.0) {
            return Err(InputError::InvalidParameter {
                name: "average speed",
                value: self.average_speed_kmph,
            });
        }
        if !(self.filling_rate_kg_per_min.is_finite() && self.filling_rate_kg_per_min > 0.0) {
            return Err(InputError::InvalidParameter {
                name: "filling rate",
                value: self.filling_rate_kg_per_min,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub osrm_base_url: String,
    pub map_dir: PathBuf,
    pub indents_csv: Option<PathBuf>,
    pub fleet_csv: Option<PathBuf>,
    pub results_csv: PathBuf,
    pub engine: EngineParams,
}

impl AppConfig {
    /// Load `.env` and read settings from the process environment.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            warn!("DATABASE_URL not set, using default SQLite file");
            constant::DEFAULT_DATABASE_URL.to_string()
        });

        let engine = EngineParams {
            average_speed_kmph: parse_or(
                &lookup,
                "LCV_AVERAGE_SPEED_KMPH",
                constant::AVERAGE_SPEED_KMPH,
            ),
            filling_rate_kg_per_min: parse_or(
                &lookup,
                "LCV_FILLING_RATE",
                constant::FILLING_RATE_KG_PER_MIN,
            ),
        };

        Self {
            database_url,
            osrm_base_url: lookup("OSRM_BASE_URL")
                .unwrap_or_else(|| constant::OSRM_BASE_URL.to_string()),
            map_dir: lookup("LCV_MAP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(constant::MAP_OUTPUT_DIR)),
            indents_csv: lookup("LCV_INDENTS_CSV").map(PathBuf::from),
            fleet_csv: lookup("LCV_FLEET_CSV").map(PathBuf::from),
            results_csv: lookup("LCV_RESULTS_CSV")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(constant::RESULTS_CSV_PATH)),
            engine,
        }
    }
}

fn parse_or<F>(lookup: &F, key: &str, default: f64) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                warn!("{key}='{raw}' is not a number, using default {default}");
                default
            }
        },
        None => default,
    }
}
