pub mod registry;
pub mod sqlx;

pub use registry::{InMemoryRegistry, LcvRecord, RegistryError, SqliteVehicleRegistry, VehicleRegistry};
