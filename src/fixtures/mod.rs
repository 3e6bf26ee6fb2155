pub mod csv_inputs;
pub mod data_generator;
pub mod reference;

pub use csv_inputs::{read_indents_csv, read_vehicle_requests_csv, FixtureError};
pub use data_generator::{generate_random_indents, generate_random_vehicles, generate_vehicle_requests};
pub use reference::{daughter_stations, default_fleet, filling_stations};
