pub mod init;
pub mod validate;

pub use init::{attach_indents, resolve_vehicles, RunInput, SetupError, VehicleRequest};
pub use validate::validate_run;
