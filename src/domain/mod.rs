pub mod error;
pub mod types;

pub use error::InputError;
pub use types::*;
