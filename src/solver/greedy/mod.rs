pub mod context;
pub mod matcher;
pub mod run;

pub use context::RunContext;
pub use matcher::{allocate, allocate_with_context, prioritized_demands};
