pub mod cost;
pub mod filling;

pub use cost::{evaluate_candidate, queue_overlap_total, TimeBreakdown};
pub use filling::{filling_minutes, travel_minutes};
