pub mod dispatch;
pub mod map;

pub use dispatch::{plan_route_jobs, visualize_assignments, RouteJob, VisualizationError};
pub use map::{render_route_map_html, route_map_file_name, save_route_map, RenderError};
