pub mod osrm_api;

pub use osrm_api::{OsrmRouteClient, RouteError, RouteGeometry, RouteGeometryService};
