pub mod api;
pub mod config;
pub mod database;
pub mod distance;
pub mod domain;
pub mod evaluation;
pub mod fixtures;
pub mod render;
pub mod report;
pub mod setup;
pub mod solver;
