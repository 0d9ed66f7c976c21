//! Member statistics grouped by wilayah.
//!
//! Counts come from SQL grouped on village id prefixes; city and district
//! names are joined in from the region directory afterwards.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::StatsService;
