pub mod auth;
pub mod regions;
pub mod stats;
pub mod users;
