//! Wilayah (administrative region) feature.
//!
//! Holds the city → district → village hierarchy in memory, loaded once at
//! startup from a JSON dataset (`WILAYAH_DATA_PATH`). The directory is shared
//! read-only with the users and stats features, which use it to validate and
//! enrich member village ids.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/wilayah/cities` | List all cities |
//! | GET | `/api/wilayah/cities/{city_id}` | Get city by id |
//! | GET | `/api/wilayah/cities/{city_id}/districts` | List districts in a city |
//! | GET | `/api/wilayah/cities/{city_id}/districts/{district_id}/villages` | List villages in a district |
//! | GET | `/api/wilayah/villages/{village_id}` | Resolve a village with its ancestors |
//! | GET | `/api/wilayah/search?q=` | Search villages by village or district name |

pub mod code;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use error::RegionError;
pub use services::RegionDirectory;
