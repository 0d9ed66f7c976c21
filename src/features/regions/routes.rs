use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::regions::handlers;
use crate::features::regions::services::RegionDirectory;

/// Create routes for the wilayah feature
pub fn routes(directory: Arc<RegionDirectory>) -> Router {
    Router::new()
        // City routes
        .route("/api/wilayah/cities", get(handlers::list_cities))
        .route("/api/wilayah/cities/{city_id}", get(handlers::get_city))
        .route(
            "/api/wilayah/cities/{city_id}/districts",
            get(handlers::list_districts),
        )
        .route(
            "/api/wilayah/cities/{city_id}/districts/{district_id}/villages",
            get(handlers::list_villages),
        )
        // Village routes
        .route(
            "/api/wilayah/villages/{village_id}",
            get(handlers::resolve_village),
        )
        .route("/api/wilayah/search", get(handlers::search_villages))
        .with_state(directory)
}
