use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::features::auth::guards::RequireAdmin;
use crate::features::stats::dtos::{CityDetailStatsDto, CityStatsDto, GlobalStatsDto};
use crate::features::stats::services::StatsService;
use crate::shared::types::ApiResponse;

/// Member totals across all regions
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Global statistics", body = ApiResponse<GlobalStatsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "stats",
    security(("bearer_auth" = []))
)]
pub async fn get_global_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<StatsService>>,
) -> Result<Json<ApiResponse<GlobalStatsDto>>> {
    let stats = service.get_global_stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Member counts per city
#[utoipa::path(
    get,
    path = "/api/stats/cities",
    responses(
        (status = 200, description = "Statistics per city", body = ApiResponse<Vec<CityStatsDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "stats",
    security(("bearer_auth" = []))
)]
pub async fn get_city_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<StatsService>>,
) -> Result<Json<ApiResponse<Vec<CityStatsDto>>>> {
    let stats = service.get_city_stats().await?;
    let total = stats.len() as i64;
    Ok(Json(ApiResponse::list(stats, total)))
}

/// City summary with per-district counts
#[utoipa::path(
    get,
    path = "/api/stats/cities/{city_id}",
    params(
        ("city_id" = String, Path, description = "City id (4 digits)")
    ),
    responses(
        (status = 200, description = "City statistics", body = ApiResponse<CityDetailStatsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "City not found")
    ),
    tag = "stats",
    security(("bearer_auth" = []))
)]
pub async fn get_city_detail_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<StatsService>>,
    Path(city_id): Path<String>,
) -> Result<Json<ApiResponse<CityDetailStatsDto>>> {
    let stats = service.get_city_detail_stats(&city_id).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}
