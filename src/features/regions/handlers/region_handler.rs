use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppQuery;
use crate::features::regions::dtos::{
    CityResponseDto, DistrictResponseDto, ResolvedRegionResponseDto, VillageResponseDto,
    VillageSearchHitDto, VillageSearchQuery,
};
use crate::features::regions::services::RegionDirectory;
use crate::shared::types::ApiResponse;

// ==================== City Handlers ====================

/// List all cities
#[utoipa::path(
    get,
    path = "/api/wilayah/cities",
    responses(
        (status = 200, description = "List of cities", body = ApiResponse<Vec<CityResponseDto>>)
    ),
    tag = "wilayah"
)]
pub async fn list_cities(
    State(directory): State<Arc<RegionDirectory>>,
) -> Result<Json<ApiResponse<Vec<CityResponseDto>>>> {
    let dtos: Vec<CityResponseDto> = directory
        .list_cities()
        .into_iter()
        .map(Into::into)
        .collect();
    let total = dtos.len() as i64;
    Ok(Json(ApiResponse::list(dtos, total)))
}

/// Get a city by id
#[utoipa::path(
    get,
    path = "/api/wilayah/cities/{city_id}",
    params(
        ("city_id" = String, Path, description = "City id (4 digits)")
    ),
    responses(
        (status = 200, description = "City details", body = ApiResponse<CityResponseDto>),
        (status = 404, description = "City not found")
    ),
    tag = "wilayah"
)]
pub async fn get_city(
    State(directory): State<Arc<RegionDirectory>>,
    Path(city_id): Path<String>,
) -> Result<Json<ApiResponse<CityResponseDto>>> {
    let city = directory.get_city(&city_id)?;
    Ok(Json(ApiResponse::success(Some(city.into()), None, None)))
}

/// List districts in a city
#[utoipa::path(
    get,
    path = "/api/wilayah/cities/{city_id}/districts",
    params(
        ("city_id" = String, Path, description = "City id (4 digits)")
    ),
    responses(
        (status = 200, description = "List of districts in the city", body = ApiResponse<Vec<DistrictResponseDto>>),
        (status = 404, description = "City not found")
    ),
    tag = "wilayah"
)]
pub async fn list_districts(
    State(directory): State<Arc<RegionDirectory>>,
    Path(city_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<DistrictResponseDto>>>> {
    let districts = directory.get_districts(&city_id)?;
    let dtos: Vec<DistrictResponseDto> = districts.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

// ==================== District Handlers ====================

/// List villages in a district
#[utoipa::path(
    get,
    path = "/api/wilayah/cities/{city_id}/districts/{district_id}/villages",
    params(
        ("city_id" = String, Path, description = "City id (4 digits)"),
        ("district_id" = String, Path, description = "District id (6 digits)")
    ),
    responses(
        (status = 200, description = "List of villages in the district", body = ApiResponse<Vec<VillageResponseDto>>),
        (status = 404, description = "City or district not found")
    ),
    tag = "wilayah"
)]
pub async fn list_villages(
    State(directory): State<Arc<RegionDirectory>>,
    Path((city_id, district_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Vec<VillageResponseDto>>>> {
    let villages = directory.get_villages(&city_id, &district_id)?;
    let dtos: Vec<VillageResponseDto> = villages.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

// ==================== Village Handlers ====================

/// Resolve a village id into its city and district
#[utoipa::path(
    get,
    path = "/api/wilayah/villages/{village_id}",
    params(
        ("village_id" = String, Path, description = "Village id (10 digits)")
    ),
    responses(
        (status = 200, description = "Village with its ancestors", body = ApiResponse<ResolvedRegionResponseDto>),
        (status = 404, description = "Village not found")
    ),
    tag = "wilayah"
)]
pub async fn resolve_village(
    State(directory): State<Arc<RegionDirectory>>,
    Path(village_id): Path<String>,
) -> Result<Json<ApiResponse<ResolvedRegionResponseDto>>> {
    let region = directory.resolve_village(&village_id)?;
    Ok(Json(ApiResponse::success(Some(region.into()), None, None)))
}

/// Search villages by village or district name
#[utoipa::path(
    get,
    path = "/api/wilayah/search",
    params(VillageSearchQuery),
    responses(
        (status = 200, description = "Villages matching the query", body = ApiResponse<Vec<VillageSearchHitDto>>),
        (status = 400, description = "Query parameter 'q' required")
    ),
    tag = "wilayah"
)]
pub async fn search_villages(
    State(directory): State<Arc<RegionDirectory>>,
    AppQuery(query): AppQuery<VillageSearchQuery>,
) -> Result<Json<ApiResponse<Vec<VillageSearchHitDto>>>> {
    let q = query
        .q
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Query parameter 'q' is required".to_string()))?;

    let dtos: Vec<VillageSearchHitDto> = directory
        .search_villages(q)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = dtos.len() as i64;
    Ok(Json(ApiResponse::list(dtos, total)))
}
