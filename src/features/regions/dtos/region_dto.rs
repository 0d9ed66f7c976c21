use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::regions::models::{City, District, ResolvedRegion, SearchHit, Village};

/// Query parameters for searching villages
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct VillageSearchQuery {
    /// Matched against village and district names (case-insensitive, partial match)
    #[param(example = "gubeng")]
    pub q: Option<String>,
}

/// Response DTO for city data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CityResponseDto {
    pub id: String,
    pub name: String,
    pub district_count: usize,
}

impl From<City> for CityResponseDto {
    fn from(city: City) -> Self {
        Self {
            district_count: city.districts.len(),
            id: city.id,
            name: city.name,
        }
    }
}

/// Response DTO for district data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DistrictResponseDto {
    pub id: String,
    pub name: String,
    pub village_count: usize,
}

impl From<District> for DistrictResponseDto {
    fn from(district: District) -> Self {
        Self {
            village_count: district.villages.len(),
            id: district.id,
            name: district.name,
        }
    }
}

/// Response DTO for village data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VillageResponseDto {
    pub id: String,
    pub name: String,
}

impl From<Village> for VillageResponseDto {
    fn from(village: Village) -> Self {
        Self {
            id: village.id,
            name: village.name,
        }
    }
}

/// Response DTO for a village resolved to its full ancestor chain
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResolvedRegionResponseDto {
    pub village_id: String,
    pub village_name: String,
    pub district_id: String,
    pub district_name: String,
    pub city_id: String,
    pub city_name: String,
}

impl From<ResolvedRegion> for ResolvedRegionResponseDto {
    fn from(region: ResolvedRegion) -> Self {
        Self {
            village_id: region.village_id,
            village_name: region.village_name,
            district_id: region.district_id,
            district_name: region.district_name,
            city_id: region.city_id,
            city_name: region.city_name,
        }
    }
}

/// Response DTO for a village search hit
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VillageSearchHitDto {
    pub village_id: String,
    pub village_name: String,
    pub district_id: String,
    pub district_name: String,
    pub city_id: String,
    pub city_name: String,
    /// "{village}, {district}, {city}"
    #[schema(example = "Gubeng Pojok, Gubeng, Kota Surabaya")]
    pub full_address: String,
}

impl From<SearchHit> for VillageSearchHitDto {
    fn from(hit: SearchHit) -> Self {
        let region = hit.region;
        Self {
            village_id: region.village_id,
            village_name: region.village_name,
            district_id: region.district_id,
            district_name: region.district_name,
            city_id: region.city_id,
            city_name: region.city_name,
            full_address: hit.full_address,
        }
    }
}
