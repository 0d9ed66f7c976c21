use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::regions::models::District;
use crate::features::stats::models::{MemberTotalsRow, RegionCountRow};

/// Member counts across the whole organisation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GlobalStatsDto {
    pub total_members: i64,
    pub total_male: i64,
    pub total_female: i64,
    pub total_mobile: i64,
    /// Members with a village id set
    pub with_region: i64,
    pub without_region: i64,
}

impl From<MemberTotalsRow> for GlobalStatsDto {
    fn from(row: MemberTotalsRow) -> Self {
        Self {
            without_region: row.total_members - row.with_region,
            total_members: row.total_members,
            total_male: row.total_male,
            total_female: row.total_female,
            total_mobile: row.total_mobile,
            with_region: row.with_region,
        }
    }
}

/// Member counts for one city
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CityStatsDto {
    pub city_id: String,
    /// Empty when the city id is not in the loaded dataset
    pub city_name: String,
    pub total_members: i64,
    pub total_male: i64,
    pub total_female: i64,
    pub total_mobile: i64,
}

impl CityStatsDto {
    pub fn from_row(row: RegionCountRow, city_name: Option<String>) -> Self {
        Self {
            city_id: row.region_id,
            city_name: city_name.unwrap_or_default(),
            total_members: row.total_members,
            total_male: row.total_male,
            total_female: row.total_female,
            total_mobile: row.total_mobile,
        }
    }
}

/// Member counts for one district
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DistrictStatsDto {
    pub district_id: String,
    pub district_name: String,
    pub city_id: String,
    pub city_name: String,
    pub total_members: i64,
    pub total_male: i64,
    pub total_female: i64,
    pub total_mobile: i64,
}

/// City summary with its per-district breakdown
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CityDetailStatsDto {
    #[serde(flatten)]
    pub city: CityStatsDto,
    pub districts: Vec<DistrictStatsDto>,
}

/// Attach district names to grouped rows. Unknown ids keep their counts.
pub fn district_stats(
    rows: Vec<RegionCountRow>,
    city_id: &str,
    city_name: &str,
    districts: &[District],
) -> Vec<DistrictStatsDto> {
    let names: HashMap<&str, &str> = districts
        .iter()
        .map(|d| (d.id.as_str(), d.name.as_str()))
        .collect();

    rows.into_iter()
        .map(|row| DistrictStatsDto {
            district_name: names
                .get(row.region_id.as_str())
                .map(|n| n.to_string())
                .unwrap_or_default(),
            district_id: row.region_id,
            city_id: city_id.to_string(),
            city_name: city_name.to_string(),
            total_members: row.total_members,
            total_male: row.total_male,
            total_female: row.total_female,
            total_mobile: row.total_mobile,
        })
        .collect()
}
