use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::regions::code::{CITY_PREFIX_LEN, DISTRICT_PREFIX_LEN};
use crate::features::regions::RegionDirectory;
use crate::features::stats::dtos::{
    district_stats, CityDetailStatsDto, CityStatsDto, GlobalStatsDto,
};
use crate::features::stats::models::{MemberTotalsRow, RegionCountRow};

/// Grouped counts by village id prefix. Ids shorter than a district prefix
/// carry no usable region and are left out.
fn grouped_counts_query(prefix_len: usize, city_filter: bool) -> String {
    let city_clause = if city_filter {
        format!("AND LEFT(village_id, {}) = $1", CITY_PREFIX_LEN)
    } else {
        String::new()
    };
    format!(
        r#"
        SELECT
            LEFT(village_id, {prefix}) AS region_id,
            COUNT(*) AS total_members,
            COUNT(*) FILTER (WHERE gender = 'male') AS total_male,
            COUNT(*) FILTER (WHERE gender = 'female') AS total_female,
            COUNT(*) FILTER (WHERE is_mobile) AS total_mobile
        FROM users
        WHERE village_id IS NOT NULL AND LENGTH(village_id) >= {min_len} {city_clause}
        GROUP BY 1
        ORDER BY total_members DESC, region_id
        "#,
        prefix = prefix_len,
        min_len = DISTRICT_PREFIX_LEN,
        city_clause = city_clause,
    )
}

pub struct StatsService {
    pool: PgPool,
    directory: Arc<RegionDirectory>,
}

impl StatsService {
    pub fn new(pool: PgPool, directory: Arc<RegionDirectory>) -> Self {
        Self { pool, directory }
    }

    fn city_name(&self, city_id: &str) -> Option<String> {
        self.directory.get_city(city_id).ok().map(|c| c.name)
    }

    /// Totals across all members
    pub async fn get_global_stats(&self) -> Result<GlobalStatsDto> {
        let row = sqlx::query_as::<_, MemberTotalsRow>(
            r#"
            SELECT
                COUNT(*) AS total_members,
                COUNT(*) FILTER (WHERE gender = 'male') AS total_male,
                COUNT(*) FILTER (WHERE gender = 'female') AS total_female,
                COUNT(*) FILTER (WHERE is_mobile) AS total_mobile,
                COUNT(*) FILTER (WHERE village_id IS NOT NULL AND village_id <> '') AS with_region
            FROM users
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get global stats: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(row.into())
    }

    /// Member counts per city
    pub async fn get_city_stats(&self) -> Result<Vec<CityStatsDto>> {
        let query = grouped_counts_query(CITY_PREFIX_LEN, false);
        let rows = sqlx::query_as::<_, RegionCountRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get city stats: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let name = self.city_name(&row.region_id);
                CityStatsDto::from_row(row, name)
            })
            .collect())
    }

    /// Summary for one city plus its districts.
    ///
    /// With a loaded dataset an unknown city is a 404. While degraded, counts
    /// are still returned without names.
    pub async fn get_city_detail_stats(&self, city_id: &str) -> Result<CityDetailStatsDto> {
        let (city_name, districts) = if self.directory.is_loaded() {
            let city = self.directory.get_city(city_id)?;
            (city.name, city.districts)
        } else {
            (String::new(), Vec::new())
        };

        let query = grouped_counts_query(DISTRICT_PREFIX_LEN, true);
        let rows = sqlx::query_as::<_, RegionCountRow>(&query)
            .bind(city_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get district stats for city {}: {:?}", city_id, e);
                AppError::Database(e)
            })?;

        let district_rows = district_stats(rows, city_id, &city_name, &districts);
        let mut city = CityStatsDto::from_row(
            RegionCountRow {
                region_id: city_id.to_string(),
                total_members: 0,
                total_male: 0,
                total_female: 0,
                total_mobile: 0,
            },
            Some(city_name),
        );
        for d in &district_rows {
            city.total_members += d.total_members;
            city.total_male += d.total_male;
            city.total_female += d.total_female;
            city.total_mobile += d.total_mobile;
        }

        Ok(CityDetailStatsDto {
            city,
            districts: district_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_counts_query_widths() {
        let cities = grouped_counts_query(CITY_PREFIX_LEN, false);
        assert!(cities.contains("LEFT(village_id, 4) AS region_id"));
        assert!(!cities.contains("$1"));

        let districts = grouped_counts_query(DISTRICT_PREFIX_LEN, true);
        assert!(districts.contains("LEFT(village_id, 6) AS region_id"));
        assert!(districts.contains("LEFT(village_id, 4) = $1"));
        assert!(districts.contains("LENGTH(village_id) >= 6"));
    }
}
