use serde::Serialize;

use super::{City, District, Village};

/// Full ancestor chain of a village.
///
/// Derived at load time and handed out by value; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRegion {
    pub city_id: String,
    pub city_name: String,
    pub district_id: String,
    pub district_name: String,
    pub village_id: String,
    pub village_name: String,
}

impl ResolvedRegion {
    pub fn new(city: &City, district: &District, village: &Village) -> Self {
        Self {
            city_id: city.id.clone(),
            city_name: city.name.clone(),
            district_id: district.id.clone(),
            district_name: district.name.clone(),
            village_id: village.id.clone(),
            village_name: village.name.clone(),
        }
    }

    /// Display string in "{village}, {district}, {city}" form
    pub fn full_address(&self) -> String {
        format!(
            "{}, {}, {}",
            self.village_name, self.district_name, self.city_name
        )
    }
}

/// A single village search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub region: ResolvedRegion,
    pub full_address: String,
}

impl From<ResolvedRegion> for SearchHit {
    fn from(region: ResolvedRegion) -> Self {
        let full_address = region.full_address();
        Self {
            region,
            full_address,
        }
    }
}
