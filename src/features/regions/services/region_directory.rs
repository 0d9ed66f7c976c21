use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::features::regions::error::{DataLoadError, RegionError};
use crate::features::regions::models::{City, District, ResolvedRegion, SearchHit, Village};

/// In-memory wilayah hierarchy (city → district → village).
///
/// The tree and its indexes live in an immutable snapshot behind an
/// `ArcSwap`. Queries take the current `Arc` without locking, so a `load`
/// that runs while queries are in flight swaps the whole snapshot at once and
/// readers never see a half-built tree.
pub struct RegionDirectory {
    snapshot: ArcSwap<RegionSnapshot>,
}

#[derive(Default)]
struct RegionSnapshot {
    cities: Vec<City>,
    city_positions: HashMap<String, usize>,
    village_positions: HashMap<String, usize>,
    /// One entry per village in dataset order
    entries: Vec<SearchEntry>,
}

struct SearchEntry {
    region: ResolvedRegion,
    village_name_folded: String,
    district_name_folded: String,
}

impl RegionSnapshot {
    fn build(cities: Vec<City>) -> Self {
        let mut city_positions = HashMap::with_capacity(cities.len());
        let mut village_positions = HashMap::new();
        let mut entries = Vec::new();

        for (position, city) in cities.iter().enumerate() {
            // first occurrence wins, same as a front-to-back scan
            city_positions.entry(city.id.clone()).or_insert(position);

            for district in &city.districts {
                let district_name_folded = district.name.to_ascii_lowercase();

                for village in &district.villages {
                    village_positions
                        .entry(village.id.clone())
                        .or_insert(entries.len());

                    entries.push(SearchEntry {
                        region: ResolvedRegion::new(city, district, village),
                        village_name_folded: village.name.to_ascii_lowercase(),
                        district_name_folded: district_name_folded.clone(),
                    });
                }
            }
        }

        Self {
            cities,
            city_positions,
            village_positions,
            entries,
        }
    }

    fn city(&self, city_id: &str) -> Option<&City> {
        self.city_positions
            .get(city_id)
            .and_then(|&position| self.cities.get(position))
    }
}

impl Default for RegionDirectory {
    fn default() -> Self {
        Self::empty()
    }
}

impl RegionDirectory {
    /// Create a directory with no data; every lookup reports not found
    pub fn empty() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(RegionSnapshot::default()),
        }
    }

    /// Create a directory from an already parsed tree
    pub fn from_cities(cities: Vec<City>) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(RegionSnapshot::build(cities)),
        }
    }

    /// Load the dataset from a JSON file and replace the current tree.
    ///
    /// On failure the previously published tree stays in place.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(), RegionError> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let cities: Vec<City> =
            serde_json::from_slice(&bytes).map_err(|source| DataLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let snapshot = RegionSnapshot::build(cities);
        tracing::info!(
            "Loaded wilayah data from {}: {} cities, {} villages",
            path.display(),
            snapshot.cities.len(),
            snapshot.entries.len()
        );

        self.publish(snapshot);
        Ok(())
    }

    fn publish(&self, snapshot: RegionSnapshot) {
        self.snapshot.store(Arc::new(snapshot));
    }

    fn current(&self) -> Arc<RegionSnapshot> {
        self.snapshot.load_full()
    }

    // ==================== Diagnostics ====================

    /// Whether any region data is available
    pub fn is_loaded(&self) -> bool {
        !self.current().cities.is_empty()
    }

    pub fn city_count(&self) -> usize {
        self.current().cities.len()
    }

    pub fn village_count(&self) -> usize {
        self.current().entries.len()
    }

    // ==================== Browse ====================

    /// List all cities in dataset order
    pub fn list_cities(&self) -> Vec<City> {
        self.current().cities.clone()
    }

    /// Get a city by exact id
    pub fn get_city(&self, city_id: &str) -> Result<City, RegionError> {
        self.current()
            .city(city_id)
            .cloned()
            .ok_or_else(|| RegionError::CityNotFound(city_id.to_string()))
    }

    /// Get the districts of a city; a city without districts yields an empty list
    pub fn get_districts(&self, city_id: &str) -> Result<Vec<District>, RegionError> {
        self.current()
            .city(city_id)
            .map(|city| city.districts.clone())
            .ok_or_else(|| RegionError::CityNotFound(city_id.to_string()))
    }

    /// Get the villages of a district within a city
    pub fn get_villages(
        &self,
        city_id: &str,
        district_id: &str,
    ) -> Result<Vec<Village>, RegionError> {
        let snapshot = self.current();
        let city = snapshot
            .city(city_id)
            .ok_or_else(|| RegionError::CityNotFound(city_id.to_string()))?;

        city.districts
            .iter()
            .find(|district| district.id == district_id)
            .map(|district| district.villages.clone())
            .ok_or_else(|| RegionError::DistrictNotFound {
                city_id: city_id.to_string(),
                district_id: district_id.to_string(),
            })
    }

    // ==================== Resolve ====================

    /// Resolve a village id into its full ancestor chain
    pub fn resolve_village(&self, village_id: &str) -> Result<ResolvedRegion, RegionError> {
        let snapshot = self.current();
        snapshot
            .village_positions
            .get(village_id)
            .and_then(|&position| snapshot.entries.get(position))
            .map(|entry| entry.region.clone())
            .ok_or_else(|| RegionError::VillageNotFound(village_id.to_string()))
    }

    // ==================== Search ====================

    /// Search villages whose own name or district name contains `query`.
    ///
    /// Matching folds ASCII letters only; other characters compare as-is.
    pub fn search_villages(&self, query: &str) -> Result<Vec<SearchHit>, RegionError> {
        if query.is_empty() {
            return Err(RegionError::InvalidArgument(
                "Search query must not be empty".to_string(),
            ));
        }

        let needle = query.to_ascii_lowercase();
        let snapshot = self.current();

        let hits = snapshot
            .entries
            .iter()
            .filter(|entry| {
                entry.village_name_folded.contains(&needle)
                    || entry.district_name_folded.contains(&needle)
            })
            .map(|entry| SearchHit::from(entry.region.clone()))
            .collect();

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::regions::code::{city_prefix, district_prefix};

    fn village(id: &str, name: &str) -> Village {
        Village {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn district(id: &str, name: &str, villages: Vec<Village>) -> District {
        District {
            id: id.to_string(),
            name: name.to_string(),
            villages,
        }
    }

    fn city(id: &str, name: &str, districts: Vec<District>) -> City {
        City {
            id: id.to_string(),
            name: name.to_string(),
            districts,
        }
    }

    fn jatim_fixture() -> Vec<City> {
        vec![city(
            "35",
            "Jatim",
            vec![district(
                "3501",
                "Pacitan",
                vec![village("3501011001", "Ploso")],
            )],
        )]
    }

    fn surabaya_fixture() -> Vec<City> {
        vec![
            city(
                "3578",
                "Kota Surabaya",
                vec![
                    district(
                        "357801",
                        "Gubeng",
                        vec![
                            village("3578011001", "Gubeng Pojok"),
                            village("3578011002", "Airlangga"),
                        ],
                    ),
                    district(
                        "357802",
                        "Tegalsari",
                        vec![
                            village("3578021001", "Keputran"),
                            village("3578021002", "Dr. Soetomo"),
                        ],
                    ),
                ],
            ),
            city(
                "3576",
                "Kota Mojokerto",
                vec![
                    district(
                        "357601",
                        "Prajurit Kulon",
                        vec![village("3576011001", "Surodinawan")],
                    ),
                    district("357602", "Magersari", vec![]),
                ],
            ),
            city("3577", "Kota Madiun", vec![]),
        ]
    }

    fn temp_dataset(contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("wilayah-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_resolve_concrete_village() {
        let directory = RegionDirectory::from_cities(jatim_fixture());

        let resolved = directory.resolve_village("3501011001").unwrap();

        assert_eq!(
            resolved,
            ResolvedRegion {
                city_id: "35".to_string(),
                city_name: "Jatim".to_string(),
                district_id: "3501".to_string(),
                district_name: "Pacitan".to_string(),
                village_id: "3501011001".to_string(),
                village_name: "Ploso".to_string(),
            }
        );
    }

    #[test]
    fn test_get_villages_concrete() {
        let directory = RegionDirectory::from_cities(jatim_fixture());

        let villages = directory.get_villages("35", "3501").unwrap();
        assert_eq!(villages, vec![village("3501011001", "Ploso")]);

        let err = directory.get_villages("35", "9999").unwrap_err();
        assert!(matches!(err, RegionError::DistrictNotFound { .. }));
    }

    #[test]
    fn test_get_villages_distinguishes_missing_city() {
        let directory = RegionDirectory::from_cities(jatim_fixture());

        let err = directory.get_villages("99", "3501").unwrap_err();
        assert!(matches!(err, RegionError::CityNotFound(ref id) if id == "99"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_every_village_resolves_to_its_ancestors() {
        let cities = surabaya_fixture();
        let directory = RegionDirectory::from_cities(cities.clone());

        for c in &cities {
            for d in &c.districts {
                for v in &d.villages {
                    let resolved = directory.resolve_village(&v.id).unwrap();
                    assert_eq!(resolved.city_name, c.name);
                    assert_eq!(resolved.district_name, d.name);
                    assert_eq!(resolved.village_name, v.name);
                }
            }
        }
    }

    #[test]
    fn test_unknown_village_is_not_found() {
        let directory = RegionDirectory::from_cities(surabaya_fixture());

        for id in ["", "3578", "357801100", "35780110011", "3578011003", "Gubeng Pojok"] {
            let err = directory.resolve_village(id).unwrap_err();
            assert!(matches!(err, RegionError::VillageNotFound(_)), "id {id:?}");
        }
    }

    #[test]
    fn test_fixture_prefixes_match_ancestors() {
        let cities = surabaya_fixture();

        for c in &cities {
            for d in &c.districts {
                for v in &d.villages {
                    assert_eq!(city_prefix(&v.id), Some(c.id.as_str()));
                    assert_eq!(district_prefix(&v.id), Some(d.id.as_str()));
                }
            }
        }
    }

    #[test]
    fn test_ids_are_not_rewritten() {
        // district id deliberately breaks the prefix convention
        let directory = RegionDirectory::from_cities(vec![city(
            "3578",
            "Kota Surabaya",
            vec![district("999999", "Odd", vec![village("3578011001", "X")])],
        )]);

        let resolved = directory.resolve_village("3578011001").unwrap();
        assert_eq!(resolved.district_id, "999999");
    }

    #[test]
    fn test_get_city_and_districts() {
        let directory = RegionDirectory::from_cities(surabaya_fixture());

        assert_eq!(directory.get_city("3576").unwrap().name, "Kota Mojokerto");
        assert!(matches!(
            directory.get_city("357"),
            Err(RegionError::CityNotFound(_))
        ));

        let districts = directory.get_districts("3578").unwrap();
        let ids: Vec<&str> = districts.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["357801", "357802"]);
    }

    #[test]
    fn test_city_without_districts_is_empty_not_missing() {
        let directory = RegionDirectory::from_cities(surabaya_fixture());

        assert_eq!(directory.get_districts("3577").unwrap(), Vec::<District>::new());
        assert_eq!(
            directory.get_villages("3576", "357602").unwrap(),
            Vec::<Village>::new()
        );
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first_occurrence() {
        let directory = RegionDirectory::from_cities(vec![
            city("3578", "First", vec![district("357801", "A", vec![village("3578011001", "One")])]),
            city("3578", "Second", vec![district("357801", "B", vec![village("3578011001", "Two")])]),
        ]);

        assert_eq!(directory.get_city("3578").unwrap().name, "First");
        assert_eq!(
            directory.resolve_village("3578011001").unwrap().village_name,
            "One"
        );
    }

    #[test]
    fn test_search_matches_village_and_district_names() {
        let directory = RegionDirectory::from_cities(surabaya_fixture());

        let hits = directory.search_villages("gubeng").unwrap();
        let names: Vec<&str> = hits.iter().map(|h| h.region.village_name.as_str()).collect();

        // "Airlangga" matches through its district "Gubeng"
        assert_eq!(names, vec!["Gubeng Pojok", "Airlangga"]);
        assert_eq!(hits[0].full_address, "Gubeng Pojok, Gubeng, Kota Surabaya");
        assert_eq!(hits[1].full_address, "Airlangga, Gubeng, Kota Surabaya");
    }

    #[test]
    fn test_search_is_ascii_case_insensitive() {
        let directory = RegionDirectory::from_cities(surabaya_fixture());

        let upper = directory.search_villages("GUBENG").unwrap();
        let lower = directory.search_villages("gubeng").unwrap();
        let mixed = directory.search_villages("gUbEnG").unwrap();

        assert_eq!(upper, lower);
        assert_eq!(mixed, lower);
    }

    #[test]
    fn test_search_ignores_city_names() {
        let directory = RegionDirectory::from_cities(surabaya_fixture());

        assert!(directory.search_villages("surabaya").unwrap().is_empty());
        assert!(directory.search_villages("madiun").unwrap().is_empty());
    }

    #[test]
    fn test_search_substring_and_punctuation() {
        let directory = RegionDirectory::from_cities(surabaya_fixture());

        let hits = directory.search_villages("dr. soe").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].region.village_id, "3578021002");

        let hits = directory.search_villages("ulon").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].region.district_name, "Prajurit Kulon");
    }

    #[test]
    fn test_search_folds_ascii_only() {
        let directory = RegionDirectory::from_cities(vec![city(
            "3578",
            "Kota",
            vec![district("357801", "Distrik", vec![village("3578011001", "ÉCOLE")])],
        )]);

        // non-ASCII letters are not folded
        assert!(directory.search_villages("école").unwrap().is_empty());
        assert_eq!(directory.search_villages("Écol").unwrap().len(), 1);
    }

    #[test]
    fn test_empty_query_is_rejected() {
        let directory = RegionDirectory::from_cities(surabaya_fixture());

        let err = directory.search_villages("").unwrap_err();
        assert!(matches!(err, RegionError::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_directory_reports_not_found() {
        let directory = RegionDirectory::empty();

        assert!(!directory.is_loaded());
        assert!(directory.list_cities().is_empty());
        assert!(directory.get_city("3578").is_err());
        assert!(directory.get_districts("3578").is_err());
        assert!(directory.get_villages("3578", "357801").is_err());
        assert!(directory.resolve_village("3578011001").is_err());
        assert!(directory.search_villages("gubeng").unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_file_then_valid_file() {
        let directory = RegionDirectory::empty();

        let missing = std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::new_v4()));
        let err = directory.load(&missing).unwrap_err();
        assert!(matches!(err, RegionError::DataLoad(DataLoadError::Io { .. })));
        assert!(directory.resolve_village("3501011001").is_err());

        let path = temp_dataset(
            r#"[{"id":"35","name":"Jatim","districts":[
                {"id":"3501","name":"Pacitan","villages":[{"id":"3501011001","name":"Ploso"}]}
            ]}]"#,
        );
        directory.load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(directory.is_loaded());
        assert_eq!(directory.city_count(), 1);
        assert_eq!(directory.village_count(), 1);
        assert_eq!(
            directory.resolve_village("3501011001").unwrap().city_name,
            "Jatim"
        );
    }

    #[test]
    fn test_load_malformed_file_keeps_previous_data() {
        let directory = RegionDirectory::from_cities(jatim_fixture());

        let path = temp_dataset(r#"{"id": "35"}"#);
        let err = directory.load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, RegionError::DataLoad(DataLoadError::Parse { .. })));
        assert!(directory.resolve_village("3501011001").is_ok());
    }

    #[test]
    fn test_load_accepts_missing_child_arrays() {
        let directory = RegionDirectory::empty();

        let path = temp_dataset(r#"[{"id":"3577","name":"Kota Madiun"}]"#);
        directory.load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(directory.get_districts("3577").unwrap().is_empty());
    }

    #[test]
    fn test_reload_replaces_whole_tree() {
        let directory = RegionDirectory::from_cities(surabaya_fixture());

        let path = temp_dataset(
            r#"[{"id":"35","name":"Jatim","districts":[
                {"id":"3501","name":"Pacitan","villages":[{"id":"3501011001","name":"Ploso"}]}
            ]}]"#,
        );
        directory.load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(directory.get_city("3578").is_err());
        assert!(directory.resolve_village("3578011001").is_err());
        assert!(directory.search_villages("gubeng").unwrap().is_empty());
        assert_eq!(directory.search_villages("PLOSO").unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_queries() {
        let directory = Arc::new(RegionDirectory::from_cities(surabaya_fixture()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let directory = Arc::clone(&directory);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        assert!(directory.resolve_village("3578011001").is_ok());
                        assert_eq!(directory.search_villages("gubeng").unwrap().len(), 2);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_queries_during_reload_see_a_whole_tree() {
        let directory = Arc::new(RegionDirectory::from_cities(surabaya_fixture()));
        let path = temp_dataset(
            r#"[{"id":"3578","name":"Kota Surabaya","districts":[
                {"id":"357801","name":"Gubeng","villages":[
                    {"id":"3578011001","name":"Gubeng Pojok"},
                    {"id":"3578011002","name":"Airlangga"}]}
            ]}]"#,
        );

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let directory = Arc::clone(&directory);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        // both trees share the Gubeng district
                        assert_eq!(directory.search_villages("gubeng").unwrap().len(), 2);
                    }
                })
            })
            .collect();
        for _ in 0..20 {
            directory.load(&path).unwrap();
        }
        for reader in readers {
            reader.join().unwrap();
        }
        std::fs::remove_file(&path).ok();

        assert_eq!(directory.city_count(), 1);
        assert_eq!(directory.village_count(), 2);
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let directory = RegionDirectory::empty();
        directory
            .load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/wilayah.json"))
            .unwrap();

        assert!(directory.is_loaded());
        let region = directory.resolve_village("3578011002").unwrap();
        assert_eq!(region.district_id, "357801");
        assert_eq!(region.city_name, "Kota Surabaya");
    }
}
