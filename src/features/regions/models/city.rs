use serde::{Deserialize, Serialize};

use super::District;

/// City model representing a kabupaten/kota, the top level of the wilayah dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub districts: Vec<District>,
}
