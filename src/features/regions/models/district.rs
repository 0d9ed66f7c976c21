use serde::{Deserialize, Serialize};

use super::Village;

/// District model representing a kecamatan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub villages: Vec<Village>,
}
