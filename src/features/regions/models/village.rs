use serde::{Deserialize, Serialize};

/// Village model representing a kelurahan/desa (leaf of the hierarchy)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Village {
    pub id: String,
    pub name: String,
}
