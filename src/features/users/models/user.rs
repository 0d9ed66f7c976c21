use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::shared::constants::{ROLE_ADMIN, ROLE_MEMBER};

/// Column list shared by every query that loads a full [`User`]
pub const USER_COLUMNS: &str = "id, name, password_hash, birth_date, telp, gender, job, role, \
     village_id, nik, address, is_mobile, created_at, updated_at";

/// Member record. `village_id` is the composite wilayah id; city and district
/// are derived from its prefixes and never stored.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub password_hash: String,
    pub birth_date: Option<NaiveDate>,
    pub telp: Option<String>,
    pub gender: Option<String>,
    pub job: Option<String>,
    pub role: String,
    pub village_id: Option<String>,
    pub nik: Option<String>,
    pub address: Option<String>,
    pub is_mobile: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Member,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Member => ROLE_MEMBER,
        }
    }
}
