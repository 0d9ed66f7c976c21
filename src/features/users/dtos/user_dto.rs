use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::regions::code::{city_prefix, district_prefix};
use crate::features::regions::RegionDirectory;
use crate::features::users::models::{Gender, User, UserRole};
use crate::shared::constants::{DEFAULT_PAGE_SIZE, FILTER_ALL, MAX_PAGE_SIZE};
use crate::shared::validation::{MEMBER_ID_REGEX, NIK_REGEX};

// =============================================================================
// QUERY PARAMS
// =============================================================================

/// Query params for listing members
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct UserQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Search in name, NIK or phone number
    pub search: Option<String>,
    /// City id (first 4 digits of the village id); "semua" means all
    #[param(example = "3578")]
    pub city_id: Option<String>,
    /// District id (first 6 digits of the village id); takes precedence over city_id
    #[param(example = "357801")]
    pub district_id: Option<String>,
    /// Exact village id
    pub village_id: Option<String>,
    pub gender: Option<Gender>,
    pub is_mobile: Option<bool>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Normalised list filters, ready to bind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilters {
    pub search_pattern: Option<String>,
    pub city_id: Option<String>,
    pub district_id: Option<String>,
    pub village_id: Option<String>,
    pub gender: Option<&'static str>,
    pub is_mobile: Option<bool>,
}

/// Wrap free text for `ILIKE ... ESCAPE '\'`, matching `%`, `_` and `\` literally
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn region_filter(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(FILTER_ALL))
        .map(str::to_string)
}

impl UserQueryParams {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit())
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn filters(&self) -> UserFilters {
        let district_id = region_filter(&self.district_id);
        // district is the narrower filter
        let city_id = if district_id.is_some() {
            None
        } else {
            region_filter(&self.city_id)
        };

        UserFilters {
            search_pattern: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(like_pattern),
            city_id,
            district_id,
            village_id: region_filter(&self.village_id),
            gender: self.gender.map(|g| g.as_str()),
            is_mobile: self.is_mobile,
        }
    }
}

// =============================================================================
// REQUEST DTOs
// =============================================================================

/// Request DTO for creating a member
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(
        length(min = 1, max = 32, message = "Id must be 1-32 characters"),
        regex(path = *MEMBER_ID_REGEX, message = "Id may only contain letters, digits, '.' and '-'")
    )]
    pub id: String,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub birth_date: Option<NaiveDate>,

    #[validate(length(max = 32, message = "Phone number must not exceed 32 characters"))]
    pub telp: Option<String>,

    pub gender: Option<Gender>,

    #[validate(length(max = 128, message = "Job must not exceed 128 characters"))]
    pub job: Option<String>,

    #[serde(default)]
    pub role: UserRole,

    /// Composite wilayah village id (e.g. "3578011001")
    pub village_id: Option<String>,

    #[validate(regex(path = *NIK_REGEX, message = "NIK must be exactly 16 digits"))]
    pub nik: Option<String>,

    pub address: Option<String>,

    #[serde(default)]
    pub is_mobile: bool,
}

/// Request DTO for updating a member (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,

    pub birth_date: Option<NaiveDate>,

    #[validate(length(max = 32, message = "Phone number must not exceed 32 characters"))]
    pub telp: Option<String>,

    pub gender: Option<Gender>,

    #[validate(length(max = 128, message = "Job must not exceed 128 characters"))]
    pub job: Option<String>,

    pub role: Option<UserRole>,

    /// New village id; an empty string clears the stored one
    pub village_id: Option<String>,

    #[validate(regex(path = *NIK_REGEX, message = "NIK must be exactly 16 digits"))]
    pub nik: Option<String>,

    pub address: Option<String>,

    pub is_mobile: Option<bool>,
}

// =============================================================================
// RESPONSE DTOs
// =============================================================================

/// Member with derived age and wilayah names
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: String,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    /// Age in whole years, 0 when birth date is unknown
    pub age: i32,
    pub telp: Option<String>,
    pub gender: Option<String>,
    pub job: Option<String>,
    pub role: String,
    pub nik: Option<String>,
    pub address: Option<String>,
    pub is_mobile: bool,
    pub village_id: Option<String>,
    pub village_name: Option<String>,
    pub district_id: Option<String>,
    pub district_name: Option<String>,
    pub city_id: Option<String>,
    pub city_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Age in whole years on `today`
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age.max(0)
}

impl UserResponseDto {
    /// Build the response for a member, filling wilayah fields from the directory.
    ///
    /// Ids come from the village id prefixes. Names are best effort: a village
    /// id the directory does not know leaves them empty.
    pub fn enriched(user: User, directory: &RegionDirectory) -> Self {
        Self::enriched_on(user, directory, Utc::now().date_naive())
    }

    pub fn enriched_on(user: User, directory: &RegionDirectory, today: NaiveDate) -> Self {
        let village_id = user.village_id.filter(|v| !v.is_empty());

        let (city_id, district_id) = match village_id.as_deref() {
            Some(v) => (
                city_prefix(v).map(str::to_string),
                district_prefix(v).map(str::to_string),
            ),
            None => (None, None),
        };

        let resolved = village_id
            .as_deref()
            .and_then(|v| directory.resolve_village(v).ok());
        let (city_name, district_name, village_name) = match resolved {
            Some(region) => (
                Some(region.city_name),
                Some(region.district_name),
                Some(region.village_name),
            ),
            None => (None, None, None),
        };

        Self {
            id: user.id,
            name: user.name,
            age: user.birth_date.map(|b| age_on(b, today)).unwrap_or(0),
            birth_date: user.birth_date,
            telp: user.telp,
            gender: user.gender,
            job: user.job,
            role: user.role,
            nik: user.nik,
            address: user.address,
            is_mobile: user.is_mobile,
            village_id,
            village_name,
            district_id,
            district_name,
            city_id,
            city_name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::regions::models::{City, District, Village};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn directory() -> RegionDirectory {
        RegionDirectory::from_cities(vec![City {
            id: "3578".to_string(),
            name: "Kota Surabaya".to_string(),
            districts: vec![District {
                id: "357801".to_string(),
                name: "Gubeng".to_string(),
                villages: vec![Village {
                    id: "3578011001".to_string(),
                    name: "Gubeng Pojok".to_string(),
                }],
            }],
        }])
    }

    fn user(village_id: Option<&str>) -> User {
        User {
            id: "A0001".to_string(),
            name: "Siti Aminah".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            birth_date: Some(date(1990, 6, 15)),
            telp: Some("081234567890".to_string()),
            gender: Some("female".to_string()),
            job: None,
            role: "member".to_string(),
            village_id: village_id.map(str::to_string),
            nik: None,
            address: None,
            is_mobile: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_enrich_known_village() {
        let dto = UserResponseDto::enriched_on(user(Some("3578011001")), &directory(), date(2024, 6, 15));

        assert_eq!(dto.city_id.as_deref(), Some("3578"));
        assert_eq!(dto.district_id.as_deref(), Some("357801"));
        assert_eq!(dto.city_name.as_deref(), Some("Kota Surabaya"));
        assert_eq!(dto.district_name.as_deref(), Some("Gubeng"));
        assert_eq!(dto.village_name.as_deref(), Some("Gubeng Pojok"));
        assert_eq!(dto.age, 34);
    }

    #[test]
    fn test_enrich_unknown_village_keeps_prefix_ids() {
        let dto = UserResponseDto::enriched_on(user(Some("3578099999")), &directory(), date(2024, 1, 1));

        assert_eq!(dto.village_id.as_deref(), Some("3578099999"));
        assert_eq!(dto.city_id.as_deref(), Some("3578"));
        assert_eq!(dto.district_id.as_deref(), Some("357809"));
        assert_eq!(dto.city_name, None);
        assert_eq!(dto.village_name, None);
    }

    #[test]
    fn test_enrich_short_or_missing_village() {
        let dto = UserResponseDto::enriched_on(user(Some("3578")), &directory(), date(2024, 1, 1));
        assert_eq!(dto.city_id, None);
        assert_eq!(dto.district_id, None);

        let dto = UserResponseDto::enriched_on(user(Some("")), &directory(), date(2024, 1, 1));
        assert_eq!(dto.village_id, None);

        let dto = UserResponseDto::enriched_on(user(None), &RegionDirectory::empty(), date(2024, 1, 1));
        assert_eq!(dto.city_name, None);
    }

    #[test]
    fn test_age_on_birthday_boundaries() {
        let birth = date(1990, 6, 15);
        assert_eq!(age_on(birth, date(2024, 6, 14)), 33);
        assert_eq!(age_on(birth, date(2024, 6, 15)), 34);
        assert_eq!(age_on(birth, date(1989, 1, 1)), 0);
    }

    #[test]
    fn test_filters_ignore_semua_and_prefer_district() {
        let params = UserQueryParams {
            city_id: Some("3578".to_string()),
            district_id: Some("semua".to_string()),
            ..Default::default()
        };
        let filters = params.filters();
        assert_eq!(filters.city_id.as_deref(), Some("3578"));
        assert_eq!(filters.district_id, None);

        let params = UserQueryParams {
            city_id: Some("3578".to_string()),
            district_id: Some("357801".to_string()),
            ..Default::default()
        };
        let filters = params.filters();
        assert_eq!(filters.city_id, None);
        assert_eq!(filters.district_id.as_deref(), Some("357801"));

        let params = UserQueryParams {
            city_id: Some("SEMUA".to_string()),
            search: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(params.filters(), UserFilters::default());
    }

    #[test]
    fn test_filters_search_pattern_and_gender() {
        let params = UserQueryParams {
            search: Some(" siti ".to_string()),
            gender: Some(Gender::Female),
            is_mobile: Some(true),
            ..Default::default()
        };
        let filters = params.filters();
        assert_eq!(filters.search_pattern.as_deref(), Some("%siti%"));
        assert_eq!(filters.gender, Some("female"));
        assert_eq!(filters.is_mobile, Some(true));
    }

    #[test]
    fn test_pagination_is_clamped() {
        let params = UserQueryParams {
            page: 0,
            page_size: 1000,
            ..Default::default()
        };
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
        assert_eq!(params.offset(), 0);

        let params = UserQueryParams {
            page: 3,
            page_size: 20,
            ..Default::default()
        };
        assert_eq!(params.offset(), 40);

        let params = UserQueryParams {
            page: i64::MAX,
            page_size: 100,
            ..Default::default()
        };
        assert_eq!(params.offset(), i64::MAX);
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        let params = UserQueryParams {
            search: Some("50%".to_string()),
            ..Default::default()
        };
        assert_eq!(params.filters().search_pattern.as_deref(), Some("%50\\%%"));

        assert_eq!(like_pattern("_"), "%\\_%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
        assert_eq!(like_pattern("siti"), "%siti%");
    }

    #[test]
    fn test_create_dto_validation() {
        let mut dto = CreateUserDto {
            id: "A0001".to_string(),
            name: "Siti".to_string(),
            password: "rahasia".to_string(),
            birth_date: None,
            telp: None,
            gender: None,
            job: None,
            role: UserRole::Member,
            village_id: None,
            nik: Some("3578010101900001".to_string()),
            address: None,
            is_mobile: false,
        };
        assert!(dto.validate().is_ok());

        dto.nik = Some("123".to_string());
        assert!(dto.validate().is_err());

        dto.nik = None;
        dto.password = "12345".to_string();
        assert!(dto.validate().is_err());

        dto.password = "rahasia".to_string();
        dto.id = "A 0001".to_string();
        assert!(dto.validate().is_err());
    }
}
