//! Village id prefix convention.
//!
//! Village ids are fixed-width digit strings (e.g. `3576011001`). The first
//! 4 characters identify the owning city and the first 6 the owning district:
//!
//! ```text
//! 3576011001
//! └──┘          city     3576
//! └────┘        district 357601
//! ```
//!
//! The loader does not verify this; it is an assumption about the dataset.
//! SQL aggregation uses the same widths via `LEFT(village_id, n)`.

/// Number of leading characters of a village id that form the city prefix
pub const CITY_PREFIX_LEN: usize = 4;

/// Number of leading characters of a village id that form the district prefix
pub const DISTRICT_PREFIX_LEN: usize = 6;

/// City prefix of a village id, or `None` for malformed (short) ids
pub fn city_prefix(village_id: &str) -> Option<&str> {
    if village_id.len() < DISTRICT_PREFIX_LEN {
        return None;
    }
    village_id.get(..CITY_PREFIX_LEN)
}

/// District prefix of a village id, or `None` for malformed (short) ids
pub fn district_prefix(village_id: &str) -> Option<&str> {
    if village_id.len() < DISTRICT_PREFIX_LEN {
        return None;
    }
    village_id.get(..DISTRICT_PREFIX_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_of_full_village_id() {
        assert_eq!(city_prefix("3576011001"), Some("3576"));
        assert_eq!(district_prefix("3576011001"), Some("357601"));
    }

    #[test]
    fn test_prefixes_at_minimum_length() {
        assert_eq!(city_prefix("357601"), Some("3576"));
        assert_eq!(district_prefix("357601"), Some("357601"));
    }

    #[test]
    fn test_short_ids_have_no_prefix() {
        assert_eq!(city_prefix("35760"), None);
        assert_eq!(district_prefix("35760"), None);
        assert_eq!(city_prefix("3576"), None);
        assert_eq!(city_prefix(""), None);
    }

    #[test]
    fn test_non_char_boundary_is_rejected() {
        // 'é' is two bytes, so byte 4 falls inside it
        assert_eq!(city_prefix("357é0110"), None);
    }
}
