/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Filter value meaning "no filter" in region query parameters
pub const FILTER_ALL: &str = "semua";

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - manages members and reads statistics
pub const ROLE_ADMIN: &str = "admin";

/// Member role - reads wilayah data and member listings
pub const ROLE_MEMBER: &str = "member";
