use sqlx::FromRow;

/// Aggregate counts over a set of members
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct MemberTotalsRow {
    pub total_members: i64,
    pub total_male: i64,
    pub total_female: i64,
    pub total_mobile: i64,
    pub with_region: i64,
}

/// Member counts grouped by a village id prefix
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RegionCountRow {
    pub region_id: String,
    pub total_members: i64,
    pub total_male: i64,
    pub total_female: i64,
    pub total_mobile: i64,
}
