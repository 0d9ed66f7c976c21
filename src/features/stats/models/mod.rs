mod stats_row;

pub use stats_row::{MemberTotalsRow, RegionCountRow};
