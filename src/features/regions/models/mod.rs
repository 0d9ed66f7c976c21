mod city;
mod district;
mod resolved;
mod village;

pub use city::City;
pub use district::District;
pub use resolved::{ResolvedRegion, SearchHit};
pub use village::Village;
