mod user;

pub use user::{Gender, User, UserRole, USER_COLUMNS};
