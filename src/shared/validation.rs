use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating member ids
    /// Letters, digits, dots and hyphens; must start with a letter or digit
    /// - Valid: "A0001", "3578-0001", "am.2024.17"
    /// - Invalid: "-A0001", "A 0001", "A_0001", ""
    pub static ref MEMBER_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9.-]*$").unwrap();

    /// Regex for validating NIK (Nomor Induk Kependudukan), exactly 16 digits
    /// - Valid: "3578010101900001"
    /// - Invalid: "357801010190000", "357801010190000X"
    pub static ref NIK_REGEX: Regex = Regex::new(r"^\d{16}$").unwrap();
}
