use argon2::password_hash::{
    rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier,
    SaltString,
};
use argon2::Argon2;

use crate::core::error::{AppError, Result};

/// Hash a password into a PHC string (argon2id, random salt)
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            AppError::Internal("Failed to hash password".to_string())
        })
}

/// Check a password against a stored PHC string
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| {
        tracing::error!("Stored password hash is malformed: {}", e);
        AppError::Internal("Stored password hash is malformed".to_string())
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(e) => {
            tracing::error!("Failed to verify password: {}", e);
            Err(AppError::Internal("Failed to verify password".to_string()))
        }
    }
}
