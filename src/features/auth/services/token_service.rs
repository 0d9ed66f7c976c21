use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::Claims;

/// Access token returned to clients
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Service for issuing HS256 access tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    issuer: String,
    expires_in_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            expires_in_secs: config.jwt_expires_in.as_secs() as i64,
        }
    }

    /// Issue an access token for the given subject and role
    pub fn issue_token(&self, subject: &str, role: &str) -> Result<IssuedToken> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now + self.expires_in_secs,
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("Failed to sign access token: {}", e);
                AppError::Internal("Failed to sign access token".to_string())
            })?;

        tracing::debug!("Issued access token for user: {}", subject);

        Ok(IssuedToken {
            access_token,
            expires_in: self.expires_in_secs,
        })
    }
}
