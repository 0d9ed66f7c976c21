use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AuthResponseDto, AuthUserDto, LoginRequestDto, MeResponseDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::password::verify_password;
use crate::features::auth::services::token_service::TokenService;
use crate::features::users::models::{User, USER_COLUMNS};

/// Service for authentication operations (login, current user)
pub struct AuthService {
    pool: PgPool,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, token_service: Arc<TokenService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }

    /// Login with member id and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user: Option<User> = sqlx::query_as(&query)
            .bind(&dto.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user {} for login: {:?}", dto.id, e);
                AppError::Database(e)
            })?;

        // Same message for unknown id and wrong password
        let user = match user {
            Some(user) if verify_password(&dto.password, &user.password_hash)? => user,
            _ => {
                tracing::info!("Failed login attempt for user: {}", dto.id);
                return Err(AppError::Unauthorized("Invalid id or password".to_string()));
            }
        };

        let token = self.token_service.issue_token(&user.id, &user.role)?;
        tracing::info!("User {} logged in", user.id);

        Ok(AuthResponseDto {
            access_token: token.access_token,
            token_type: "Bearer".to_string(),
            expires_in: token.expires_in,
            user: AuthUserDto {
                id: user.id,
                name: user.name,
                role: user.role,
            },
        })
    }

    pub fn get_current_user(&self, user: AuthenticatedUser) -> MeResponseDto {
        user.into()
    }
}
