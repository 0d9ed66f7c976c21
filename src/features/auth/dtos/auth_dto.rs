use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::CreateUserDto;
use crate::features::users::models::{Gender, UserRole};
use crate::shared::validation::{MEMBER_ID_REGEX, NIK_REGEX};

/// Request DTO for member login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    /// Member id
    #[validate(length(min = 1, message = "Id is required"))]
    pub id: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request DTO for public member sign-up. The role is always `member`.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(
        length(min = 1, max = 32, message = "Id must be 1-32 characters"),
        regex(path = *MEMBER_ID_REGEX, message = "Id may only contain letters, digits, '.' and '-'")
    )]
    pub id: String,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub birth_date: Option<NaiveDate>,

    #[validate(length(max = 32, message = "Phone number must not exceed 32 characters"))]
    pub telp: Option<String>,

    pub gender: Option<Gender>,

    #[validate(length(max = 128, message = "Job must not exceed 128 characters"))]
    pub job: Option<String>,

    /// Composite wilayah village id picked from `/api/wilayah`
    pub village_id: Option<String>,

    #[validate(regex(path = *NIK_REGEX, message = "NIK must be exactly 16 digits"))]
    pub nik: Option<String>,

    pub address: Option<String>,

    #[serde(default)]
    pub is_mobile: bool,
}

impl From<RegisterRequestDto> for CreateUserDto {
    fn from(dto: RegisterRequestDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            password: dto.password,
            birth_date: dto.birth_date,
            telp: dto.telp,
            gender: dto.gender,
            job: dto.job,
            role: UserRole::Member,
            village_id: dto.village_id,
            nik: dto.nik,
            address: dto.address,
            is_mobile: dto.is_mobile,
        }
    }
}

/// Response DTO for authentication
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiry time in seconds
    pub expires_in: i64,
    pub user: AuthUserDto,
}

/// Logged-in member summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    pub id: String,
    pub name: String,
    pub role: String,
}

/// DTO for /auth/me response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub user_id: String,
    pub role: String,
}

impl From<AuthenticatedUser> for MeResponseDto {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            user_id: user.user_id,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_ignores_requested_role() {
        let dto: RegisterRequestDto = serde_json::from_value(json!({
            "id": "M0200",
            "name": "Nyai Walidah",
            "password": "rahasia123",
            "role": "admin",
            "village_id": "3578011001",
        }))
        .unwrap();
        assert!(dto.validate().is_ok());

        let create: CreateUserDto = dto.into();
        assert_eq!(create.role, UserRole::Member);
        assert_eq!(create.village_id.as_deref(), Some("3578011001"));
        assert!(!create.is_mobile);
    }
}
