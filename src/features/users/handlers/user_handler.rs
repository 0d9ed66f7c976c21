use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{
    CreateUserDto, UpdateUserDto, UserQueryParams, UserResponseDto,
};
use crate::features::users::services::UserService;
use crate::shared::types::ApiResponse;

/// List members
#[utoipa::path(
    get,
    path = "/api/users",
    params(UserQueryParams),
    responses(
        (status = 200, description = "List of members", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    _user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    AppQuery(params): AppQuery<UserQueryParams>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let (users, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::list(users, total)))
}

/// Get a member by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "Member id")
    ),
    responses(
        (status = 200, description = "Member details", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Member not found")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    _user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user = service.get_by_id(&id).await?;
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}

/// Create a member (admin only)
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Member created", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error or unknown village"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "Member id or NIK already exists")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<CreateUserDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    tracing::debug!(admin_id = %admin.user_id, "Creating member");
    let user = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(user),
            Some("Member created successfully".to_string()),
            None,
        )),
    ))
}

/// Update a member (admin only)
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "Member id")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Member updated", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error or unknown village"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Member not found")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateUserDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.update(&id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(user),
        Some("Member updated successfully".to_string()),
        None,
    )))
}

/// Delete a member (admin only)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "Member id")
    ),
    responses(
        (status = 200, description = "Member deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Member not found")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    if admin.user_id == id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    service.delete(&id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Member deleted successfully".to_string()),
        None,
    )))
}
