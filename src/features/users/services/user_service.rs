use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::password::hash_password;
use crate::features::regions::code::{CITY_PREFIX_LEN, DISTRICT_PREFIX_LEN};
use crate::features::regions::RegionDirectory;
use crate::features::users::dtos::{
    CreateUserDto, UpdateUserDto, UserQueryParams, UserResponseDto,
};
use crate::features::users::models::{User, UserRole, USER_COLUMNS};

/// Convert database error to a more specific AppError
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // unique_violation
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            if db_err.constraint() == Some("users_nik_key") {
                return AppError::Conflict("A member with this NIK already exists".to_string());
            }
            return AppError::Conflict("A member with this id already exists".to_string());
        }
        // check_violation
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23514")) {
            return AppError::BadRequest("Invalid value for a constrained column".to_string());
        }
    }
    AppError::Database(e)
}

/// WHERE clause shared by list and count. Every filter is optional and bound
/// positionally: $1 search, $2 city, $3 district, $4 village, $5 gender, $6 is_mobile.
fn list_where_clause() -> String {
    format!(
        r#"
        WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\' OR nik ILIKE $1 ESCAPE '\'
               OR telp ILIKE $1 ESCAPE '\')
          AND ($2::text IS NULL OR LEFT(village_id, {city}) = $2)
          AND ($3::text IS NULL OR LEFT(village_id, {district}) = $3)
          AND ($4::text IS NULL OR village_id = $4)
          AND ($5::text IS NULL OR gender = $5)
          AND ($6::boolean IS NULL OR is_mobile = $6)
        "#,
        city = CITY_PREFIX_LEN,
        district = DISTRICT_PREFIX_LEN,
    )
}

/// Partial update. `$9` NULL keeps the village, an empty string clears it.
fn update_query() -> String {
    format!(
        r#"
        UPDATE users SET
            name = COALESCE($2, name),
            password_hash = COALESCE($3, password_hash),
            birth_date = COALESCE($4, birth_date),
            telp = COALESCE($5, telp),
            gender = COALESCE($6, gender),
            job = COALESCE($7, job),
            role = COALESCE($8, role),
            village_id = CASE WHEN $9::text IS NULL THEN village_id ELSE NULLIF($9, '') END,
            nik = COALESCE($10, nik),
            address = COALESCE($11, address),
            is_mobile = COALESCE($12, is_mobile),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        USER_COLUMNS
    )
}

pub struct UserService {
    pool: PgPool,
    directory: Arc<RegionDirectory>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("pool", &"<PgPool>")
            .field("regions_loaded", &self.directory.is_loaded())
            .finish()
    }
}

impl UserService {
    pub fn new(pool: PgPool, directory: Arc<RegionDirectory>) -> Self {
        Self { pool, directory }
    }

    /// Reject village ids the directory does not know.
    ///
    /// Skipped while no dataset is loaded so member management keeps working
    /// when the wilayah file is missing.
    fn check_village(&self, village_id: Option<&str>) -> Result<()> {
        let Some(village_id) = village_id.filter(|v| !v.is_empty()) else {
            return Ok(());
        };
        if !self.directory.is_loaded() {
            tracing::debug!(village_id, "Region directory not loaded, skipping village check");
            return Ok(());
        }
        match self.directory.resolve_village(village_id) {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Err(AppError::BadRequest(format!(
                "Unknown village id '{}'",
                village_id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    fn to_dto(&self, user: User) -> UserResponseDto {
        UserResponseDto::enriched(user, &self.directory)
    }

    /// List members with pagination and filters
    pub async fn list(&self, params: &UserQueryParams) -> Result<(Vec<UserResponseDto>, i64)> {
        let filters = params.filters();
        let where_clause = list_where_clause();

        let count_query = format!("SELECT COUNT(*) FROM users {}", where_clause);
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&filters.search_pattern)
            .bind(&filters.city_id)
            .bind(&filters.district_id)
            .bind(&filters.village_id)
            .bind(filters.gender)
            .bind(filters.is_mobile)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let list_query = format!(
            "SELECT {} FROM users {} ORDER BY created_at DESC LIMIT $7 OFFSET $8",
            USER_COLUMNS, where_clause
        );
        let users = sqlx::query_as::<_, User>(&list_query)
            .bind(&filters.search_pattern)
            .bind(&filters.city_id)
            .bind(&filters.district_id)
            .bind(&filters.village_id)
            .bind(filters.gender)
            .bind(filters.is_mobile)
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let dtos = users.into_iter().map(|u| self.to_dto(u)).collect();
        Ok((dtos, total))
    }

    async fn find(&self, id: &str) -> Result<User> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Member with id '{}' not found", id)))
    }

    /// Get a member by id
    pub async fn get_by_id(&self, id: &str) -> Result<UserResponseDto> {
        let user = self.find(id).await?;
        Ok(self.to_dto(user))
    }

    /// Create a new member
    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        self.check_village(dto.village_id.as_deref())?;
        let password_hash = hash_password(&dto.password)?;

        let query = format!(
            r#"
            INSERT INTO users (id, name, password_hash, birth_date, telp, gender, job, role,
                               village_id, nik, address, is_mobile)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&dto.id)
            .bind(&dto.name)
            .bind(&password_hash)
            .bind(dto.birth_date)
            .bind(&dto.telp)
            .bind(dto.gender.map(|g| g.as_str()))
            .bind(&dto.job)
            .bind(dto.role.as_str())
            .bind(dto.village_id.as_deref().filter(|v| !v.is_empty()))
            .bind(&dto.nik)
            .bind(&dto.address)
            .bind(dto.is_mobile)
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)?;

        tracing::info!(user_id = %user.id, role = %user.role, "Member created");
        Ok(self.to_dto(user))
    }

    /// Update an existing member. Absent fields keep their stored value and
    /// an empty `village_id` clears the member's village.
    pub async fn update(&self, id: &str, dto: UpdateUserDto) -> Result<UserResponseDto> {
        self.check_village(dto.village_id.as_deref())?;
        let password_hash = dto.password.as_deref().map(hash_password).transpose()?;

        let query = update_query();
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&password_hash)
            .bind(dto.birth_date)
            .bind(&dto.telp)
            .bind(dto.gender.map(|g| g.as_str()))
            .bind(&dto.job)
            .bind(dto.role.map(|r| r.as_str()))
            .bind(dto.village_id.as_deref())
            .bind(&dto.nik)
            .bind(&dto.address)
            .bind(dto.is_mobile)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("Member with id '{}' not found", id)))?;

        tracing::info!(user_id = %user.id, "Member updated");
        Ok(self.to_dto(user))
    }

    /// Delete a member
    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Member with id '{}' not found",
                id
            )));
        }

        tracing::info!(user_id = %id, "Member deleted");
        Ok(())
    }

    /// Create the bootstrap admin account if it does not exist yet
    pub async fn ensure_admin(&self, id: &str, name: &str, password: &str) -> Result<()> {
        let password_hash = hash_password(password)?;
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, password_hash, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(&password_hash)
        .bind(UserRole::Admin.as_str())
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() > 0 {
            tracing::info!(user_id = %id, "Bootstrap admin created");
        }
        Ok(())
    }
}
