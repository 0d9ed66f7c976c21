use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::regions::{dtos as regions_dtos, handlers as regions_handlers};
use crate::features::stats::{dtos as stats_dtos, handlers as stats_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers, models as users_models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        auth::handlers::register,
        auth::handlers::get_me,
        // Wilayah
        regions_handlers::list_cities,
        regions_handlers::get_city,
        regions_handlers::list_districts,
        regions_handlers::list_villages,
        regions_handlers::resolve_village,
        regions_handlers::search_villages,
        // Users
        users_handlers::list_users,
        users_handlers::get_user,
        users_handlers::create_user,
        users_handlers::update_user,
        users_handlers::delete_user,
        // Stats (admin)
        stats_handlers::get_global_stats,
        stats_handlers::get_city_stats,
        stats_handlers::get_city_detail_stats,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::LoginRequestDto,
            auth::dtos::RegisterRequestDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::AuthUserDto,
            auth::dtos::MeResponseDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::MeResponseDto>,
            // Wilayah
            regions_dtos::CityResponseDto,
            regions_dtos::DistrictResponseDto,
            regions_dtos::VillageResponseDto,
            regions_dtos::ResolvedRegionResponseDto,
            regions_dtos::VillageSearchHitDto,
            ApiResponse<Vec<regions_dtos::CityResponseDto>>,
            ApiResponse<regions_dtos::CityResponseDto>,
            ApiResponse<Vec<regions_dtos::DistrictResponseDto>>,
            ApiResponse<Vec<regions_dtos::VillageResponseDto>>,
            ApiResponse<regions_dtos::ResolvedRegionResponseDto>,
            ApiResponse<Vec<regions_dtos::VillageSearchHitDto>>,
            // Users
            users_models::Gender,
            users_models::UserRole,
            users_dtos::CreateUserDto,
            users_dtos::UpdateUserDto,
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Stats
            stats_dtos::GlobalStatsDto,
            stats_dtos::CityStatsDto,
            stats_dtos::DistrictStatsDto,
            stats_dtos::CityDetailStatsDto,
            ApiResponse<stats_dtos::GlobalStatsDto>,
            ApiResponse<Vec<stats_dtos::CityStatsDto>>,
            ApiResponse<stats_dtos::CityDetailStatsDto>,
        )
    ),
    tags(
        (name = "auth", description = "Login, sign-up and current session"),
        (name = "wilayah", description = "Administrative regions (cities, districts, villages)"),
        (name = "users", description = "Member management"),
        (name = "stats", description = "Member statistics by region (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Arek Muhammadiyah API",
        version = "0.1.0",
        description = "Member administration and wilayah directory API",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_feature_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/wilayah/search"));
        assert!(paths.contains_key("/api/wilayah/cities/{city_id}/districts/{district_id}/villages"));
        assert!(paths.contains_key("/api/users/{id}"));
        assert!(paths.contains_key("/api/stats/cities/{city_id}"));
        assert!(paths.contains_key("/api/auth/login"));
        assert!(paths.contains_key("/api/auth/register"));
    }

    #[test]
    fn test_swagger_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "Desc".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
