#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;
#[cfg(test)]
use crate::shared::constants::{ROLE_ADMIN, ROLE_MEMBER};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_member_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: "M0001".to_string(),
        role: ROLE_MEMBER.to_string(),
    }
}

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: "admin".to_string(),
        role: ROLE_ADMIN.to_string(),
    }
}

#[cfg(test)]
async fn inject_member_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_member_user());
    next.run(request).await
}

#[cfg(test)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

#[cfg(test)]
pub fn with_member_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_member_middleware))
}

#[cfg(test)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}
