//! Admin authorization middleware for Axum

use axum::{extract::Request, middleware::Next, response::Response};
use mealplanner_shared::{Actor, Error};
use tracing::warn;

use crate::error::ApiError;

/// Verifies the actor set by `auth_middleware` has admin privileges
pub async fn admin_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let Some(actor) = request.extensions().get::<Actor>() else {
        warn!("Admin middleware: no authenticated user found in request extensions");
        return Err(ApiError::unauthorized("Authentication required"));
    };

    if !actor.is_admin {
        warn!(user_id = %actor.user_id, "Non-admin user attempted to access admin route");
        return Err(ApiError(Error::Forbidden));
    }

    Ok(next.run(request).await)
}
