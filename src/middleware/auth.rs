use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use mealplanner_shared::{Actor, Error};
use mealplanner_user::jwt::validate_jwt;

use crate::{error::ApiError, routes::AppState};

/// Authentication middleware that validates the bearer token
///
/// The account is reloaded on every request so role changes, suspensions and
/// deletions apply immediately. Inserts an [`Actor`] extension.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();

    let Ok(TypedHeader(Authorization(bearer))) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(&mut parts, &state).await
    else {
        tracing::debug!(path = %parts.uri.path(), "missing bearer token");
        return Err(ApiError::unauthorized("Authentication required"));
    };

    let claims = match validate_jwt(bearer.token(), &state.config.jwt.secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(error = %e, "invalid or expired token");
            return Err(ApiError::unauthorized("Invalid or expired token"));
        }
    };

    let Some(user) = mealplanner_user::find(&state.pool, &claims.sub).await? else {
        tracing::warn!(user_id = %claims.sub, "token for unknown user");
        return Err(ApiError::unauthorized("Invalid or expired token"));
    };

    if !user.is_active() {
        tracing::warn!(user_id = %user.id, "suspended user rejected");
        return Err(ApiError(Error::Forbidden));
    }

    let actor = if user.is_admin() {
        Actor::admin(user.id)
    } else {
        Actor::user(user.id)
    };

    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(actor);

    Ok(next.run(request).await)
}
