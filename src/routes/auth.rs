use axum::{Extension, extract::State, http::StatusCode, response::IntoResponse};
use mealplanner_shared::{Actor, Error};
use mealplanner_user::{
    ChangePasswordInput, LoginInput, Profile, ProfileInput, RegisterInput, User, jwt::generate_jwt,
};
use serde::Serialize;

use crate::{error::ApiResult, extract::Json, response, routes::AppState};

#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct MePayload {
    pub user: User,
    pub profile: Option<Profile>,
}

fn issue_token(state: &AppState, user: &User) -> ApiResult<String> {
    Ok(generate_jwt(
        &user.id,
        user.role,
        &state.config.jwt.secret,
        state.config.jwt.expiration_days,
    )?)
}

#[tracing::instrument(skip_all, fields(email = %input.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> ApiResult<impl IntoResponse> {
    let id = state.user_command.register(input).await?;
    let Some(user) = mealplanner_user::find(&state.pool, &id).await? else {
        return Err(Error::not_found("User").into());
    };

    let token = issue_token(&state, &user)?;
    tracing::info!(user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, response::ok(AuthPayload { token, user })))
}

#[tracing::instrument(skip_all, fields(email = %input.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> ApiResult<impl IntoResponse> {
    let user = state.user_command.login(input).await?;
    let token = issue_token(&state, &user)?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(response::ok(AuthPayload { token, user }))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn me(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<impl IntoResponse> {
    let Some(user) = mealplanner_user::find(&state.pool, &actor.user_id).await? else {
        return Err(Error::not_found("User").into());
    };

    let profile = mealplanner_user::profile(&state.pool, &actor.user_id).await?;

    Ok(response::ok(MePayload { user, profile }))
}

#[tracing::instrument(skip_all, fields(user_id = %actor.user_id))]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(input): Json<ChangePasswordInput>,
) -> ApiResult<impl IntoResponse> {
    state
        .user_command
        .change_password(&actor.user_id, input)
        .await?;

    Ok(response::ok_with_message((), "Password updated"))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn profile(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<impl IntoResponse> {
    let Some(profile) = mealplanner_user::profile(&state.pool, &actor.user_id).await? else {
        return Err(Error::not_found("Profile").into());
    };

    Ok(response::ok(profile))
}

#[tracing::instrument(skip_all, fields(user_id = %actor.user_id))]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(input): Json<ProfileInput>,
) -> ApiResult<impl IntoResponse> {
    state
        .user_command
        .update_profile(&actor.user_id, input)
        .await?;

    let profile = mealplanner_user::profile(&state.pool, &actor.user_id).await?;

    Ok(response::ok_with_message(profile, "Profile updated"))
}
