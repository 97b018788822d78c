//! Admin user management route handlers

use axum::{Extension, extract::State, response::IntoResponse};
use mealplanner_shared::{Actor, Error, PageArgs};
use mealplanner_user::{AdminUpdateInput, Profile, Role, Status, User, UsersQuery};
use serde::{Deserialize, Serialize};

use crate::{error::ApiResult, extract::{Json, Path, Query}, response, routes::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub role: Option<Role>,
    pub status: Option<Status>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub profile: Option<Profile>,
}

/// GET /api/admin/users - search and filter accounts
#[tracing::instrument(skip(state), fields(admin_id = %actor.user_id))]
pub async fn list(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<ListParams>,
) -> ApiResult<impl IntoResponse> {
    let query = UsersQuery {
        search: params.search,
        role: params.role,
        status: params.status,
        page: PageArgs {
            page: params.page,
            limit: params.limit,
        },
    };

    Ok(response::page(
        mealplanner_user::filter(&state.pool, query).await?,
    ))
}

#[tracing::instrument(skip(state), fields(admin_id = %actor.user_id))]
pub async fn show(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let Some(user) = mealplanner_user::find(&state.pool, &id).await? else {
        return Err(Error::not_found("User").into());
    };

    let profile = mealplanner_user::profile(&state.pool, &id).await?;

    Ok(response::ok(UserDetail { user, profile }))
}

/// PUT /api/admin/users/{id} - rename, change role or suspend
#[tracing::instrument(skip(state, input), fields(admin_id = %actor.user_id))]
pub async fn update(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    Json(input): Json<AdminUpdateInput>,
) -> ApiResult<impl IntoResponse> {
    state
        .user_command
        .update_by_admin(&actor, &id, input)
        .await?;

    let user = mealplanner_user::find(&state.pool, &id).await?;

    Ok(response::ok_with_message(user, "User updated"))
}

#[tracing::instrument(skip(state), fields(admin_id = %actor.user_id))]
pub async fn delete(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.user_command.delete(&actor, &id).await?;

    Ok(response::ok_with_message((), "User deleted"))
}
