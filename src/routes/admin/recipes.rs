//! Recipe moderation

use axum::{Extension, extract::State, response::IntoResponse};
use mealplanner_shared::Actor;

use crate::{
    error::ApiResult,
    extract::{Path, Query},
    response,
    routes::{AppState, recipes::ListParams},
};

/// Admins see private recipes too
#[tracing::instrument(skip(state), fields(admin_id = %actor.user_id))]
pub async fn list(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<ListParams>,
) -> ApiResult<impl IntoResponse> {
    let recipes = mealplanner_recipe::filter(&state.pool, params.into_query(actor)).await?;

    Ok(response::page(recipes))
}

#[tracing::instrument(skip(state), fields(admin_id = %actor.user_id))]
pub async fn delete(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.recipe_command.delete(&actor, &id).await?;

    tracing::info!(recipe_id = %id, "recipe removed by admin");

    Ok(response::ok_with_message((), "Recipe deleted"))
}
