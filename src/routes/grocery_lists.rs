use axum::{Extension, extract::State, response::IntoResponse};
use mealplanner_grocery::{GenerateInput, GroceryListInput};
use mealplanner_shared::{Actor, Error};

use crate::{
    error::ApiResult,
    extract::{Json, Path, Query},
    response::{self, Created},
    routes::{AppState, PageQuery},
};

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn list(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(page): Query<PageQuery>,
) -> ApiResult<impl IntoResponse> {
    let lists = mealplanner_grocery::list(&state.pool, &actor.user_id, page.into()).await?;

    Ok(response::page(lists))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn show(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let Some(list) = mealplanner_grocery::find(&state.pool, &actor.user_id, &id).await? else {
        return Err(Error::not_found("Grocery list").into());
    };

    Ok(response::ok(list))
}

#[tracing::instrument(skip_all, fields(user_id = %actor.user_id))]
pub async fn create(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(input): Json<GroceryListInput>,
) -> ApiResult<impl IntoResponse> {
    let id = state.grocery_command.create(&actor.user_id, input).await?;

    Ok(response::created(Created::new(id)))
}

/// Builds a list from the ingredients of one of the caller's meal plans
#[tracing::instrument(skip_all, fields(user_id = %actor.user_id, meal_plan_id = %input.meal_plan_id))]
pub async fn generate(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(input): Json<GenerateInput>,
) -> ApiResult<impl IntoResponse> {
    let id = state
        .grocery_command
        .generate(&actor.user_id, input)
        .await?;

    let list = mealplanner_grocery::find(&state.pool, &actor.user_id, &id).await?;

    Ok(response::created(list))
}

#[tracing::instrument(skip(state, input), fields(user_id = %actor.user_id))]
pub async fn update(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    Json(input): Json<GroceryListInput>,
) -> ApiResult<impl IntoResponse> {
    state
        .grocery_command
        .update(&actor.user_id, &id, input)
        .await?;

    let list = mealplanner_grocery::find(&state.pool, &actor.user_id, &id).await?;

    Ok(response::ok_with_message(list, "Grocery list updated"))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn delete(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.grocery_command.delete(&actor.user_id, &id).await?;

    Ok(response::ok_with_message((), "Grocery list deleted"))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn toggle_item(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((id, index)): Path<(String, usize)>,
) -> ApiResult<impl IntoResponse> {
    let item = state
        .grocery_command
        .toggle_item(&actor.user_id, &id, index)
        .await?;

    Ok(response::ok(item))
}
