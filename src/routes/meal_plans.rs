use axum::{Extension, extract::State, response::IntoResponse};
use mealplanner_mealplan::{MealPlanInput, MealPlanItemInput, MealPlanUpdate};
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
    let plans = mealplanner_mealplan::list(&state.pool, &actor.user_id, page.into()).await?;

    Ok(response::page(plans))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn show(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let Some(plan) = mealplanner_mealplan::find(&state.pool, &actor.user_id, &id).await? else {
        return Err(Error::not_found("Meal plan").into());
    };

    Ok(response::ok(plan))
}

#[tracing::instrument(skip_all, fields(user_id = %actor.user_id))]
pub async fn create(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(input): Json<MealPlanInput>,
) -> ApiResult<impl IntoResponse> {
    let id = state
        .meal_plan_command
        .create(&actor.user_id, input)
        .await?;

    Ok(response::created(Created::new(id)))
}

#[tracing::instrument(skip(state, input), fields(user_id = %actor.user_id))]
pub async fn update(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    Json(input): Json<MealPlanUpdate>,
) -> ApiResult<impl IntoResponse> {
    state
        .meal_plan_command
        .update(&actor.user_id, &id, input)
        .await?;

    let plan = mealplanner_mealplan::find(&state.pool, &actor.user_id, &id).await?;

    Ok(response::ok_with_message(plan, "Meal plan updated"))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn delete(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.meal_plan_command.delete(&actor.user_id, &id).await?;

    Ok(response::ok_with_message((), "Meal plan deleted"))
}

#[tracing::instrument(skip(state, item), fields(user_id = %actor.user_id))]
pub async fn add_item(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    Json(item): Json<MealPlanItemInput>,
) -> ApiResult<impl IntoResponse> {
    let item_id = state
        .meal_plan_command
        .add_item(&actor.user_id, &id, item)
        .await?;

    Ok(response::created(Created::new(item_id)))
}

#[tracing::instrument(skip(state, item), fields(user_id = %actor.user_id))]
pub async fn update_item(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((id, item_id)): Path<(String, String)>,
    Json(item): Json<MealPlanItemInput>,
) -> ApiResult<impl IntoResponse> {
    state
        .meal_plan_command
        .update_item(&actor.user_id, &id, &item_id, item)
        .await?;

    Ok(response::ok_with_message((), "Meal plan item updated"))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn remove_item(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((id, item_id)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    state
        .meal_plan_command
        .remove_item(&actor.user_id, &id, &item_id)
        .await?;

    Ok(response::ok_with_message((), "Meal plan item removed"))
}
