use axum::{extract::State, response::IntoResponse};
use mealplanner_catalog::{CategoryInput, IngredientInput, IngredientsQuery};
use mealplanner_shared::PageArgs;
use serde::Deserialize;

use crate::{
    error::ApiResult,
    extract::{Json, Path, Query},
    response::{self, Created},
    routes::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct IngredientParams {
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn categories(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(response::ok(
        mealplanner_catalog::list_categories(&state.pool).await?,
    ))
}

pub async fn ingredients(
    State(state): State<AppState>,
    Query(params): Query<IngredientParams>,
) -> ApiResult<impl IntoResponse> {
    let query = IngredientsQuery {
        search: params.search,
        category_id: params.category_id,
        page: PageArgs {
            page: params.page,
            limit: params.limit,
        },
    };

    Ok(response::page(
        mealplanner_catalog::filter_ingredients(&state.pool, query).await?,
    ))
}

// Admin management, mounted under /api/admin

#[tracing::instrument(skip_all, fields(name = %input.name))]
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> ApiResult<impl IntoResponse> {
    let id = state.catalog_command.create_category(input).await?;

    Ok(response::created(Created::new(id)))
}

#[tracing::instrument(skip(state, input))]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CategoryInput>,
) -> ApiResult<impl IntoResponse> {
    state.catalog_command.update_category(&id, input).await?;

    let category = mealplanner_catalog::find_category(&state.pool, &id).await?;

    Ok(response::ok_with_message(category, "Food category updated"))
}

#[tracing::instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.catalog_command.delete_category(&id).await?;

    Ok(response::ok_with_message((), "Food category deleted"))
}

#[tracing::instrument(skip_all, fields(name = %input.name))]
pub async fn create_ingredient(
    State(state): State<AppState>,
    Json(input): Json<IngredientInput>,
) -> ApiResult<impl IntoResponse> {
    let id = state.catalog_command.create_ingredient(input).await?;

    Ok(response::created(Created::new(id)))
}

#[tracing::instrument(skip(state, input))]
pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<IngredientInput>,
) -> ApiResult<impl IntoResponse> {
    state.catalog_command.update_ingredient(&id, input).await?;

    let ingredient = mealplanner_catalog::find_ingredient(&state.pool, &id).await?;

    Ok(response::ok_with_message(ingredient, "Ingredient updated"))
}

#[tracing::instrument(skip(state))]
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.catalog_command.delete_ingredient(&id).await?;

    Ok(response::ok_with_message((), "Ingredient deleted"))
}
