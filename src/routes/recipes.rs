use axum::{Extension, extract::State, response::IntoResponse};
use mealplanner_recipe::{RecipeInput, RecipesQuery};
use mealplanner_shared::{Actor, Difficulty, Error, MealType, PageArgs};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiResult,
    extract::{Json, Path, Query},
    response::{self, Created},
    routes::{AppState, PageQuery},
};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub cuisine: Option<String>,
    pub meal_type: Option<MealType>,
    pub difficulty: Option<Difficulty>,
    pub dietary_tag: Option<String>,
    pub max_total_time: Option<u32>,
    #[serde(default)]
    pub mine: bool,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl ListParams {
    pub fn into_query(self, viewer: Actor) -> RecipesQuery {
        RecipesQuery {
            search: self.search,
            cuisine: self.cuisine,
            meal_type: self.meal_type,
            difficulty: self.difficulty,
            dietary_tag: self.dietary_tag,
            only_mine: self.mine,
            max_total_time: self.max_total_time,
            page: PageArgs {
                page: self.page,
                limit: self.limit,
            },
            ..RecipesQuery::new(viewer)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FavoriteState {
    pub is_favorite: bool,
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn list(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<ListParams>,
) -> ApiResult<impl IntoResponse> {
    let recipes = mealplanner_recipe::filter(&state.pool, params.into_query(actor)).await?;

    Ok(response::page(recipes))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn favorites(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(page): Query<PageQuery>,
) -> ApiResult<impl IntoResponse> {
    let recipes = mealplanner_recipe::favorites(&state.pool, &actor, page.into()).await?;

    Ok(response::page(recipes))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn show(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let Some(recipe) = mealplanner_recipe::find(&state.pool, &actor, &id).await? else {
        return Err(Error::not_found("Recipe").into());
    };

    Ok(response::ok(recipe))
}

#[tracing::instrument(skip_all, fields(user_id = %actor.user_id))]
pub async fn create(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(input): Json<RecipeInput>,
) -> ApiResult<impl IntoResponse> {
    let id = state.recipe_command.create(&actor.user_id, input).await?;

    Ok(response::created(Created::new(id)))
}

#[tracing::instrument(skip(state, input), fields(user_id = %actor.user_id))]
pub async fn update(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    Json(input): Json<RecipeInput>,
) -> ApiResult<impl IntoResponse> {
    state.recipe_command.update(&actor, &id, input).await?;

    let recipe = mealplanner_recipe::find(&state.pool, &actor, &id).await?;

    Ok(response::ok_with_message(recipe, "Recipe updated"))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn delete(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.recipe_command.delete(&actor, &id).await?;

    Ok(response::ok_with_message((), "Recipe deleted"))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let is_favorite = state
        .recipe_command
        .toggle_favorite(&actor.user_id, &id)
        .await?;

    Ok(response::ok(FavoriteState { is_favorite }))
}
