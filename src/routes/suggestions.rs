use axum::{Extension, extract::State, response::IntoResponse};
use mealplanner_shared::{Actor, Error, MealType, PageArgs};
use mealplanner_suggestion::{Status, SuggestionInput, SuggestionsQuery};
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
    pub meal_type: Option<MealType>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl ListParams {
    fn into_query(self, viewer: Actor) -> SuggestionsQuery {
        SuggestionsQuery {
            search: self.search,
            meal_type: self.meal_type,
            page: PageArgs {
                page: self.page,
                limit: self.limit,
            },
            ..SuggestionsQuery::new(viewer)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LikeState {
    pub liked: bool,
}

#[derive(Debug, Serialize)]
pub struct SaveState {
    pub saved: bool,
}

/// Community feed: approved suggestions only
#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn list(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<ListParams>,
) -> ApiResult<impl IntoResponse> {
    let query = SuggestionsQuery {
        status: Some(Status::Approved),
        ..params.into_query(actor)
    };

    Ok(response::page(
        mealplanner_suggestion::filter(&state.pool, query).await?,
    ))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn mine(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(page): Query<PageQuery>,
) -> ApiResult<impl IntoResponse> {
    let query = SuggestionsQuery {
        author: Some(actor.user_id.to_owned()),
        page: page.into(),
        ..SuggestionsQuery::new(actor)
    };

    Ok(response::page(
        mealplanner_suggestion::filter(&state.pool, query).await?,
    ))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn saved(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(page): Query<PageQuery>,
) -> ApiResult<impl IntoResponse> {
    let query = SuggestionsQuery {
        saved_by: Some(actor.user_id.to_owned()),
        page: page.into(),
        ..SuggestionsQuery::new(actor)
    };

    Ok(response::page(
        mealplanner_suggestion::filter(&state.pool, query).await?,
    ))
}

/// Viewing an approved suggestion counts as a view
#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn show(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let Some(suggestion) = mealplanner_suggestion::find(&state.pool, &actor, &id).await? else {
        return Err(Error::not_found("Suggestion").into());
    };

    if suggestion.status != Status::Approved {
        return Ok(response::ok(suggestion));
    }

    state
        .suggestion_command
        .record_view(&actor.user_id, &id)
        .await?;

    let Some(suggestion) = mealplanner_suggestion::find(&state.pool, &actor, &id).await? else {
        return Err(Error::not_found("Suggestion").into());
    };

    Ok(response::ok(suggestion))
}

#[tracing::instrument(skip_all, fields(user_id = %actor.user_id))]
pub async fn create(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(input): Json<SuggestionInput>,
) -> ApiResult<impl IntoResponse> {
    let id = if actor.is_admin {
        state.suggestion_command.submit_as_admin(&actor, input).await?
    } else {
        state.suggestion_command.submit(&actor.user_id, input).await?
    };

    Ok(response::created(Created::new(id)))
}

#[tracing::instrument(skip(state, input), fields(user_id = %actor.user_id))]
pub async fn update(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    Json(input): Json<SuggestionInput>,
) -> ApiResult<impl IntoResponse> {
    state
        .suggestion_command
        .update(&actor.user_id, &id, input)
        .await?;

    let suggestion = mealplanner_suggestion::find(&state.pool, &actor, &id).await?;

    Ok(response::ok_with_message(suggestion, "Suggestion updated"))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn delete(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.suggestion_command.delete(&actor, &id).await?;

    Ok(response::ok_with_message((), "Suggestion deleted"))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn like(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let liked = state
        .suggestion_command
        .toggle_like(&actor.user_id, &id)
        .await?;

    Ok(response::ok(LikeState { liked }))
}

#[tracing::instrument(skip(state), fields(user_id = %actor.user_id))]
pub async fn save(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let saved = state
        .suggestion_command
        .toggle_save(&actor.user_id, &id)
        .await?;

    Ok(response::ok(SaveState { saved }))
}
