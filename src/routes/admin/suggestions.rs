//! Suggestion review queue

use axum::{Extension, extract::State, response::IntoResponse};
use mealplanner_shared::{Actor, PageArgs};
use mealplanner_suggestion::{Decision, Status, SuggestionInput, SuggestionsQuery};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiResult,
    extract::{Json, Path, Query},
    response::{self, Created},
    routes::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<Status>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApproveBody {
    #[serde(default)]
    pub publish_recipe: bool,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RejectBody {
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct Reviewed {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
}

#[tracing::instrument(skip(state), fields(admin_id = %actor.user_id))]
pub async fn list(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<ListParams>,
) -> ApiResult<impl IntoResponse> {
    let query = SuggestionsQuery {
        status: params.status,
        search: params.search,
        page: PageArgs {
            page: params.page,
            limit: params.limit,
        },
        ..SuggestionsQuery::new(actor)
    };

    Ok(response::page(
        mealplanner_suggestion::filter(&state.pool, query).await?,
    ))
}

/// Admin-authored suggestions are published without review
#[tracing::instrument(skip_all, fields(admin_id = %actor.user_id))]
pub async fn create(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(input): Json<SuggestionInput>,
) -> ApiResult<impl IntoResponse> {
    let id = state
        .suggestion_command
        .submit_as_admin(&actor, input)
        .await?;

    Ok(response::created(Created::new(id)))
}

#[tracing::instrument(skip(state, body), fields(admin_id = %actor.user_id))]
pub async fn approve(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    body: Option<Json<ApproveBody>>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body.unwrap_or_default();

    let recipe_id = state
        .suggestion_command
        .review(
            &actor,
            &id,
            Decision::Approve {
                publish_recipe: body.publish_recipe,
                note: body.note,
            },
        )
        .await?;

    Ok(response::ok_with_message(
        Reviewed {
            status: Status::Approved,
            recipe_id,
        },
        "Suggestion approved",
    ))
}

#[tracing::instrument(skip(state, body), fields(admin_id = %actor.user_id))]
pub async fn reject(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    Json(body): Json<RejectBody>,
) -> ApiResult<impl IntoResponse> {
    state
        .suggestion_command
        .review(&actor, &id, Decision::Reject { reason: body.reason })
        .await?;

    Ok(response::ok_with_message(
        Reviewed {
            status: Status::Rejected,
            recipe_id: None,
        },
        "Suggestion rejected",
    ))
}
