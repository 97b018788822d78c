use axum::{Extension, extract::State, response::IntoResponse};
use mealplanner_shared::Actor;

use crate::{error::ApiResult, query::dashboard_stats, response, routes::AppState};

/// GET /api/admin/dashboard
#[tracing::instrument(skip(state), fields(admin_id = %actor.user_id))]
pub async fn show(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<impl IntoResponse> {
    Ok(response::ok(dashboard_stats(&state.pool).await?))
}
