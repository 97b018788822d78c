//! Admin route handlers, guarded by `admin_middleware`

mod dashboard;
mod recipes;
mod suggestions;
mod users;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::{AppState, catalog};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::show))
        .route("/users", get(users::list))
        .route(
            "/users/{id}",
            get(users::show).put(users::update).delete(users::delete),
        )
        .route("/suggestions", get(suggestions::list).post(suggestions::create))
        .route("/suggestions/{id}/approve", post(suggestions::approve))
        .route("/suggestions/{id}/reject", post(suggestions::reject))
        .route("/food-categories", post(catalog::create_category))
        .route(
            "/food-categories/{id}",
            put(catalog::update_category).delete(catalog::delete_category),
        )
        .route("/ingredients", post(catalog::create_ingredient))
        .route(
            "/ingredients/{id}",
            put(catalog::update_ingredient).delete(catalog::delete_ingredient),
        )
        .route("/recipes", get(recipes::list))
        .route("/recipes/{id}", delete(recipes::delete))
}
