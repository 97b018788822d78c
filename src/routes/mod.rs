use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use mealplanner_ai::{Generator, TextGenerator};
use mealplanner_shared::Error;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{config::Config, error::ApiError};

mod admin;
mod ai;
mod auth;
mod catalog;
mod grocery_lists;
mod health;
mod meal_plans;
mod recipes;
mod suggestions;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    pub user_command: mealplanner_user::Command,
    pub catalog_command: mealplanner_catalog::Command,
    pub recipe_command: mealplanner_recipe::Command,
    pub meal_plan_command: mealplanner_mealplan::Command,
    pub suggestion_command: mealplanner_suggestion::Command,
    pub grocery_command: mealplanner_grocery::Command,
    pub generator: Generator,
}

impl AppState {
    pub fn new(config: Config, pool: SqlitePool, text_generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            config: Arc::new(config),
            user_command: mealplanner_user::Command(pool.clone()),
            catalog_command: mealplanner_catalog::Command(pool.clone()),
            recipe_command: mealplanner_recipe::Command(pool.clone()),
            meal_plan_command: mealplanner_mealplan::Command(pool.clone()),
            suggestion_command: mealplanner_suggestion::Command(pool.clone()),
            grocery_command: mealplanner_grocery::Command(pool.clone()),
            generator: Generator::new(text_generator),
            pool,
        }
    }
}

/// `page` and `limit` query parameters of list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl From<PageQuery> for mealplanner_shared::PageArgs {
    fn from(value: PageQuery) -> Self {
        Self {
            page: value.page,
            limit: value.limit,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/auth/password", put(auth::change_password))
        .route("/profile", get(auth::profile).put(auth::update_profile))
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route("/recipes/favorites", get(recipes::favorites))
        .route(
            "/recipes/{id}",
            get(recipes::show).put(recipes::update).delete(recipes::delete),
        )
        .route("/recipes/{id}/favorite", post(recipes::toggle_favorite))
        .route("/meal-plans", get(meal_plans::list).post(meal_plans::create))
        .route(
            "/meal-plans/{id}",
            get(meal_plans::show)
                .put(meal_plans::update)
                .delete(meal_plans::delete),
        )
        .route("/meal-plans/{id}/items", post(meal_plans::add_item))
        .route(
            "/meal-plans/{id}/items/{item_id}",
            put(meal_plans::update_item).delete(meal_plans::remove_item),
        )
        .route("/suggestions", get(suggestions::list).post(suggestions::create))
        .route("/suggestions/mine", get(suggestions::mine))
        .route("/suggestions/saved", get(suggestions::saved))
        .route(
            "/suggestions/{id}",
            get(suggestions::show)
                .put(suggestions::update)
                .delete(suggestions::delete),
        )
        .route("/suggestions/{id}/like", post(suggestions::like))
        .route("/suggestions/{id}/save", post(suggestions::save))
        .route(
            "/grocery-lists",
            get(grocery_lists::list).post(grocery_lists::create),
        )
        .route("/grocery-lists/generate", post(grocery_lists::generate))
        .route(
            "/grocery-lists/{id}",
            get(grocery_lists::show)
                .put(grocery_lists::update)
                .delete(grocery_lists::delete),
        )
        .route(
            "/grocery-lists/{id}/items/{index}/toggle",
            post(grocery_lists::toggle_item),
        )
        .route("/food-categories", get(catalog::categories))
        .route("/ingredients", get(catalog::ingredients))
        .route("/ai/recipes", post(ai::recipe))
        .route("/ai/meal-plans", post(ai::meal_plan))
        .nest(
            "/admin",
            admin::router().route_layer(middleware::from_fn(
                crate::middleware::admin_middleware,
            )),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            crate::middleware::auth_middleware,
        ));

    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .nest("/api", api)
        .fallback(not_found)
        .with_state(app_state)
}

async fn not_found() -> ApiError {
    ApiError(Error::NotFound("Route not found".to_owned()))
}
