use std::{path::PathBuf, str::FromStr};

use chrono::NaiveDate;
use mealplanner_mealplan::Command;
use mealplanner_recipe::RecipeInput;
use mealplanner_shared::IngredientLine;
use mealplanner_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<Command> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    mealplanner_db::migrate(&pool).await?;

    Ok(Command(pool))
}

pub async fn create_user(cmd: &Command, name: impl Into<String>) -> anyhow::Result<String> {
    let name = name.into();
    let id = mealplanner_user::Command(cmd.0.clone())
        .register(RegisterInput {
            name: name.to_owned(),
            email: format!("{name}@mealplanner.localhost"),
            password: "my_password".to_owned(),
        })
        .await?;

    Ok(id)
}

pub async fn create_recipe(
    cmd: &Command,
    user_id: &str,
    title: &str,
    is_public: bool,
) -> anyhow::Result<String> {
    let id = mealplanner_recipe::Command(cmd.0.clone())
        .create(
            user_id,
            RecipeInput {
                title: title.to_owned(),
                servings: 2,
                ingredients: vec![IngredientLine {
                    name: "rice".to_owned(),
                    quantity: 150.0,
                    unit: "g".to_owned(),
                }],
                is_public,
                ..Default::default()
            },
        )
        .await?;

    Ok(id)
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}
