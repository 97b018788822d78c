use std::{path::PathBuf, str::FromStr};

use chrono::NaiveDate;
use mealplanner_grocery::Command;
use mealplanner_mealplan::{MealPlanInput, MealPlanItemInput};
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

pub fn line(name: &str, quantity: f64, unit: &str) -> IngredientLine {
    IngredientLine {
        name: name.to_owned(),
        quantity,
        unit: unit.to_owned(),
    }
}

/// A recipe for two: 150 g rice and 1 onion
pub async fn create_recipe(cmd: &Command, user_id: &str) -> anyhow::Result<String> {
    let id = mealplanner_recipe::Command(cmd.0.clone())
        .create(
            user_id,
            RecipeInput {
                title: "Fried rice".to_owned(),
                servings: 2,
                ingredients: vec![line("Rice", 150.0, "g"), line("onion", 1.0, "piece")],
                ..Default::default()
            },
        )
        .await?;

    Ok(id)
}

pub async fn create_meal_plan(
    cmd: &Command,
    user_id: &str,
    items: Vec<MealPlanItemInput>,
) -> anyhow::Result<String> {
    let id = mealplanner_mealplan::Command(cmd.0.clone())
        .create(
            user_id,
            MealPlanInput {
                name: "Week 1".to_owned(),
                start_date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
                notes: None,
                items,
            },
        )
        .await?;

    Ok(id)
}
