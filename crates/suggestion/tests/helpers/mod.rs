use std::{path::PathBuf, str::FromStr};

use mealplanner_shared::{IngredientLine, MealType};
use mealplanner_suggestion::{Command, SuggestionInput};
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

pub fn suggestion_input(title: impl Into<String>) -> SuggestionInput {
    SuggestionInput {
        title: title.into(),
        description: "Grandma's recipe".to_owned(),
        meal_type: MealType::Lunch,
        cuisine: Some("Greek".to_owned()),
        ingredients: vec![IngredientLine {
            name: "feta".to_owned(),
            quantity: 100.0,
            unit: "g".to_owned(),
        }],
        instructions: vec!["Crumble the feta".to_owned()],
        dietary_tags: vec!["Vegetarian".to_owned()],
    }
}
