use std::{path::PathBuf, str::FromStr};

use mealplanner_recipe::{Command, RecipeInput};
use mealplanner_shared::{IngredientLine, MealType};
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

#[allow(dead_code)]
pub fn recipe_input(title: impl Into<String>, is_public: bool) -> RecipeInput {
    RecipeInput {
        title: title.into(),
        description: "Weeknight favorite".to_owned(),
        cuisine: Some("Italian".to_owned()),
        meal_type: MealType::Dinner,
        prep_time: 10,
        cook_time: 20,
        servings: 2,
        ingredients: vec![
            IngredientLine {
                name: "spaghetti".to_owned(),
                quantity: 200.0,
                unit: "g".to_owned(),
            },
            IngredientLine {
                name: "garlic".to_owned(),
                quantity: 2.0,
                unit: "clove".to_owned(),
            },
        ],
        instructions: vec!["Boil pasta".to_owned(), "Fry garlic".to_owned()],
        dietary_tags: vec!["Vegetarian".to_owned()],
        is_public,
        ..Default::default()
    }
}
