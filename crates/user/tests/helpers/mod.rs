use std::{path::PathBuf, str::FromStr};

use mealplanner_user::{Command, RegisterInput};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<Command> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    mealplanner_db::migrate(&pool).await?;

    Ok(Command(pool))
}

#[allow(dead_code)]
pub async fn create_user(cmd: &Command, name: impl Into<String>) -> anyhow::Result<String> {
    let name = name.into();
    let id = cmd
        .register(RegisterInput {
            name: name.to_owned(),
            email: format!("{name}@mealplanner.localhost"),
            password: "my_password".to_owned(),
        })
        .await?;

    Ok(id)
}
