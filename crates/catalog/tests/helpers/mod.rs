use std::{path::PathBuf, str::FromStr};

use mealplanner_catalog::Command;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<Command> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    mealplanner_db::migrate(&pool).await?;

    Ok(Command(pool))
}
