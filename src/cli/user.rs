use clap::ValueEnum;
use mealplanner_user::Status;

use mealplanner::config::Config;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Role {
    User,
    Admin,
    Suspend,
}

pub async fn set_role(config: Config, email: String, role: Role) -> anyhow::Result<()> {
    let pool = mealplanner::db::create_pool(&config.database.url, 1).await?;
    mealplanner_db::migrate(&pool).await?;
    let command = mealplanner_user::Command(pool.clone());

    let Some(user) = mealplanner_user::find_by_email(&pool, &email).await? else {
        tracing::error!("user {email} not found");
        return Ok(());
    };

    match role {
        Role::User => {
            command
                .set_role(&user.id, mealplanner_user::Role::User)
                .await?;
            command.set_status(&user.id, Status::Active).await?;
        }
        Role::Admin => {
            command
                .set_role(&user.id, mealplanner_user::Role::Admin)
                .await?;
            command.set_status(&user.id, Status::Active).await?;
        }
        Role::Suspend => command.set_status(&user.id, Status::Suspended).await?,
    }

    tracing::info!("{email} updated");
    pool.close().await;

    Ok(())
}
