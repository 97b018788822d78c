use mealplanner_db::table;
use mealplanner_shared::{Error, new_id, timestamp};
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use crate::{Role, Status, password::hash_password};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

impl super::Command {
    pub async fn register(&self, input: RegisterInput) -> mealplanner_shared::Result<String> {
        self.register_with_role(input, Role::User).await
    }

    /// Create an account with the given role and its empty profile in one transaction
    pub async fn register_with_role(
        &self,
        mut input: RegisterInput,
        role: Role,
    ) -> mealplanner_shared::Result<String> {
        input.email = input.email.trim().to_lowercase();
        input.name = input.name.trim().to_owned();
        input.validate()?;

        if crate::find_by_email(&self.0, &input.email).await?.is_some() {
            return Err(Error::Conflict("Email already registered".to_owned()));
        }

        let id = new_id();
        let now = timestamp();
        let password_hash = hash_password(&input.password)?;

        let (user_sql, user_values) = Query::insert()
            .into_table(table::User::Table)
            .columns([
                table::User::Id,
                table::User::Email,
                table::User::PasswordHash,
                table::User::Name,
                table::User::Role,
                table::User::Status,
                table::User::CreatedAt,
                table::User::UpdatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                input.email.to_owned().into(),
                password_hash.into(),
                input.name.into(),
                role.to_string().into(),
                Status::Active.to_string().into(),
                now.into(),
                now.into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        let (profile_sql, profile_values) = Query::insert()
            .into_table(table::UserProfile::Table)
            .columns([
                table::UserProfile::UserId,
                table::UserProfile::CookingSkill,
                table::UserProfile::UpdatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                crate::CookingSkill::default().to_string().into(),
                now.into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        let mut tx = self.0.begin().await?;

        if let Err(err) = sqlx::query_with(&user_sql, user_values)
            .execute(&mut *tx)
            .await
        {
            if mealplanner_shared::is_unique_violation(&err) {
                return Err(Error::Conflict("Email already registered".to_owned()));
            }

            return Err(err.into());
        }

        sqlx::query_with(&profile_sql, profile_values)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(user_id = %id, email = %input.email, "user registered");

        Ok(id)
    }
}
