use mealplanner_db::table;
use mealplanner_shared::{Error, timestamp};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use crate::password::{hash_password, verify_password};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordInput {
    pub current_password: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

impl super::Command {
    pub async fn change_password(
        &self,
        user_id: impl Into<String>,
        input: ChangePasswordInput,
    ) -> mealplanner_shared::Result<()> {
        input.validate()?;

        let user_id = user_id.into();
        let (sql, values) = Query::select()
            .column(table::User::PasswordHash)
            .from(table::User::Table)
            .and_where(Expr::col(table::User::Id).eq(&user_id))
            .build_sqlx(SqliteQueryBuilder);

        let Some(hash) = sqlx::query_scalar_with::<_, String, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
        else {
            return Err(Error::not_found("User"));
        };

        if !verify_password(&input.current_password, &hash)? {
            return Err(Error::BadRequest(
                "Current password is incorrect".to_owned(),
            ));
        }

        let (sql, values) = Query::update()
            .table(table::User::Table)
            .values([
                (
                    table::User::PasswordHash,
                    hash_password(&input.new_password)?.into(),
                ),
                (table::User::UpdatedAt, timestamp().into()),
            ])
            .and_where(Expr::col(table::User::Id).eq(&user_id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.0).await?;

        tracing::info!(user_id = %user_id, "password changed");

        Ok(())
    }
}
