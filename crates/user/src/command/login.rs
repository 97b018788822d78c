use mealplanner_db::table;
use mealplanner_shared::Error;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::prelude::FromRow;

use crate::{Status, User, password::verify_password, query::UserRow};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(FromRow)]
struct LoginRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

impl super::Command {
    pub async fn login(&self, input: LoginInput) -> mealplanner_shared::Result<User> {
        let statement = Query::select()
            .columns([
                table::User::Id,
                table::User::Email,
                table::User::Name,
                table::User::Role,
                table::User::Status,
                table::User::CreatedAt,
                table::User::UpdatedAt,
                table::User::PasswordHash,
            ])
            .from(table::User::Table)
            .and_where(Expr::col(table::User::Email).eq(input.email.trim().to_lowercase()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let Some(row) = sqlx::query_as_with::<_, LoginRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
        else {
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        };

        if !verify_password(&input.password, &row.password_hash)? {
            tracing::warn!(user_id = %row.user.id, "login with invalid password");

            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        }

        if row.user.status.0 == Status::Suspended {
            return Err(Error::Forbidden);
        }

        Ok(row.user.into())
    }
}
