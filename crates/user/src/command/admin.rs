use mealplanner_db::table;
use mealplanner_shared::{Actor, Error, timestamp};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use crate::{Role, Status};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AdminUpdateInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub role: Option<Role>,
    pub status: Option<Status>,
}

impl super::Command {
    pub async fn set_role(
        &self,
        user_id: impl Into<String>,
        role: Role,
    ) -> mealplanner_shared::Result<()> {
        self.update_column(user_id.into(), table::User::Role, role.to_string())
            .await
    }

    pub async fn set_status(
        &self,
        user_id: impl Into<String>,
        status: Status,
    ) -> mealplanner_shared::Result<()> {
        self.update_column(user_id.into(), table::User::Status, status.to_string())
            .await
    }

    /// Admin edit of another account; admins cannot demote or suspend themselves.
    /// All provided columns change in a single statement.
    pub async fn update_by_admin(
        &self,
        actor: &Actor,
        user_id: impl Into<String>,
        input: AdminUpdateInput,
    ) -> mealplanner_shared::Result<()> {
        let input = AdminUpdateInput {
            name: input.name.map(|name| name.trim().to_owned()),
            ..input
        };
        input.validate()?;

        let user_id = user_id.into();
        if !actor.is_admin {
            return Err(Error::Forbidden);
        }

        if actor.user_id == user_id
            && (input.role == Some(Role::User) || input.status == Some(Status::Suspended))
        {
            return Err(Error::BadRequest(
                "You cannot demote or suspend your own account".to_owned(),
            ));
        }

        let mut statement = Query::update();
        statement
            .table(table::User::Table)
            .value(table::User::UpdatedAt, timestamp())
            .and_where(Expr::col(table::User::Id).eq(&user_id));

        if let Some(name) = input.name {
            statement.value(table::User::Name, name);
        }

        if let Some(role) = input.role {
            statement.value(table::User::Role, role.to_string());
        }

        if let Some(status) = input.status {
            statement.value(table::User::Status, status.to_string());
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("User"));
        }

        tracing::info!(admin_id = %actor.user_id, user_id = %user_id, "user updated by admin");

        Ok(())
    }

    /// Remove an account; owned rows are removed by foreign key cascades
    pub async fn delete(
        &self,
        actor: &Actor,
        user_id: impl Into<String>,
    ) -> mealplanner_shared::Result<()> {
        let user_id = user_id.into();
        if !actor.is_admin {
            return Err(Error::Forbidden);
        }

        if actor.user_id == user_id {
            return Err(Error::BadRequest(
                "You cannot delete your own account".to_owned(),
            ));
        }

        let (sql, values) = Query::delete()
            .from_table(table::User::Table)
            .and_where(Expr::col(table::User::Id).eq(&user_id))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("User"));
        }

        tracing::info!(admin_id = %actor.user_id, user_id = %user_id, "user deleted");

        Ok(())
    }

    async fn update_column(
        &self,
        user_id: String,
        col: table::User,
        value: String,
    ) -> mealplanner_shared::Result<()> {
        let (sql, values) = Query::update()
            .table(table::User::Table)
            .values([
                (col, value.into()),
                (table::User::UpdatedAt, timestamp().into()),
            ])
            .and_where(Expr::col(table::User::Id).eq(user_id))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("User"));
        }

        Ok(())
    }
}
