use sea_query::{Alias, Expr, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, sqlite::SqliteRow};
use sqlx_migrator::{Info, Migrate, Migrator, Plan};

mod m0001;
pub mod table;

/// Implements a `sqlx_migrator` operation from a pair of sea-query statements
macro_rules! sqlite_operation {
    ($name:ident, $up:expr, $down:expr) => {
        pub struct $name;

        #[async_trait::async_trait]
        impl sqlx_migrator::Operation<sqlx::Sqlite> for $name {
            async fn up(
                &self,
                connection: &mut sqlx::SqliteConnection,
            ) -> Result<(), sqlx_migrator::Error> {
                let statement = $up.to_string(sea_query::SqliteQueryBuilder);
                sqlx::query(&statement).execute(connection).await?;

                Ok(())
            }

            async fn down(
                &self,
                connection: &mut sqlx::SqliteConnection,
            ) -> Result<(), sqlx_migrator::Error> {
                let statement = $down.to_string(sea_query::SqliteQueryBuilder);
                sqlx::query(&statement).execute(connection).await?;

                Ok(())
            }
        }
    };
}

pub(crate) use sqlite_operation;

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(sqlx_migrator::vec_box![m0001::Migration])?;

    Ok(migrator)
}

/// Apply every pending migration
pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    let mut conn = pool.acquire().await?;
    migrator()?.run(&mut *conn, &Plan::apply_all()).await?;

    Ok(())
}

/// Count every row matched by `statement`, then fetch the `limit` rows starting at `offset`
pub async fn fetch_page<T>(
    pool: &SqlitePool,
    mut statement: SelectStatement,
    offset: u64,
    limit: u64,
) -> Result<(Vec<T>, i64), sqlx::Error>
where
    T: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
{
    let (sql, values) = Query::select()
        .expr(Expr::cust("COUNT(*)"))
        .from_subquery(statement.clone(), Alias::new("matched"))
        .build_sqlx(SqliteQueryBuilder);

    let total = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(pool)
        .await?;

    let (sql, values) = statement
        .limit(limit)
        .offset(offset)
        .build_sqlx(SqliteQueryBuilder);

    let rows = sqlx::query_as_with::<_, T, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok((rows, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_migrate_is_idempotent() -> anyhow::Result<()> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        migrate(&pool).await?;
        migrate(&pool).await?;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' ORDER BY name",
        )
        .fetch_all(&pool)
        .await?;
        let tables: Vec<String> = tables.into_iter().map(|(name,)| name).collect();

        for expected in [
            "food_category",
            "grocery_list",
            "ingredient",
            "meal_plan",
            "meal_plan_item",
            "recipe",
            "recipe_favorite",
            "suggestion",
            "suggestion_like",
            "suggestion_save",
            "suggestion_view",
            "user",
            "user_profile",
        ] {
            assert!(tables.contains(&expected.to_owned()), "missing {expected}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_page_counts_before_limit() -> anyhow::Result<()> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        migrate(&pool).await?;

        for name in ["Dairy", "Produce", "Meat", "Bakery", "Frozen"] {
            sqlx::query("INSERT INTO food_category (id, name, created_at) VALUES (?, ?, 0)")
                .bind(name.to_lowercase())
                .bind(name)
                .execute(&pool)
                .await?;
        }

        let statement = Query::select()
            .column(table::FoodCategory::Name)
            .from(table::FoodCategory::Table)
            .order_by(table::FoodCategory::Name, sea_query::Order::Asc)
            .to_owned();

        let (rows, total) = fetch_page::<(String,)>(&pool, statement, 2, 2).await?;
        assert_eq!(total, 5);
        assert_eq!(
            rows,
            vec![("Frozen".to_owned(),), ("Meat".to_owned(),)]
        );

        Ok(())
    }
}
