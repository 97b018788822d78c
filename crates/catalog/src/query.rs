use mealplanner_db::table;
use mealplanner_shared::{Page, PageArgs, Result};
use sea_query::{
    Alias, Expr, ExprTrait, Func, JoinType, Query, SelectStatement, SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FoodCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub default_unit: Option<String>,
    pub calories_per_unit: Option<f64>,
    pub created_at: i64,
}

fn select_category() -> SelectStatement {
    Query::select()
        .columns([
            table::FoodCategory::Id,
            table::FoodCategory::Name,
            table::FoodCategory::Description,
            table::FoodCategory::CreatedAt,
        ])
        .from(table::FoodCategory::Table)
        .to_owned()
}

pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<FoodCategory>> {
    let statement = select_category()
        .order_by(table::FoodCategory::Name, sea_query::Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, FoodCategory, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

pub async fn find_category(
    pool: &SqlitePool,
    id: impl Into<String>,
) -> Result<Option<FoodCategory>> {
    let statement = select_category()
        .and_where(Expr::col(table::FoodCategory::Id).eq(id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, FoodCategory, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

fn select_ingredient() -> SelectStatement {
    Query::select()
        .columns([
            (table::Ingredient::Table, table::Ingredient::Id),
            (table::Ingredient::Table, table::Ingredient::Name),
            (table::Ingredient::Table, table::Ingredient::CategoryId),
            (table::Ingredient::Table, table::Ingredient::DefaultUnit),
            (table::Ingredient::Table, table::Ingredient::CaloriesPerUnit),
            (table::Ingredient::Table, table::Ingredient::CreatedAt),
        ])
        .expr_as(
            Expr::col((table::FoodCategory::Table, table::FoodCategory::Name)),
            Alias::new("category_name"),
        )
        .from(table::Ingredient::Table)
        .join(
            JoinType::LeftJoin,
            table::FoodCategory::Table,
            Expr::col((table::FoodCategory::Table, table::FoodCategory::Id))
                .equals((table::Ingredient::Table, table::Ingredient::CategoryId)),
        )
        .to_owned()
}

pub async fn find_ingredient(
    pool: &SqlitePool,
    id: impl Into<String>,
) -> Result<Option<Ingredient>> {
    let statement = select_ingredient()
        .and_where(Expr::col((table::Ingredient::Table, table::Ingredient::Id)).eq(id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, Ingredient, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

/// Case-insensitive lookup used to categorise grocery lines
pub async fn find_ingredient_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<Ingredient>> {
    let statement = select_ingredient()
        .and_where(
            Func::lower(Expr::col((table::Ingredient::Table, table::Ingredient::Name)))
                .eq(name.trim().to_lowercase()),
        )
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, Ingredient, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

#[derive(Debug, Default)]
pub struct IngredientsQuery {
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub page: PageArgs,
}

pub async fn filter_ingredients(
    pool: &SqlitePool,
    input: IngredientsQuery,
) -> Result<Page<Ingredient>> {
    let mut statement = select_ingredient();

    if let Some(search) = input.search.filter(|s| !s.trim().is_empty()) {
        statement.and_where(
            Expr::col((table::Ingredient::Table, table::Ingredient::Name))
                .like(format!("%{}%", search.trim())),
        );
    }

    if let Some(category_id) = input.category_id {
        statement.and_where(
            Expr::col((table::Ingredient::Table, table::Ingredient::CategoryId)).eq(category_id),
        );
    }

    statement.order_by(
        (table::Ingredient::Table, table::Ingredient::Name),
        sea_query::Order::Asc,
    );

    let (items, total) = mealplanner_db::fetch_page::<Ingredient>(
        pool,
        statement,
        input.page.offset(),
        input.page.limit(),
    )
    .await?;

    Ok(Page::new(items, input.page, total))
}
