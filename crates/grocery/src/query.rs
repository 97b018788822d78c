use mealplanner_db::table;
use mealplanner_shared::{Page, PageArgs, Result};
use sea_query::{Expr, ExprTrait, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow, types::Json};

use crate::GroceryItem;

#[derive(Debug, FromRow)]
struct GroceryListRow {
    pub id: String,
    pub user_id: String,
    pub meal_plan_id: Option<String>,
    pub name: String,
    pub items: Json<Vec<GroceryItem>>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroceryList {
    pub id: String,
    pub user_id: String,
    pub meal_plan_id: Option<String>,
    pub name: String,
    pub items: Vec<GroceryItem>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl GroceryList {
    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }
}

impl From<GroceryListRow> for GroceryList {
    fn from(row: GroceryListRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            meal_plan_id: row.meal_plan_id,
            name: row.name,
            items: row.items.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn select_list() -> SelectStatement {
    Query::select()
        .columns([
            table::GroceryList::Id,
            table::GroceryList::UserId,
            table::GroceryList::MealPlanId,
            table::GroceryList::Name,
            table::GroceryList::Items,
            table::GroceryList::CreatedAt,
            table::GroceryList::UpdatedAt,
        ])
        .from(table::GroceryList::Table)
        .to_owned()
}

pub async fn list(
    pool: &SqlitePool,
    user_id: impl Into<String>,
    page: PageArgs,
) -> Result<Page<GroceryList>> {
    let statement = select_list()
        .and_where(Expr::col(table::GroceryList::UserId).eq(user_id.into()))
        .order_by(table::GroceryList::CreatedAt, sea_query::Order::Desc)
        .order_by(table::GroceryList::Id, sea_query::Order::Desc)
        .to_owned();

    let (rows, total) = mealplanner_db::fetch_page::<GroceryListRow>(
        pool,
        statement,
        page.offset(),
        page.limit(),
    )
    .await?;

    Ok(Page::new(
        rows.into_iter().map(Into::into).collect(),
        page,
        total,
    ))
}

pub async fn find(
    pool: &SqlitePool,
    user_id: impl Into<String>,
    id: impl Into<String>,
) -> Result<Option<GroceryList>> {
    let statement = select_list()
        .and_where(Expr::col(table::GroceryList::Id).eq(id.into()))
        .and_where(Expr::col(table::GroceryList::UserId).eq(user_id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, GroceryListRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .map(Into::into))
}
