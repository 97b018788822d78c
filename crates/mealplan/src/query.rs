use chrono::NaiveDate;
use mealplanner_db::table;
use mealplanner_shared::{DayOfWeek, IngredientLine, MealType, Page, PageArgs, Result};
use sea_query::{
    Alias, Expr, ExprTrait, JoinType, Query, SelectStatement, SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{
    SqlitePool,
    prelude::FromRow,
    types::{Json, Text},
};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MealPlanSummary {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
    pub is_ai_generated: bool,
    pub item_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, FromRow)]
struct MealPlanItemRow {
    pub id: String,
    pub day_of_week: Text<DayOfWeek>,
    pub meal_type: Text<MealType>,
    pub recipe_id: Option<String>,
    pub recipe_title: Option<String>,
    pub custom_meal_name: Option<String>,
    pub custom_ingredients: Json<Vec<IngredientLine>>,
    pub servings: i64,
    pub notes: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MealPlanItem {
    pub id: String,
    pub day_of_week: DayOfWeek,
    pub meal_type: MealType,
    pub recipe_id: Option<String>,
    pub recipe_title: Option<String>,
    pub custom_meal_name: Option<String>,
    pub custom_ingredients: Vec<IngredientLine>,
    pub servings: i64,
    pub notes: Option<String>,
    pub created_at: i64,
}

impl MealPlanItem {
    /// Recipe title or custom meal name
    pub fn display_name(&self) -> &str {
        self.recipe_title
            .as_deref()
            .or(self.custom_meal_name.as_deref())
            .unwrap_or_default()
    }
}

impl From<MealPlanItemRow> for MealPlanItem {
    fn from(row: MealPlanItemRow) -> Self {
        Self {
            id: row.id,
            day_of_week: row.day_of_week.0,
            meal_type: row.meal_type.0,
            recipe_id: row.recipe_id,
            recipe_title: row.recipe_title,
            custom_meal_name: row.custom_meal_name,
            custom_ingredients: row.custom_ingredients.0,
            servings: row.servings,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MealPlan {
    #[serde(flatten)]
    pub plan: MealPlanSummary,
    pub items: Vec<MealPlanItem>,
}

fn select_summary() -> SelectStatement {
    Query::select()
        .columns([
            table::MealPlan::Id,
            table::MealPlan::UserId,
            table::MealPlan::Name,
            table::MealPlan::StartDate,
            table::MealPlan::EndDate,
            table::MealPlan::Notes,
            table::MealPlan::IsAiGenerated,
            table::MealPlan::CreatedAt,
            table::MealPlan::UpdatedAt,
        ])
        .expr_as(
            Expr::cust(
                "(SELECT COUNT(*) FROM meal_plan_item WHERE meal_plan_item.meal_plan_id = meal_plan.id)",
            ),
            Alias::new("item_count"),
        )
        .from(table::MealPlan::Table)
        .to_owned()
}

pub async fn list(
    pool: &SqlitePool,
    user_id: impl Into<String>,
    page: PageArgs,
) -> Result<Page<MealPlanSummary>> {
    let statement = select_summary()
        .and_where(Expr::col(table::MealPlan::UserId).eq(user_id.into()))
        .order_by(table::MealPlan::StartDate, sea_query::Order::Desc)
        .order_by(table::MealPlan::Id, sea_query::Order::Desc)
        .to_owned();

    let (items, total) = mealplanner_db::fetch_page::<MealPlanSummary>(
        pool,
        statement,
        page.offset(),
        page.limit(),
    )
    .await?;

    Ok(Page::new(items, page, total))
}

/// A plan owned by `user_id` with its items ordered by day then meal
pub async fn find(
    pool: &SqlitePool,
    user_id: impl Into<String>,
    id: impl Into<String>,
) -> Result<Option<MealPlan>> {
    let id = id.into();
    let statement = select_summary()
        .and_where(Expr::col(table::MealPlan::Id).eq(&id))
        .and_where(Expr::col(table::MealPlan::UserId).eq(user_id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    let Some(plan) = sqlx::query_as_with::<_, MealPlanSummary, _>(&sql, values)
        .fetch_optional(pool)
        .await?
    else {
        return Ok(None);
    };

    let statement = Query::select()
        .columns([
            (table::MealPlanItem::Table, table::MealPlanItem::Id),
            (table::MealPlanItem::Table, table::MealPlanItem::DayOfWeek),
            (table::MealPlanItem::Table, table::MealPlanItem::MealType),
            (table::MealPlanItem::Table, table::MealPlanItem::RecipeId),
            (table::MealPlanItem::Table, table::MealPlanItem::CustomMealName),
            (
                table::MealPlanItem::Table,
                table::MealPlanItem::CustomIngredients,
            ),
            (table::MealPlanItem::Table, table::MealPlanItem::Servings),
            (table::MealPlanItem::Table, table::MealPlanItem::Notes),
            (table::MealPlanItem::Table, table::MealPlanItem::CreatedAt),
        ])
        .expr_as(
            Expr::col((table::Recipe::Table, table::Recipe::Title)),
            Alias::new("recipe_title"),
        )
        .from(table::MealPlanItem::Table)
        .join(
            JoinType::LeftJoin,
            table::Recipe::Table,
            Expr::col((table::Recipe::Table, table::Recipe::Id))
                .equals((table::MealPlanItem::Table, table::MealPlanItem::RecipeId)),
        )
        .and_where(
            Expr::col((table::MealPlanItem::Table, table::MealPlanItem::MealPlanId)).eq(&id),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    let mut items: Vec<MealPlanItem> = sqlx::query_as_with::<_, MealPlanItemRow, _>(&sql, values)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    items.sort_by_key(|item| {
        (
            item.day_of_week.index(),
            item.meal_type.index(),
            item.created_at,
        )
    });

    Ok(Some(MealPlan { plan, items }))
}
