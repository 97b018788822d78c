use mealplanner_db::table;
use mealplanner_recipe::Source;
use mealplanner_shared::{Result, timestamp};
use mealplanner_suggestion::Status as SuggestionStatus;
use mealplanner_user::{Role, Status as UserStatus};
use sea_query::{Alias, Expr, ExprTrait, Func, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

const WEEK_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct UserStats {
    pub total: i64,
    pub active: i64,
    pub suspended: i64,
    pub admins: i64,
    pub new_last_7_days: i64,
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct RecipeStats {
    pub total: i64,
    pub public: i64,
    pub ai_generated: i64,
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct MealPlanStats {
    pub total: i64,
    pub average_items: f64,
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct SuggestionStats {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

#[derive(Debug, Serialize, PartialEq, FromRow)]
pub struct CuisineCount {
    pub cuisine: String,
    pub count: i64,
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct DashboardStats {
    pub users: UserStats,
    pub recipes: RecipeStats,
    pub meal_plans: MealPlanStats,
    pub suggestions: SuggestionStats,
    pub grocery_lists: i64,
    pub top_cuisines: Vec<CuisineCount>,
}

fn count(table: impl sea_query::IntoTableRef) -> SelectStatement {
    Query::select()
        .expr(Expr::cust("COUNT(*)"))
        .from(table)
        .to_owned()
}

async fn scalar(pool: &SqlitePool, statement: SelectStatement) -> Result<i64> {
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(pool)
        .await?)
}

async fn user_stats(pool: &SqlitePool) -> Result<UserStats> {
    let since = timestamp() - WEEK_SECS;

    let by_status = |status: UserStatus| {
        count(table::User::Table)
            .and_where(Expr::col(table::User::Status).eq(status.to_string()))
            .to_owned()
    };

    let (total, active, suspended, admins, new_last_7_days) = tokio::try_join!(
        scalar(pool, count(table::User::Table)),
        scalar(pool, by_status(UserStatus::Active)),
        scalar(pool, by_status(UserStatus::Suspended)),
        scalar(
            pool,
            count(table::User::Table)
                .and_where(Expr::col(table::User::Role).eq(Role::Admin.to_string()))
                .to_owned()
        ),
        scalar(
            pool,
            count(table::User::Table)
                .and_where(Expr::col(table::User::CreatedAt).gte(since))
                .to_owned()
        ),
    )?;

    Ok(UserStats {
        total,
        active,
        suspended,
        admins,
        new_last_7_days,
    })
}

async fn recipe_stats(pool: &SqlitePool) -> Result<RecipeStats> {
    let (total, public, ai_generated) = tokio::try_join!(
        scalar(pool, count(table::Recipe::Table)),
        scalar(
            pool,
            count(table::Recipe::Table)
                .and_where(Expr::col(table::Recipe::IsPublic).eq(true))
                .to_owned()
        ),
        scalar(
            pool,
            count(table::Recipe::Table)
                .and_where(Expr::col(table::Recipe::Source).eq(Source::Ai.to_string()))
                .to_owned()
        ),
    )?;

    Ok(RecipeStats {
        total,
        public,
        ai_generated,
    })
}

async fn meal_plan_stats(pool: &SqlitePool) -> Result<MealPlanStats> {
    let items_per_plan = Query::select()
        .expr_as(
            Expr::cust(
                "(SELECT COUNT(*) FROM meal_plan_item WHERE meal_plan_item.meal_plan_id = meal_plan.id)",
            ),
            Alias::new("items"),
        )
        .from(table::MealPlan::Table)
        .to_owned();

    let (sql, values) = Query::select()
        .expr(Expr::cust("COALESCE(AVG(items), 0.0)"))
        .from_subquery(items_per_plan, Alias::new("per_plan"))
        .build_sqlx(SqliteQueryBuilder);

    let average = async {
        Ok::<_, mealplanner_shared::Error>(
            sqlx::query_scalar_with::<_, f64, _>(&sql, values)
                .fetch_one(pool)
                .await?,
        )
    };

    let (total, average_items) =
        tokio::try_join!(scalar(pool, count(table::MealPlan::Table)), average)?;

    Ok(MealPlanStats {
        total,
        average_items,
    })
}

async fn suggestion_stats(pool: &SqlitePool) -> Result<SuggestionStats> {
    let by_status = |status: SuggestionStatus| {
        count(table::Suggestion::Table)
            .and_where(Expr::col(table::Suggestion::Status).eq(status.to_string()))
            .to_owned()
    };

    let (pending, approved, rejected) = tokio::try_join!(
        scalar(pool, by_status(SuggestionStatus::Pending)),
        scalar(pool, by_status(SuggestionStatus::Approved)),
        scalar(pool, by_status(SuggestionStatus::Rejected)),
    )?;

    Ok(SuggestionStats {
        pending,
        approved,
        rejected,
    })
}

async fn top_cuisines(pool: &SqlitePool) -> Result<Vec<CuisineCount>> {
    let (sql, values) = Query::select()
        .expr_as(
            Func::lower(Expr::col(table::Recipe::Cuisine)),
            Alias::new("cuisine"),
        )
        .expr_as(Expr::cust("COUNT(*)"), Alias::new("count"))
        .from(table::Recipe::Table)
        .and_where(Expr::col(table::Recipe::Cuisine).is_not_null())
        .and_where(Expr::col(table::Recipe::Cuisine).ne(""))
        .group_by_col(Alias::new("cuisine"))
        .order_by(Alias::new("count"), Order::Desc)
        .order_by(Alias::new("cuisine"), Order::Asc)
        .limit(5)
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, CuisineCount, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

/// Platform-wide counters for the admin dashboard
pub async fn dashboard_stats(pool: &SqlitePool) -> Result<DashboardStats> {
    let (users, recipes, meal_plans, suggestions, grocery_lists, top_cuisines) = tokio::try_join!(
        user_stats(pool),
        recipe_stats(pool),
        meal_plan_stats(pool),
        suggestion_stats(pool),
        scalar(pool, count(table::GroceryList::Table)),
        top_cuisines(pool),
    )?;

    Ok(DashboardStats {
        users,
        recipes,
        meal_plans,
        suggestions,
        grocery_lists,
        top_cuisines,
    })
}
