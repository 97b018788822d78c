use mealplanner_db::table;
use mealplanner_shared::{Page, PageArgs, Result};
use sea_query::{Cond, Expr, ExprTrait, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{
    SqlitePool,
    prelude::FromRow,
    types::{Json, Text},
};

use crate::{CookingSkill, Role, Status};

#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Text<Role>,
    pub status: Text<Status>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub status: Status,
    pub created_at: i64,
    pub updated_at: i64,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            role: row.role.0,
            status: row.status.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    pub user_id: String,
    pub dietary_preferences: Json<Vec<String>>,
    pub allergies: Json<Vec<String>>,
    pub cuisine_preferences: Json<Vec<String>>,
    pub household_size: i64,
    pub cooking_skill: Text<CookingSkill>,
    pub daily_calorie_target: Option<i64>,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub user_id: String,
    pub dietary_preferences: Vec<String>,
    pub allergies: Vec<String>,
    pub cuisine_preferences: Vec<String>,
    pub household_size: i64,
    pub cooking_skill: CookingSkill,
    pub daily_calorie_target: Option<i64>,
    pub updated_at: i64,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            user_id: row.user_id,
            dietary_preferences: row.dietary_preferences.0,
            allergies: row.allergies.0,
            cuisine_preferences: row.cuisine_preferences.0,
            household_size: row.household_size,
            cooking_skill: row.cooking_skill.0,
            daily_calorie_target: row.daily_calorie_target,
            updated_at: row.updated_at,
        }
    }
}

fn select_user() -> SelectStatement {
    Query::select()
        .columns([
            table::User::Id,
            table::User::Email,
            table::User::Name,
            table::User::Role,
            table::User::Status,
            table::User::CreatedAt,
            table::User::UpdatedAt,
        ])
        .from(table::User::Table)
        .to_owned()
}

pub async fn find(pool: &SqlitePool, id: impl Into<String>) -> Result<Option<User>> {
    let statement = select_user()
        .and_where(Expr::col(table::User::Id).eq(id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .map(Into::into))
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let statement = select_user()
        .and_where(Expr::col(table::User::Email).eq(email.trim().to_lowercase()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .map(Into::into))
}

pub async fn profile(pool: &SqlitePool, user_id: impl Into<String>) -> Result<Option<Profile>> {
    let statement = Query::select()
        .columns([
            table::UserProfile::UserId,
            table::UserProfile::DietaryPreferences,
            table::UserProfile::Allergies,
            table::UserProfile::CuisinePreferences,
            table::UserProfile::HouseholdSize,
            table::UserProfile::CookingSkill,
            table::UserProfile::DailyCalorieTarget,
            table::UserProfile::UpdatedAt,
        ])
        .from(table::UserProfile::Table)
        .and_where(Expr::col(table::UserProfile::UserId).eq(user_id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, ProfileRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .map(Into::into))
}

#[derive(Debug, Default)]
pub struct UsersQuery {
    pub search: Option<String>,
    pub role: Option<Role>,
    pub status: Option<Status>,
    pub page: PageArgs,
}

pub async fn filter(pool: &SqlitePool, input: UsersQuery) -> Result<Page<User>> {
    let mut statement = select_user();

    if let Some(search) = input.search.filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        statement.cond_where(
            Cond::any()
                .add(Expr::col(table::User::Name).like(&pattern))
                .add(Expr::col(table::User::Email).like(&pattern)),
        );
    }

    if let Some(role) = input.role {
        statement.and_where(Expr::col(table::User::Role).eq(role.to_string()));
    }

    if let Some(status) = input.status {
        statement.and_where(Expr::col(table::User::Status).eq(status.to_string()));
    }

    statement
        .order_by(table::User::CreatedAt, sea_query::Order::Desc)
        .order_by(table::User::Id, sea_query::Order::Desc);

    let (rows, total) = mealplanner_db::fetch_page::<UserRow>(
        pool,
        statement,
        input.page.offset(),
        input.page.limit(),
    )
    .await?;

    Ok(Page::new(
        rows.into_iter().map(Into::into).collect(),
        input.page,
        total,
    ))
}
