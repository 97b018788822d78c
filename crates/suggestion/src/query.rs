use mealplanner_db::table;
use mealplanner_shared::{Actor, IngredientLine, MealType, Page, PageArgs, Result};
use sea_query::{
    Alias, Cond, Expr, ExprTrait, JoinType, Query, SelectStatement, SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{
    SqlitePool,
    prelude::FromRow,
    types::{Json, Text},
};

use crate::Status;

#[derive(Debug, FromRow)]
struct SuggestionRow {
    pub id: String,
    pub author_id: Option<String>,
    pub author_name: Option<String>,
    pub title: String,
    pub description: String,
    pub meal_type: Text<MealType>,
    pub cuisine: Option<String>,
    pub ingredients: Json<Vec<IngredientLine>>,
    pub instructions: Json<Vec<String>>,
    pub dietary_tags: Json<Vec<String>>,
    pub status: Text<Status>,
    pub review_note: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<i64>,
    pub like_count: i64,
    pub save_count: i64,
    pub view_count: i64,
    pub liked: bool,
    pub saved: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub id: String,
    pub author_id: Option<String>,
    pub author_name: Option<String>,
    pub title: String,
    pub description: String,
    pub meal_type: MealType,
    pub cuisine: Option<String>,
    pub ingredients: Vec<IngredientLine>,
    pub instructions: Vec<String>,
    pub dietary_tags: Vec<String>,
    pub status: Status,
    pub review_note: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<i64>,
    pub like_count: i64,
    pub save_count: i64,
    pub view_count: i64,
    pub liked: bool,
    pub saved: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<SuggestionRow> for Suggestion {
    fn from(row: SuggestionRow) -> Self {
        Self {
            id: row.id,
            author_id: row.author_id,
            author_name: row.author_name,
            title: row.title,
            description: row.description,
            meal_type: row.meal_type.0,
            cuisine: row.cuisine,
            ingredients: row.ingredients.0,
            instructions: row.instructions.0,
            dietary_tags: row.dietary_tags.0,
            status: row.status.0,
            review_note: row.review_note,
            reviewed_by: row.reviewed_by,
            reviewed_at: row.reviewed_at,
            like_count: row.like_count,
            save_count: row.save_count,
            view_count: row.view_count,
            liked: row.liked,
            saved: row.saved,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn count_of(interaction: &str) -> Expr {
    Expr::cust(format!(
        "(SELECT COUNT(*) FROM {interaction} WHERE {interaction}.suggestion_id = suggestion.id)"
    ))
}

fn exists_for(interaction: &str, user_id: &str) -> Expr {
    Expr::cust_with_values(
        format!(
            "EXISTS (SELECT 1 FROM {interaction} WHERE {interaction}.suggestion_id = suggestion.id AND {interaction}.user_id = ?)"
        ),
        [user_id.to_owned()],
    )
}

fn select_suggestion(viewer: &Actor) -> SelectStatement {
    Query::select()
        .columns([
            (table::Suggestion::Table, table::Suggestion::Id),
            (table::Suggestion::Table, table::Suggestion::AuthorId),
            (table::Suggestion::Table, table::Suggestion::Title),
            (table::Suggestion::Table, table::Suggestion::Description),
            (table::Suggestion::Table, table::Suggestion::MealType),
            (table::Suggestion::Table, table::Suggestion::Cuisine),
            (table::Suggestion::Table, table::Suggestion::Ingredients),
            (table::Suggestion::Table, table::Suggestion::Instructions),
            (table::Suggestion::Table, table::Suggestion::DietaryTags),
            (table::Suggestion::Table, table::Suggestion::Status),
            (table::Suggestion::Table, table::Suggestion::ReviewNote),
            (table::Suggestion::Table, table::Suggestion::ReviewedBy),
            (table::Suggestion::Table, table::Suggestion::ReviewedAt),
            (table::Suggestion::Table, table::Suggestion::CreatedAt),
            (table::Suggestion::Table, table::Suggestion::UpdatedAt),
        ])
        .expr_as(
            Expr::col((table::User::Table, table::User::Name)),
            Alias::new("author_name"),
        )
        .expr_as(count_of("suggestion_like"), Alias::new("like_count"))
        .expr_as(count_of("suggestion_save"), Alias::new("save_count"))
        .expr_as(count_of("suggestion_view"), Alias::new("view_count"))
        .expr_as(
            exists_for("suggestion_like", &viewer.user_id),
            Alias::new("liked"),
        )
        .expr_as(
            exists_for("suggestion_save", &viewer.user_id),
            Alias::new("saved"),
        )
        .from(table::Suggestion::Table)
        .join(
            JoinType::LeftJoin,
            table::User::Table,
            Expr::col((table::Suggestion::Table, table::Suggestion::AuthorId))
                .equals((table::User::Table, table::User::Id)),
        )
        .to_owned()
}

/// Approved suggestions and the viewer's own, or everything for admins
fn visible_to(viewer: &Actor) -> Option<Cond> {
    if viewer.is_admin {
        return None;
    }

    Some(
        Cond::any()
            .add(
                Expr::col((table::Suggestion::Table, table::Suggestion::Status))
                    .eq(Status::Approved.to_string()),
            )
            .add(
                Expr::col((table::Suggestion::Table, table::Suggestion::AuthorId))
                    .eq(viewer.user_id.to_owned()),
            ),
    )
}

pub async fn find(
    pool: &SqlitePool,
    viewer: &Actor,
    id: impl Into<String>,
) -> Result<Option<Suggestion>> {
    let mut statement = select_suggestion(viewer)
        .and_where(Expr::col((table::Suggestion::Table, table::Suggestion::Id)).eq(id.into()))
        .limit(1)
        .to_owned();

    if let Some(cond) = visible_to(viewer) {
        statement.cond_where(cond);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, SuggestionRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .map(Into::into))
}

#[derive(Debug)]
pub struct SuggestionsQuery {
    pub viewer: Actor,
    pub status: Option<Status>,
    pub author: Option<String>,
    pub saved_by: Option<String>,
    pub meal_type: Option<MealType>,
    pub search: Option<String>,
    pub page: PageArgs,
}

impl SuggestionsQuery {
    pub fn new(viewer: Actor) -> Self {
        Self {
            viewer,
            status: None,
            author: None,
            saved_by: None,
            meal_type: None,
            search: None,
            page: PageArgs::default(),
        }
    }
}

pub async fn filter(pool: &SqlitePool, input: SuggestionsQuery) -> Result<Page<Suggestion>> {
    let mut statement = select_suggestion(&input.viewer);

    if let Some(cond) = visible_to(&input.viewer) {
        statement.cond_where(cond);
    }

    if let Some(status) = input.status {
        statement.and_where(
            Expr::col((table::Suggestion::Table, table::Suggestion::Status))
                .eq(status.to_string()),
        );
    }

    if let Some(author) = input.author {
        statement.and_where(
            Expr::col((table::Suggestion::Table, table::Suggestion::AuthorId)).eq(author),
        );
    }

    if let Some(saved_by) = input.saved_by {
        statement.and_where(Expr::cust_with_values(
            "EXISTS (SELECT 1 FROM suggestion_save WHERE suggestion_save.suggestion_id = suggestion.id AND suggestion_save.user_id = ?)",
            [saved_by],
        ));
    }

    if let Some(meal_type) = input.meal_type {
        statement.and_where(
            Expr::col((table::Suggestion::Table, table::Suggestion::MealType))
                .eq(meal_type.to_string()),
        );
    }

    if let Some(search) = input.search.filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        statement.cond_where(
            Cond::any()
                .add(
                    Expr::col((table::Suggestion::Table, table::Suggestion::Title)).like(&pattern),
                )
                .add(
                    Expr::col((table::Suggestion::Table, table::Suggestion::Description))
                        .like(&pattern),
                ),
        );
    }

    statement
        .order_by(
            (table::Suggestion::Table, table::Suggestion::CreatedAt),
            sea_query::Order::Desc,
        )
        .order_by(
            (table::Suggestion::Table, table::Suggestion::Id),
            sea_query::Order::Desc,
        );

    let (rows, total) = mealplanner_db::fetch_page::<SuggestionRow>(
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
