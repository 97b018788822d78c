use mealplanner_db::table;
use mealplanner_shared::{Actor, Difficulty, IngredientLine, MealType, Page, PageArgs, Result};
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

use crate::Source;

#[derive(Debug, FromRow)]
struct RecipeRow {
    pub id: String,
    pub user_id: Option<String>,
    pub author_name: Option<String>,
    pub title: String,
    pub description: String,
    pub cuisine: Option<String>,
    pub meal_type: Text<MealType>,
    pub difficulty: Text<Difficulty>,
    pub prep_time: i64,
    pub cook_time: i64,
    pub servings: i64,
    pub calories: Option<i64>,
    pub ingredients: Json<Vec<IngredientLine>>,
    pub instructions: Json<Vec<String>>,
    pub dietary_tags: Json<Vec<String>>,
    pub is_public: bool,
    pub source: Text<Source>,
    pub is_favorite: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: String,
    pub user_id: Option<String>,
    pub author_name: Option<String>,
    pub title: String,
    pub description: String,
    pub cuisine: Option<String>,
    pub meal_type: MealType,
    pub difficulty: Difficulty,
    pub prep_time: i64,
    pub cook_time: i64,
    pub servings: i64,
    pub calories: Option<i64>,
    pub ingredients: Vec<IngredientLine>,
    pub instructions: Vec<String>,
    pub dietary_tags: Vec<String>,
    pub is_public: bool,
    pub source: Source,
    pub is_favorite: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Recipe {
    pub fn total_time(&self) -> i64 {
        self.prep_time + self.cook_time
    }
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            author_name: row.author_name,
            title: row.title,
            description: row.description,
            cuisine: row.cuisine,
            meal_type: row.meal_type.0,
            difficulty: row.difficulty.0,
            prep_time: row.prep_time,
            cook_time: row.cook_time,
            servings: row.servings,
            calories: row.calories,
            ingredients: row.ingredients.0,
            instructions: row.instructions.0,
            dietary_tags: row.dietary_tags.0,
            is_public: row.is_public,
            source: row.source.0,
            is_favorite: row.is_favorite,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn select_recipe(viewer: &Actor) -> SelectStatement {
    Query::select()
        .columns([
            (table::Recipe::Table, table::Recipe::Id),
            (table::Recipe::Table, table::Recipe::UserId),
            (table::Recipe::Table, table::Recipe::Title),
            (table::Recipe::Table, table::Recipe::Description),
            (table::Recipe::Table, table::Recipe::Cuisine),
            (table::Recipe::Table, table::Recipe::MealType),
            (table::Recipe::Table, table::Recipe::Difficulty),
            (table::Recipe::Table, table::Recipe::PrepTime),
            (table::Recipe::Table, table::Recipe::CookTime),
            (table::Recipe::Table, table::Recipe::Servings),
            (table::Recipe::Table, table::Recipe::Calories),
            (table::Recipe::Table, table::Recipe::Ingredients),
            (table::Recipe::Table, table::Recipe::Instructions),
            (table::Recipe::Table, table::Recipe::DietaryTags),
            (table::Recipe::Table, table::Recipe::IsPublic),
            (table::Recipe::Table, table::Recipe::Source),
            (table::Recipe::Table, table::Recipe::CreatedAt),
            (table::Recipe::Table, table::Recipe::UpdatedAt),
        ])
        .expr_as(
            Expr::col((table::User::Table, table::User::Name)),
            Alias::new("author_name"),
        )
        .expr_as(
            Expr::cust_with_values(
                "EXISTS (SELECT 1 FROM recipe_favorite WHERE recipe_favorite.recipe_id = recipe.id AND recipe_favorite.user_id = ?)",
                [viewer.user_id.to_owned()],
            ),
            Alias::new("is_favorite"),
        )
        .from(table::Recipe::Table)
        .join(
            JoinType::LeftJoin,
            table::User::Table,
            Expr::col((table::Recipe::Table, table::Recipe::UserId))
                .equals((table::User::Table, table::User::Id)),
        )
        .to_owned()
}

/// Public recipes, the viewer's own recipes, or everything for admins
fn visible_to(viewer: &Actor) -> Option<Cond> {
    if viewer.is_admin {
        return None;
    }

    Some(
        Cond::any()
            .add(Expr::col((table::Recipe::Table, table::Recipe::IsPublic)).eq(true))
            .add(
                Expr::col((table::Recipe::Table, table::Recipe::UserId))
                    .eq(viewer.user_id.to_owned()),
            ),
    )
}

pub async fn find(
    pool: &SqlitePool,
    viewer: &Actor,
    id: impl Into<String>,
) -> Result<Option<Recipe>> {
    let mut statement = select_recipe(viewer)
        .and_where(Expr::col((table::Recipe::Table, table::Recipe::Id)).eq(id.into()))
        .limit(1)
        .to_owned();

    if let Some(cond) = visible_to(viewer) {
        statement.cond_where(cond);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .map(Into::into))
}

#[derive(Debug)]
pub struct RecipesQuery {
    pub viewer: Actor,
    pub search: Option<String>,
    pub cuisine: Option<String>,
    pub meal_type: Option<MealType>,
    pub difficulty: Option<Difficulty>,
    pub dietary_tag: Option<String>,
    pub only_mine: bool,
    pub max_total_time: Option<u32>,
    pub page: PageArgs,
}

impl RecipesQuery {
    pub fn new(viewer: Actor) -> Self {
        Self {
            viewer,
            search: None,
            cuisine: None,
            meal_type: None,
            difficulty: None,
            dietary_tag: None,
            only_mine: false,
            max_total_time: None,
            page: PageArgs::default(),
        }
    }
}

pub async fn filter(pool: &SqlitePool, input: RecipesQuery) -> Result<Page<Recipe>> {
    let mut statement = select_recipe(&input.viewer);

    if let Some(cond) = visible_to(&input.viewer) {
        statement.cond_where(cond);
    }

    if input.only_mine {
        statement.and_where(
            Expr::col((table::Recipe::Table, table::Recipe::UserId))
                .eq(input.viewer.user_id.to_owned()),
        );
    }

    if let Some(search) = input.search.filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        statement.cond_where(
            Cond::any()
                .add(Expr::col((table::Recipe::Table, table::Recipe::Title)).like(&pattern))
                .add(Expr::col((table::Recipe::Table, table::Recipe::Description)).like(&pattern)),
        );
    }

    if let Some(cuisine) = input.cuisine.filter(|c| !c.trim().is_empty()) {
        statement.and_where(
            Expr::col((table::Recipe::Table, table::Recipe::Cuisine)).like(cuisine.trim()),
        );
    }

    if let Some(meal_type) = input.meal_type {
        statement.and_where(
            Expr::col((table::Recipe::Table, table::Recipe::MealType)).eq(meal_type.to_string()),
        );
    }

    if let Some(difficulty) = input.difficulty {
        statement.and_where(
            Expr::col((table::Recipe::Table, table::Recipe::Difficulty))
                .eq(difficulty.to_string()),
        );
    }

    if let Some(tag) = input.dietary_tag.filter(|t| !t.trim().is_empty()) {
        statement.and_where(Expr::cust_with_values(
            "EXISTS (SELECT 1 FROM json_each(recipe.dietary_tags) WHERE value = ?)",
            [tag.trim().to_lowercase()],
        ));
    }

    if let Some(max_total_time) = input.max_total_time {
        statement.and_where(Expr::cust_with_values(
            "recipe.prep_time + recipe.cook_time <= ?",
            [i64::from(max_total_time)],
        ));
    }

    statement
        .order_by(
            (table::Recipe::Table, table::Recipe::CreatedAt),
            sea_query::Order::Desc,
        )
        .order_by((table::Recipe::Table, table::Recipe::Id), sea_query::Order::Desc);

    let (rows, total) = mealplanner_db::fetch_page::<RecipeRow>(
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

/// Favorites of the viewer that are still visible, most recently added first
pub async fn favorites(
    pool: &SqlitePool,
    viewer: &Actor,
    page: PageArgs,
) -> Result<Page<Recipe>> {
    let mut statement = select_recipe(viewer)
        .join(
            JoinType::InnerJoin,
            table::RecipeFavorite::Table,
            Expr::col((table::RecipeFavorite::Table, table::RecipeFavorite::RecipeId))
                .equals((table::Recipe::Table, table::Recipe::Id)),
        )
        .and_where(
            Expr::col((table::RecipeFavorite::Table, table::RecipeFavorite::UserId))
                .eq(viewer.user_id.to_owned()),
        )
        .order_by(
            (table::RecipeFavorite::Table, table::RecipeFavorite::CreatedAt),
            sea_query::Order::Desc,
        )
        .to_owned();

    if let Some(cond) = visible_to(viewer) {
        statement.cond_where(cond);
    }

    let (rows, total) =
        mealplanner_db::fetch_page::<RecipeRow>(pool, statement, page.offset(), page.limit())
            .await?;

    Ok(Page::new(rows.into_iter().map(Into::into).collect(), page, total))
}
