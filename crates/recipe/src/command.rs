use mealplanner_db::table;
use mealplanner_shared::{Actor, Error, new_id, timestamp};
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteExecutor, SqlitePool};
use validator::Validate;

use crate::{RecipeInput, Source};

#[derive(Clone)]
pub struct Command(pub SqlitePool);

/// Validate and insert a recipe through any executor, a transaction included
pub async fn insert_recipe<'e>(
    executor: impl SqliteExecutor<'e>,
    user_id: Option<&str>,
    input: RecipeInput,
    source: Source,
) -> mealplanner_shared::Result<String> {
    let input = input.normalize();
    input.validate()?;

    let id = new_id();
    let now = timestamp();

    let (sql, values) = Query::insert()
        .into_table(table::Recipe::Table)
        .columns([
            table::Recipe::Id,
            table::Recipe::UserId,
            table::Recipe::Title,
            table::Recipe::Description,
            table::Recipe::Cuisine,
            table::Recipe::MealType,
            table::Recipe::Difficulty,
            table::Recipe::PrepTime,
            table::Recipe::CookTime,
            table::Recipe::Servings,
            table::Recipe::Calories,
            table::Recipe::Ingredients,
            table::Recipe::Instructions,
            table::Recipe::DietaryTags,
            table::Recipe::IsPublic,
            table::Recipe::Source,
            table::Recipe::CreatedAt,
            table::Recipe::UpdatedAt,
        ])
        .values_panic([
            id.to_owned().into(),
            user_id.map(ToOwned::to_owned).into(),
            input.title.into(),
            input.description.into(),
            input.cuisine.into(),
            input.meal_type.to_string().into(),
            input.difficulty.to_string().into(),
            input.prep_time.into(),
            input.cook_time.into(),
            input.servings.into(),
            input.calories.into(),
            serde_json::to_string(&input.ingredients)?.into(),
            serde_json::to_string(&input.instructions)?.into(),
            serde_json::to_string(&input.dietary_tags)?.into(),
            input.is_public.into(),
            source.to_string().into(),
            now.into(),
            now.into(),
        ])
        .build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(executor).await?;

    Ok(id)
}

impl Command {
    pub async fn create(
        &self,
        user_id: impl Into<String>,
        input: RecipeInput,
    ) -> mealplanner_shared::Result<String> {
        self.create_with_source(user_id, input, Source::Manual)
            .await
    }

    pub async fn create_with_source(
        &self,
        user_id: impl Into<String>,
        input: RecipeInput,
        source: Source,
    ) -> mealplanner_shared::Result<String> {
        let user_id = user_id.into();
        let id = insert_recipe(&self.0, Some(&user_id), input, source).await?;

        tracing::info!(user_id = %user_id, recipe_id = %id, source = %source, "recipe created");

        Ok(id)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: impl Into<String>,
        input: RecipeInput,
    ) -> mealplanner_shared::Result<()> {
        let input = input.normalize();
        input.validate()?;

        let id = id.into();
        self.check_modify(actor, &id).await?;

        let (sql, values) = Query::update()
            .table(table::Recipe::Table)
            .values([
                (table::Recipe::Title, input.title.into()),
                (table::Recipe::Description, input.description.into()),
                (table::Recipe::Cuisine, input.cuisine.into()),
                (table::Recipe::MealType, input.meal_type.to_string().into()),
                (
                    table::Recipe::Difficulty,
                    input.difficulty.to_string().into(),
                ),
                (table::Recipe::PrepTime, input.prep_time.into()),
                (table::Recipe::CookTime, input.cook_time.into()),
                (table::Recipe::Servings, input.servings.into()),
                (table::Recipe::Calories, input.calories.into()),
                (
                    table::Recipe::Ingredients,
                    serde_json::to_string(&input.ingredients)?.into(),
                ),
                (
                    table::Recipe::Instructions,
                    serde_json::to_string(&input.instructions)?.into(),
                ),
                (
                    table::Recipe::DietaryTags,
                    serde_json::to_string(&input.dietary_tags)?.into(),
                ),
                (table::Recipe::IsPublic, input.is_public.into()),
                (table::Recipe::UpdatedAt, timestamp().into()),
            ])
            .and_where(Expr::col(table::Recipe::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(())
    }

    pub async fn delete(
        &self,
        actor: &Actor,
        id: impl Into<String>,
    ) -> mealplanner_shared::Result<()> {
        let id = id.into();
        self.check_modify(actor, &id).await?;

        let (sql, values) = Query::delete()
            .from_table(table::Recipe::Table)
            .and_where(Expr::col(table::Recipe::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.0).await?;

        tracing::info!(user_id = %actor.user_id, recipe_id = %id, "recipe deleted");

        Ok(())
    }

    /// Add or remove a favorite, returns whether the recipe is now a favorite
    pub async fn toggle_favorite(
        &self,
        user_id: impl Into<String>,
        recipe_id: impl Into<String>,
    ) -> mealplanner_shared::Result<bool> {
        let user_id = user_id.into();
        let recipe_id = recipe_id.into();

        if crate::find(&self.0, &Actor::user(&user_id), &recipe_id)
            .await?
            .is_none()
        {
            return Err(Error::not_found("Recipe"));
        }

        let (sql, values) = Query::delete()
            .from_table(table::RecipeFavorite::Table)
            .and_where(Expr::col(table::RecipeFavorite::UserId).eq(&user_id))
            .and_where(Expr::col(table::RecipeFavorite::RecipeId).eq(&recipe_id))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() > 0 {
            return Ok(false);
        }

        let (sql, values) = Query::insert()
            .into_table(table::RecipeFavorite::Table)
            .columns([
                table::RecipeFavorite::UserId,
                table::RecipeFavorite::RecipeId,
                table::RecipeFavorite::CreatedAt,
            ])
            .values_panic([user_id.into(), recipe_id.into(), timestamp().into()])
            .on_conflict(
                OnConflict::columns([
                    table::RecipeFavorite::UserId,
                    table::RecipeFavorite::RecipeId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(true)
    }

    /// Hidden recipes are reported as missing, visible ones owned by someone else as forbidden
    async fn check_modify(&self, actor: &Actor, id: &str) -> mealplanner_shared::Result<()> {
        let Some(recipe) = crate::find(&self.0, actor, id).await? else {
            return Err(Error::not_found("Recipe"));
        };

        if !actor.can_modify(recipe.user_id.as_deref()) {
            return Err(Error::Forbidden);
        }

        Ok(())
    }
}
