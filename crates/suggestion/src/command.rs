use mealplanner_db::table;
use mealplanner_recipe::{RecipeInput, Source, insert_recipe};
use mealplanner_shared::{Actor, Difficulty, Error, new_id, timestamp, trim_optional};
use sea_query::{Alias, Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{
    SqlitePool,
    prelude::FromRow,
    types::{Json, Text},
};
use validator::Validate;

use crate::{Decision, Interaction, Status, SuggestionInput};

#[derive(Clone)]
pub struct Command(pub SqlitePool);

#[derive(FromRow)]
struct SuggestionState {
    pub author_id: Option<String>,
    pub status: Text<Status>,
    pub title: String,
    pub description: String,
    pub meal_type: Text<mealplanner_shared::MealType>,
    pub cuisine: Option<String>,
    pub ingredients: Json<Vec<mealplanner_shared::IngredientLine>>,
    pub instructions: Json<Vec<String>>,
    pub dietary_tags: Json<Vec<String>>,
}

impl Command {
    pub async fn submit(
        &self,
        author_id: impl Into<String>,
        input: SuggestionInput,
    ) -> mealplanner_shared::Result<String> {
        self.insert(author_id.into(), input, Status::Pending).await
    }

    /// Suggestions written by an admin skip the review queue
    pub async fn submit_as_admin(
        &self,
        actor: &Actor,
        input: SuggestionInput,
    ) -> mealplanner_shared::Result<String> {
        if !actor.is_admin {
            return Err(Error::Forbidden);
        }

        self.insert(actor.user_id.to_owned(), input, Status::Approved)
            .await
    }

    async fn insert(
        &self,
        author_id: String,
        input: SuggestionInput,
        status: Status,
    ) -> mealplanner_shared::Result<String> {
        let input = input.normalize();
        input.validate()?;

        let id = new_id();
        let now = timestamp();
        let (reviewed_by, reviewed_at) = match status {
            Status::Pending => (None, None),
            _ => (Some(author_id.to_owned()), Some(now)),
        };

        let (sql, values) = Query::insert()
            .into_table(table::Suggestion::Table)
            .columns([
                table::Suggestion::Id,
                table::Suggestion::AuthorId,
                table::Suggestion::Title,
                table::Suggestion::Description,
                table::Suggestion::MealType,
                table::Suggestion::Cuisine,
                table::Suggestion::Ingredients,
                table::Suggestion::Instructions,
                table::Suggestion::DietaryTags,
                table::Suggestion::Status,
                table::Suggestion::ReviewedBy,
                table::Suggestion::ReviewedAt,
                table::Suggestion::CreatedAt,
                table::Suggestion::UpdatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                author_id.to_owned().into(),
                input.title.into(),
                input.description.into(),
                input.meal_type.to_string().into(),
                input.cuisine.into(),
                serde_json::to_string(&input.ingredients)?.into(),
                serde_json::to_string(&input.instructions)?.into(),
                serde_json::to_string(&input.dietary_tags)?.into(),
                status.to_string().into(),
                reviewed_by.into(),
                reviewed_at.into(),
                now.into(),
                now.into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.0).await?;

        tracing::info!(
            author_id = %author_id,
            suggestion_id = %id,
            status = %status,
            "suggestion submitted"
        );

        Ok(id)
    }

    pub async fn update(
        &self,
        author_id: impl Into<String>,
        id: impl Into<String>,
        input: SuggestionInput,
    ) -> mealplanner_shared::Result<()> {
        let input = input.normalize();
        input.validate()?;

        let author_id = author_id.into();
        let id = id.into();
        let state = self.load(&id).await?;

        if state.author_id.as_deref() != Some(author_id.as_str()) {
            return Err(Error::Forbidden);
        }

        if state.status.0 != Status::Pending {
            return Err(Error::Conflict(
                "Only pending suggestions can be edited".to_owned(),
            ));
        }

        let (sql, values) = Query::update()
            .table(table::Suggestion::Table)
            .values([
                (table::Suggestion::Title, input.title.into()),
                (table::Suggestion::Description, input.description.into()),
                (
                    table::Suggestion::MealType,
                    input.meal_type.to_string().into(),
                ),
                (table::Suggestion::Cuisine, input.cuisine.into()),
                (
                    table::Suggestion::Ingredients,
                    serde_json::to_string(&input.ingredients)?.into(),
                ),
                (
                    table::Suggestion::Instructions,
                    serde_json::to_string(&input.instructions)?.into(),
                ),
                (
                    table::Suggestion::DietaryTags,
                    serde_json::to_string(&input.dietary_tags)?.into(),
                ),
                (table::Suggestion::UpdatedAt, timestamp().into()),
            ])
            .and_where(Expr::col(table::Suggestion::Id).eq(&id))
            .and_where(Expr::col(table::Suggestion::Status).eq(Status::Pending.to_string()))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            return Err(Error::Conflict(
                "Only pending suggestions can be edited".to_owned(),
            ));
        }

        Ok(())
    }

    pub async fn delete(
        &self,
        actor: &Actor,
        id: impl Into<String>,
    ) -> mealplanner_shared::Result<()> {
        let id = id.into();
        let state = self.load(&id).await?;

        if !actor.can_modify(state.author_id.as_deref()) {
            return Err(Error::Forbidden);
        }

        let (sql, values) = Query::delete()
            .from_table(table::Suggestion::Table)
            .and_where(Expr::col(table::Suggestion::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(())
    }

    /// Approve or reject a pending suggestion. Returns the published recipe id, if any
    pub async fn review(
        &self,
        actor: &Actor,
        id: impl Into<String>,
        decision: Decision,
    ) -> mealplanner_shared::Result<Option<String>> {
        if !actor.is_admin {
            return Err(Error::Forbidden);
        }

        let id = id.into();
        let state = self.load(&id).await?;

        if state.status.0 != Status::Pending {
            return Err(Error::Conflict(
                "Only pending suggestions can be reviewed".to_owned(),
            ));
        }

        let (status, note, publish_recipe) = match decision {
            Decision::Approve {
                publish_recipe,
                note,
            } => (Status::Approved, trim_optional(note), publish_recipe),
            Decision::Reject { reason } => {
                let Some(reason) = trim_optional(Some(reason)) else {
                    return Err(Error::BadRequest(
                        "A reason is required to reject a suggestion".to_owned(),
                    ));
                };

                (Status::Rejected, Some(reason), false)
            }
        };

        let now = timestamp();
        let (sql, values) = Query::update()
            .table(table::Suggestion::Table)
            .values([
                (table::Suggestion::Status, status.to_string().into()),
                (table::Suggestion::ReviewNote, note.into()),
                (
                    table::Suggestion::ReviewedBy,
                    actor.user_id.to_owned().into(),
                ),
                (table::Suggestion::ReviewedAt, now.into()),
                (table::Suggestion::UpdatedAt, now.into()),
            ])
            .and_where(Expr::col(table::Suggestion::Id).eq(&id))
            .and_where(Expr::col(table::Suggestion::Status).eq(Status::Pending.to_string()))
            .build_sqlx(SqliteQueryBuilder);

        let mut tx = self.0.begin().await?;

        let result = sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(Error::Conflict(
                "Only pending suggestions can be reviewed".to_owned(),
            ));
        }

        let recipe_id = if publish_recipe {
            let input = RecipeInput {
                title: state.title,
                description: state.description,
                cuisine: state.cuisine,
                meal_type: state.meal_type.0,
                difficulty: Difficulty::default(),
                prep_time: 0,
                cook_time: 0,
                servings: 1,
                calories: None,
                ingredients: state.ingredients.0,
                instructions: state.instructions.0,
                dietary_tags: state.dietary_tags.0,
                is_public: true,
            };

            Some(
                insert_recipe(
                    &mut *tx,
                    state.author_id.as_deref(),
                    input,
                    Source::Suggestion,
                )
                .await?,
            )
        } else {
            None
        };

        tx.commit().await?;

        tracing::info!(
            admin_id = %actor.user_id,
            suggestion_id = %id,
            status = %status,
            recipe_id = ?recipe_id,
            "suggestion reviewed"
        );

        Ok(recipe_id)
    }

    /// Returns whether the suggestion is now liked
    pub async fn toggle_like(
        &self,
        user_id: impl Into<String>,
        id: impl Into<String>,
    ) -> mealplanner_shared::Result<bool> {
        self.toggle(Interaction::Like, user_id.into(), id.into())
            .await
    }

    /// Returns whether the suggestion is now saved
    pub async fn toggle_save(
        &self,
        user_id: impl Into<String>,
        id: impl Into<String>,
    ) -> mealplanner_shared::Result<bool> {
        self.toggle(Interaction::Save, user_id.into(), id.into())
            .await
    }

    /// A user's views are only counted once
    pub async fn record_view(
        &self,
        user_id: impl Into<String>,
        id: impl Into<String>,
    ) -> mealplanner_shared::Result<()> {
        let user_id: String = user_id.into();
        let id: String = id.into();
        self.check_approved(&id).await?;

        let (sql, values) = Query::insert()
            .into_table(Alias::new(Interaction::View.table()))
            .columns([
                table::SuggestionInteraction::UserId,
                table::SuggestionInteraction::SuggestionId,
                table::SuggestionInteraction::CreatedAt,
            ])
            .values_panic([user_id.into(), id.into(), timestamp().into()])
            .on_conflict(
                OnConflict::columns([
                    table::SuggestionInteraction::UserId,
                    table::SuggestionInteraction::SuggestionId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(())
    }

    async fn toggle(
        &self,
        interaction: Interaction,
        user_id: String,
        id: String,
    ) -> mealplanner_shared::Result<bool> {
        self.check_approved(&id).await?;

        let target = Alias::new(interaction.table());
        let (sql, values) = Query::select()
            .expr(Expr::cust("COUNT(*)"))
            .from(target.clone())
            .and_where(Expr::col(table::SuggestionInteraction::UserId).eq(&user_id))
            .and_where(Expr::col(table::SuggestionInteraction::SuggestionId).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        let exists = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
            .fetch_one(&self.0)
            .await?
            > 0;

        let (sql, values) = if exists {
            Query::delete()
                .from_table(target)
                .and_where(Expr::col(table::SuggestionInteraction::UserId).eq(&user_id))
                .and_where(Expr::col(table::SuggestionInteraction::SuggestionId).eq(&id))
                .build_sqlx(SqliteQueryBuilder)
        } else {
            Query::insert()
                .into_table(target)
                .columns([
                    table::SuggestionInteraction::UserId,
                    table::SuggestionInteraction::SuggestionId,
                    table::SuggestionInteraction::CreatedAt,
                ])
                .values_panic([user_id.into(), id.into(), timestamp().into()])
                .on_conflict(
                    OnConflict::columns([
                        table::SuggestionInteraction::UserId,
                        table::SuggestionInteraction::SuggestionId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .build_sqlx(SqliteQueryBuilder)
        };

        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(!exists)
    }

    async fn check_approved(&self, id: &str) -> mealplanner_shared::Result<()> {
        let state = self.load(id).await?;
        if state.status.0 != Status::Approved {
            return Err(Error::not_found("Suggestion"));
        }

        Ok(())
    }

    async fn load(&self, id: &str) -> mealplanner_shared::Result<SuggestionState> {
        let (sql, values) = Query::select()
            .columns([
                table::Suggestion::AuthorId,
                table::Suggestion::Status,
                table::Suggestion::Title,
                table::Suggestion::Description,
                table::Suggestion::MealType,
                table::Suggestion::Cuisine,
                table::Suggestion::Ingredients,
                table::Suggestion::Instructions,
                table::Suggestion::DietaryTags,
            ])
            .from(table::Suggestion::Table)
            .and_where(Expr::col(table::Suggestion::Id).eq(id))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_as_with::<_, SuggestionState, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
            .ok_or_else(|| Error::not_found("Suggestion"))
    }
}
