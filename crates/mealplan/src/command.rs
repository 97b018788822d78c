use mealplanner_db::table;
use mealplanner_shared::{Actor, Error, format_date, new_id, timestamp};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, SqlitePool};
use validator::Validate;

use crate::{MealPlanInput, MealPlanItemInput, MealPlanUpdate, check_date_range};

#[derive(Clone)]
pub struct Command(pub SqlitePool);

async fn insert_item(
    conn: &mut SqliteConnection,
    meal_plan_id: &str,
    item: &MealPlanItemInput,
) -> mealplanner_shared::Result<String> {
    let id = new_id();

    let (sql, values) = Query::insert()
        .into_table(table::MealPlanItem::Table)
        .columns([
            table::MealPlanItem::Id,
            table::MealPlanItem::MealPlanId,
            table::MealPlanItem::DayOfWeek,
            table::MealPlanItem::MealType,
            table::MealPlanItem::RecipeId,
            table::MealPlanItem::CustomMealName,
            table::MealPlanItem::CustomIngredients,
            table::MealPlanItem::Servings,
            table::MealPlanItem::Notes,
            table::MealPlanItem::CreatedAt,
        ])
        .values_panic([
            id.to_owned().into(),
            meal_plan_id.to_owned().into(),
            item.day_of_week.to_string().into(),
            item.meal_type.to_string().into(),
            item.recipe_id.to_owned().into(),
            item.custom_meal_name.to_owned().into(),
            serde_json::to_string(&item.custom_ingredients)?.into(),
            item.servings.into(),
            item.notes.to_owned().into(),
            timestamp().into(),
        ])
        .build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(conn).await?;

    Ok(id)
}

impl Command {
    pub async fn create(
        &self,
        user_id: impl Into<String>,
        input: MealPlanInput,
    ) -> mealplanner_shared::Result<String> {
        self.insert(user_id.into(), input, false).await
    }

    /// Store a generated plan, flagged as AI generated
    pub async fn create_generated(
        &self,
        user_id: impl Into<String>,
        input: MealPlanInput,
    ) -> mealplanner_shared::Result<String> {
        self.insert(user_id.into(), input, true).await
    }

    async fn insert(
        &self,
        user_id: String,
        input: MealPlanInput,
        is_ai_generated: bool,
    ) -> mealplanner_shared::Result<String> {
        let input = input.normalize();
        input.validate()?;
        check_date_range(input.start_date, input.end_date)?;

        for item in input.items.iter() {
            self.check_item(&user_id, item).await?;
        }

        let id = new_id();
        let now = timestamp();

        let (sql, values) = Query::insert()
            .into_table(table::MealPlan::Table)
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
            .values_panic([
                id.to_owned().into(),
                user_id.to_owned().into(),
                input.name.into(),
                format_date(input.start_date).into(),
                format_date(input.end_date).into(),
                input.notes.into(),
                is_ai_generated.into(),
                now.into(),
                now.into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        let mut tx = self.0.begin().await?;

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        for item in input.items.iter() {
            insert_item(&mut tx, &id, item).await?;
        }

        tx.commit().await?;

        tracing::info!(
            user_id = %user_id,
            meal_plan_id = %id,
            items = input.items.len(),
            is_ai_generated,
            "meal plan created"
        );

        Ok(id)
    }

    pub async fn update(
        &self,
        user_id: impl Into<String>,
        id: impl Into<String>,
        input: MealPlanUpdate,
    ) -> mealplanner_shared::Result<()> {
        let input = input.normalize();
        input.validate()?;
        check_date_range(input.start_date, input.end_date)?;

        let (sql, values) = Query::update()
            .table(table::MealPlan::Table)
            .values([
                (table::MealPlan::Name, input.name.into()),
                (
                    table::MealPlan::StartDate,
                    format_date(input.start_date).into(),
                ),
                (table::MealPlan::EndDate, format_date(input.end_date).into()),
                (table::MealPlan::Notes, input.notes.into()),
                (table::MealPlan::UpdatedAt, timestamp().into()),
            ])
            .and_where(Expr::col(table::MealPlan::Id).eq(id.into()))
            .and_where(Expr::col(table::MealPlan::UserId).eq(user_id.into()))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("Meal plan"));
        }

        Ok(())
    }

    /// Items are removed by cascade, grocery lists generated from it are kept
    pub async fn delete(
        &self,
        user_id: impl Into<String>,
        id: impl Into<String>,
    ) -> mealplanner_shared::Result<()> {
        let (sql, values) = Query::delete()
            .from_table(table::MealPlan::Table)
            .and_where(Expr::col(table::MealPlan::Id).eq(id.into()))
            .and_where(Expr::col(table::MealPlan::UserId).eq(user_id.into()))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("Meal plan"));
        }

        Ok(())
    }

    pub async fn add_item(
        &self,
        user_id: impl Into<String>,
        meal_plan_id: impl Into<String>,
        item: MealPlanItemInput,
    ) -> mealplanner_shared::Result<String> {
        let user_id = user_id.into();
        let meal_plan_id = meal_plan_id.into();

        let item = item.normalize();
        item.validate()?;
        self.check_owner(&user_id, &meal_plan_id).await?;
        self.check_item(&user_id, &item).await?;

        let mut tx = self.0.begin().await?;
        let id = insert_item(&mut tx, &meal_plan_id, &item).await?;
        touch(&mut tx, &meal_plan_id).await?;
        tx.commit().await?;

        Ok(id)
    }

    pub async fn update_item(
        &self,
        user_id: impl Into<String>,
        meal_plan_id: impl Into<String>,
        item_id: impl Into<String>,
        item: MealPlanItemInput,
    ) -> mealplanner_shared::Result<()> {
        let user_id = user_id.into();
        let meal_plan_id = meal_plan_id.into();

        let item = item.normalize();
        item.validate()?;
        self.check_owner(&user_id, &meal_plan_id).await?;
        self.check_item(&user_id, &item).await?;

        let (sql, values) = Query::update()
            .table(table::MealPlanItem::Table)
            .values([
                (
                    table::MealPlanItem::DayOfWeek,
                    item.day_of_week.to_string().into(),
                ),
                (
                    table::MealPlanItem::MealType,
                    item.meal_type.to_string().into(),
                ),
                (table::MealPlanItem::RecipeId, item.recipe_id.into()),
                (table::MealPlanItem::CustomMealName, item.custom_meal_name.into()),
                (
                    table::MealPlanItem::CustomIngredients,
                    serde_json::to_string(&item.custom_ingredients)?.into(),
                ),
                (table::MealPlanItem::Servings, item.servings.into()),
                (table::MealPlanItem::Notes, item.notes.into()),
            ])
            .and_where(Expr::col(table::MealPlanItem::Id).eq(item_id.into()))
            .and_where(Expr::col(table::MealPlanItem::MealPlanId).eq(&meal_plan_id))
            .build_sqlx(SqliteQueryBuilder);

        let mut tx = self.0.begin().await?;

        let result = sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("Meal plan item"));
        }

        touch(&mut tx, &meal_plan_id).await?;
        tx.commit().await?;

        Ok(())
    }

    pub async fn remove_item(
        &self,
        user_id: impl Into<String>,
        meal_plan_id: impl Into<String>,
        item_id: impl Into<String>,
    ) -> mealplanner_shared::Result<()> {
        let user_id = user_id.into();
        let meal_plan_id = meal_plan_id.into();

        self.check_owner(&user_id, &meal_plan_id).await?;

        let (sql, values) = Query::delete()
            .from_table(table::MealPlanItem::Table)
            .and_where(Expr::col(table::MealPlanItem::Id).eq(item_id.into()))
            .and_where(Expr::col(table::MealPlanItem::MealPlanId).eq(&meal_plan_id))
            .build_sqlx(SqliteQueryBuilder);

        let mut tx = self.0.begin().await?;

        let result = sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("Meal plan item"));
        }

        touch(&mut tx, &meal_plan_id).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn check_owner(
        &self,
        user_id: &str,
        meal_plan_id: &str,
    ) -> mealplanner_shared::Result<()> {
        let (sql, values) = Query::select()
            .column(table::MealPlan::Id)
            .from(table::MealPlan::Table)
            .and_where(Expr::col(table::MealPlan::Id).eq(meal_plan_id))
            .and_where(Expr::col(table::MealPlan::UserId).eq(user_id))
            .build_sqlx(SqliteQueryBuilder);

        let found = sqlx::query_scalar_with::<_, String, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?;

        if found.is_none() {
            return Err(Error::not_found("Meal plan"));
        }

        Ok(())
    }

    async fn check_item(
        &self,
        user_id: &str,
        item: &MealPlanItemInput,
    ) -> mealplanner_shared::Result<()> {
        item.check_target()?;

        let Some(recipe_id) = item.recipe_id.as_deref() else {
            return Ok(());
        };

        if mealplanner_recipe::find(&self.0, &Actor::user(user_id), recipe_id)
            .await?
            .is_none()
        {
            return Err(Error::BadRequest(format!(
                "Recipe {recipe_id} does not exist"
            )));
        }

        Ok(())
    }
}

async fn touch(
    conn: &mut SqliteConnection,
    meal_plan_id: &str,
) -> mealplanner_shared::Result<()> {
    let (sql, values) = Query::update()
        .table(table::MealPlan::Table)
        .value(table::MealPlan::UpdatedAt, timestamp())
        .and_where(Expr::col(table::MealPlan::Id).eq(meal_plan_id))
        .build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(conn).await?;

    Ok(())
}
