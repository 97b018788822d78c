use mealplanner_db::table;
use mealplanner_shared::{Error, new_id, timestamp, trim_optional};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

#[derive(Clone)]
pub struct Command(pub SqlitePool);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct IngredientInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub category_id: Option<String>,
    #[validate(length(max = 30))]
    pub default_unit: Option<String>,
    #[validate(range(min = 0.0))]
    pub calories_per_unit: Option<f64>,
}

impl CategoryInput {
    pub fn normalize(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            description: trim_optional(self.description),
        }
    }
}

impl IngredientInput {
    /// Ingredient names are stored lowercase so lookups stay case-insensitive
    pub fn normalize(self) -> Self {
        Self {
            name: self.name.trim().to_lowercase(),
            category_id: trim_optional(self.category_id),
            default_unit: trim_optional(self.default_unit),
            calories_per_unit: self.calories_per_unit,
        }
    }
}

fn map_unique(err: sqlx::Error, message: &str) -> Error {
    if mealplanner_shared::is_unique_violation(&err) {
        return Error::Conflict(message.to_owned());
    }

    err.into()
}

impl Command {
    pub async fn create_category(
        &self,
        input: CategoryInput,
    ) -> mealplanner_shared::Result<String> {
        let input = input.normalize();
        input.validate()?;

        let id = new_id();
        let (sql, values) = Query::insert()
            .into_table(table::FoodCategory::Table)
            .columns([
                table::FoodCategory::Id,
                table::FoodCategory::Name,
                table::FoodCategory::Description,
                table::FoodCategory::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                input.name.into(),
                input.description.into(),
                timestamp().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await
            .map_err(|err| map_unique(err, "Food category already exists"))?;

        tracing::info!(category_id = %id, "food category created");

        Ok(id)
    }

    pub async fn update_category(
        &self,
        id: impl Into<String>,
        input: CategoryInput,
    ) -> mealplanner_shared::Result<()> {
        let input = input.normalize();
        input.validate()?;

        let (sql, values) = Query::update()
            .table(table::FoodCategory::Table)
            .values([
                (table::FoodCategory::Name, input.name.into()),
                (table::FoodCategory::Description, input.description.into()),
            ])
            .and_where(Expr::col(table::FoodCategory::Id).eq(id.into()))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await
            .map_err(|err| map_unique(err, "Food category already exists"))?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Food category"));
        }

        Ok(())
    }

    /// Ingredients of a deleted category become uncategorised
    pub async fn delete_category(
        &self,
        id: impl Into<String>,
    ) -> mealplanner_shared::Result<()> {
        let (sql, values) = Query::delete()
            .from_table(table::FoodCategory::Table)
            .and_where(Expr::col(table::FoodCategory::Id).eq(id.into()))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("Food category"));
        }

        Ok(())
    }

    pub async fn create_ingredient(
        &self,
        input: IngredientInput,
    ) -> mealplanner_shared::Result<String> {
        let input = input.normalize();
        input.validate()?;
        self.check_category(input.category_id.as_deref()).await?;

        let id = new_id();
        let (sql, values) = Query::insert()
            .into_table(table::Ingredient::Table)
            .columns([
                table::Ingredient::Id,
                table::Ingredient::Name,
                table::Ingredient::CategoryId,
                table::Ingredient::DefaultUnit,
                table::Ingredient::CaloriesPerUnit,
                table::Ingredient::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                input.name.into(),
                input.category_id.into(),
                input.default_unit.into(),
                input.calories_per_unit.into(),
                timestamp().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await
            .map_err(|err| map_unique(err, "Ingredient already exists"))?;

        Ok(id)
    }

    pub async fn update_ingredient(
        &self,
        id: impl Into<String>,
        input: IngredientInput,
    ) -> mealplanner_shared::Result<()> {
        let input = input.normalize();
        input.validate()?;
        self.check_category(input.category_id.as_deref()).await?;

        let (sql, values) = Query::update()
            .table(table::Ingredient::Table)
            .values([
                (table::Ingredient::Name, input.name.into()),
                (table::Ingredient::CategoryId, input.category_id.into()),
                (table::Ingredient::DefaultUnit, input.default_unit.into()),
                (
                    table::Ingredient::CaloriesPerUnit,
                    input.calories_per_unit.into(),
                ),
            ])
            .and_where(Expr::col(table::Ingredient::Id).eq(id.into()))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await
            .map_err(|err| map_unique(err, "Ingredient already exists"))?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Ingredient"));
        }

        Ok(())
    }

    pub async fn delete_ingredient(
        &self,
        id: impl Into<String>,
    ) -> mealplanner_shared::Result<()> {
        let (sql, values) = Query::delete()
            .from_table(table::Ingredient::Table)
            .and_where(Expr::col(table::Ingredient::Id).eq(id.into()))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("Ingredient"));
        }

        Ok(())
    }

    async fn check_category(&self, id: Option<&str>) -> mealplanner_shared::Result<()> {
        let Some(id) = id else {
            return Ok(());
        };

        if crate::find_category(&self.0, id).await?.is_none() {
            return Err(Error::BadRequest(format!(
                "Food category {id} does not exist"
            )));
        }

        Ok(())
    }
}
