use mealplanner_db::table;
use mealplanner_shared::{Actor, Error, IngredientLine, new_id, timestamp, trim_optional};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, types::Json};
use validator::Validate;

use crate::{GenerateInput, GroceryItem, GroceryListInput};

const MAX_NAME_LEN: usize = 100;

#[derive(Clone)]
pub struct Command(pub SqlitePool);

impl Command {
    pub async fn create(
        &self,
        user_id: impl Into<String>,
        input: GroceryListInput,
    ) -> mealplanner_shared::Result<String> {
        let input = input.normalize();
        input.validate()?;

        self.insert(user_id.into(), None, &input.name, &input.items)
            .await
    }

    pub async fn update(
        &self,
        user_id: impl Into<String>,
        id: impl Into<String>,
        input: GroceryListInput,
    ) -> mealplanner_shared::Result<()> {
        let input = input.normalize();
        input.validate()?;

        let (sql, values) = Query::update()
            .table(table::GroceryList::Table)
            .values([
                (table::GroceryList::Name, input.name.into()),
                (
                    table::GroceryList::Items,
                    serde_json::to_string(&input.items)?.into(),
                ),
                (table::GroceryList::UpdatedAt, timestamp().into()),
            ])
            .and_where(Expr::col(table::GroceryList::Id).eq(id.into()))
            .and_where(Expr::col(table::GroceryList::UserId).eq(user_id.into()))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("Grocery list"));
        }

        Ok(())
    }

    pub async fn delete(
        &self,
        user_id: impl Into<String>,
        id: impl Into<String>,
    ) -> mealplanner_shared::Result<()> {
        let (sql, values) = Query::delete()
            .from_table(table::GroceryList::Table)
            .and_where(Expr::col(table::GroceryList::Id).eq(id.into()))
            .and_where(Expr::col(table::GroceryList::UserId).eq(user_id.into()))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("Grocery list"));
        }

        Ok(())
    }

    /// Flip the checked flag of the item at `index` and return the updated item
    pub async fn toggle_item(
        &self,
        user_id: impl Into<String>,
        id: impl Into<String>,
        index: usize,
    ) -> mealplanner_shared::Result<GroceryItem> {
        let user_id = user_id.into();
        let id = id.into();

        let mut tx = self.0.begin().await?;

        let (sql, values) = Query::select()
            .column(table::GroceryList::Items)
            .from(table::GroceryList::Table)
            .and_where(Expr::col(table::GroceryList::Id).eq(&id))
            .and_where(Expr::col(table::GroceryList::UserId).eq(&user_id))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        let Some(Json(mut items)) =
            sqlx::query_scalar_with::<_, Json<Vec<GroceryItem>>, _>(&sql, values)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Err(Error::not_found("Grocery list"));
        };

        let Some(item) = items.get_mut(index) else {
            return Err(Error::BadRequest(format!(
                "Item index {index} is out of range"
            )));
        };

        item.checked = !item.checked;
        let item = item.clone();

        let (sql, values) = Query::update()
            .table(table::GroceryList::Table)
            .values([
                (
                    table::GroceryList::Items,
                    serde_json::to_string(&items)?.into(),
                ),
                (table::GroceryList::UpdatedAt, timestamp().into()),
            ])
            .and_where(Expr::col(table::GroceryList::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(item)
    }

    /// Build a list from every ingredient of an owned meal plan
    pub async fn generate(
        &self,
        user_id: impl Into<String>,
        input: GenerateInput,
    ) -> mealplanner_shared::Result<String> {
        input.validate()?;

        let user_id = user_id.into();
        let Some(plan) = mealplanner_mealplan::find(&self.0, &user_id, &input.meal_plan_id).await?
        else {
            return Err(Error::not_found("Meal plan"));
        };

        let viewer = Actor::user(&user_id);
        let mut lines: Vec<IngredientLine> = Vec::new();

        for item in &plan.items {
            if let Some(recipe_id) = &item.recipe_id {
                let Some(recipe) = mealplanner_recipe::find(&self.0, &viewer, recipe_id).await?
                else {
                    tracing::warn!(
                        meal_plan_id = %plan.plan.id,
                        recipe_id = %recipe_id,
                        "recipe no longer visible, skipped"
                    );
                    continue;
                };

                let factor = item.servings as f64 / Ord::max(recipe.servings, 1) as f64;
                lines.extend(crate::scale(&recipe.ingredients, factor));
            }

            lines.extend(item.custom_ingredients.iter().cloned());
        }

        let mut items = Vec::new();
        for line in crate::aggregate(lines) {
            let category = match mealplanner_catalog::find_ingredient_by_name(&self.0, &line.name)
                .await?
                .and_then(|ingredient| ingredient.category_name)
            {
                Some(category) => category,
                None => crate::categorize(&line.name).to_string(),
            };

            items.push(GroceryItem {
                name: line.name,
                quantity: line.quantity,
                unit: line.unit,
                category,
                checked: false,
            });
        }

        items.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.name.cmp(&b.name))
        });

        let name = trim_optional(input.name)
            .unwrap_or_else(|| format!("Groceries for {}", plan.plan.name))
            .chars()
            .take(MAX_NAME_LEN)
            .collect::<String>();

        let id = self
            .insert(user_id.to_owned(), Some(plan.plan.id.to_owned()), &name, &items)
            .await?;

        tracing::info!(
            user_id = %user_id,
            meal_plan_id = %plan.plan.id,
            grocery_list_id = %id,
            items = items.len(),
            "grocery list generated"
        );

        Ok(id)
    }

    async fn insert(
        &self,
        user_id: String,
        meal_plan_id: Option<String>,
        name: &str,
        items: &[GroceryItem],
    ) -> mealplanner_shared::Result<String> {
        let id = new_id();
        let now = timestamp();

        let (sql, values) = Query::insert()
            .into_table(table::GroceryList::Table)
            .columns([
                table::GroceryList::Id,
                table::GroceryList::UserId,
                table::GroceryList::MealPlanId,
                table::GroceryList::Name,
                table::GroceryList::Items,
                table::GroceryList::CreatedAt,
                table::GroceryList::UpdatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                user_id.into(),
                meal_plan_id.into(),
                name.into(),
                serde_json::to_string(items)?.into(),
                now.into(),
                now.into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(id)
    }
}
