use axum::{Extension, extract::State, response::IntoResponse};
use mealplanner_ai::{
    Generated, GeneratedIngredient, GeneratedMealPlan, GeneratedRecipe, MealPlanRequest,
    RecipeRequest,
};
use mealplanner_mealplan::{MealPlanInput, MealPlanItemInput};
use mealplanner_recipe::RecipeInput;
use mealplanner_shared::{Actor, IngredientLine};
use serde::{Deserialize, Serialize};

use crate::{error::ApiResult, extract::Json, response, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct RecipeBody {
    #[serde(flatten)]
    pub request: RecipeRequest,
    #[serde(default)]
    pub save: bool,
}

#[derive(Debug, Deserialize)]
pub struct MealPlanBody {
    #[serde(flatten)]
    pub request: MealPlanRequest,
    pub name: Option<String>,
    #[serde(default)]
    pub save: bool,
}

#[derive(Debug, Serialize)]
pub struct GeneratedPayload<T> {
    #[serde(flatten)]
    pub generated: Generated<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_id: Option<String>,
}

fn ingredient_lines(ingredients: &[GeneratedIngredient]) -> Vec<IngredientLine> {
    ingredients
        .iter()
        .map(|i| IngredientLine {
            name: i.name.to_owned(),
            quantity: i.quantity,
            unit: i.unit.to_owned(),
        })
        .collect()
}

fn recipe_input(recipe: &GeneratedRecipe) -> RecipeInput {
    RecipeInput {
        title: recipe.title.to_owned(),
        description: recipe.description.to_owned(),
        cuisine: recipe.cuisine.to_owned(),
        meal_type: recipe.meal_type,
        difficulty: recipe.difficulty,
        prep_time: recipe.prep_time,
        cook_time: recipe.cook_time,
        servings: recipe.servings,
        calories: recipe.calories,
        ingredients: ingredient_lines(&recipe.ingredients),
        instructions: recipe.instructions.to_owned(),
        dietary_tags: recipe.dietary_tags.to_owned(),
        is_public: false,
    }
}

/// Every generated meal becomes a custom item of the stored plan
fn meal_plan_input(
    plan: &GeneratedMealPlan,
    request: &MealPlanRequest,
    name: Option<String>,
) -> MealPlanInput {
    let items = plan
        .days
        .iter()
        .flat_map(|day| {
            day.meals.iter().map(move |meal| MealPlanItemInput {
                custom_ingredients: ingredient_lines(&meal.ingredients),
                servings: request.servings,
                notes: Some(meal.description.trim().to_owned()).filter(|d| !d.is_empty()),
                ..MealPlanItemInput::custom(day.day, meal.meal_type, meal.name.to_owned())
            })
        })
        .collect();

    MealPlanInput {
        name: name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("AI meal plan {}", request.start_date)),
        start_date: request.start_date,
        end_date: request.end_date(),
        notes: request.notes.to_owned(),
        items,
    }
}

#[tracing::instrument(skip_all, fields(user_id = %actor.user_id, save = body.save))]
pub async fn recipe(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<RecipeBody>,
) -> ApiResult<impl IntoResponse> {
    let generated = state.generator.recipe(&body.request).await?;

    let saved_id = if body.save {
        let id = state
            .recipe_command
            .create_with_source(
                &actor.user_id,
                recipe_input(&generated.value),
                mealplanner_recipe::Source::Ai,
            )
            .await?;

        Some(id)
    } else {
        None
    };

    let message = generated.warning.to_owned();
    let payload = GeneratedPayload {
        generated,
        saved_id,
    };

    Ok(match message {
        Some(warning) => response::ok_with_message(payload, warning),
        None => response::ok(payload),
    })
}

/// Empty preference lists in the request are filled from the caller's profile
#[tracing::instrument(skip_all, fields(user_id = %actor.user_id, save = body.save))]
pub async fn meal_plan(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<MealPlanBody>,
) -> ApiResult<impl IntoResponse> {
    let MealPlanBody {
        mut request,
        name,
        save,
    } = body;

    if let Some(profile) = mealplanner_user::profile(&state.pool, &actor.user_id).await? {
        if request.dietary_preferences.is_empty() {
            request.dietary_preferences = profile.dietary_preferences;
        }

        if request.allergies.is_empty() {
            request.allergies = profile.allergies;
        }

        if request.cuisine_preferences.is_empty() {
            request.cuisine_preferences = profile.cuisine_preferences;
        }

        if request.calorie_target.is_none() {
            request.calorie_target = profile
                .daily_calorie_target
                .and_then(|target| u32::try_from(target).ok());
        }
    }

    let generated = state.generator.meal_plan(&request).await?;

    let saved_id = if save {
        let id = state
            .meal_plan_command
            .create_generated(
                &actor.user_id,
                meal_plan_input(&generated.value, &request, name),
            )
            .await?;

        Some(id)
    } else {
        None
    };

    let message = generated.warning.to_owned();
    let payload = GeneratedPayload {
        generated,
        saved_id,
    };

    Ok(match message {
        Some(warning) => response::ok_with_message(payload, warning),
        None => response::ok(payload),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mealplanner_shared::{DayOfWeek, MealType};

    #[test]
    fn test_meal_plan_input_uses_custom_items() {
        let request = MealPlanRequest {
            days: 2,
            servings: 3,
            ..MealPlanRequest::new(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
        };
        let plan = mealplanner_ai::fallback::meal_plan(&request);

        let input = meal_plan_input(&plan, &request, None);

        assert_eq!(input.name, "AI meal plan 2026-03-02");
        assert_eq!(input.end_date, NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
        assert_eq!(input.items.len(), 2 * 3);
        assert!(input.items.iter().all(|item| item.recipe_id.is_none()
            && item.custom_meal_name.is_some()
            && item.servings == 3));
        assert_eq!(input.items[0].day_of_week, DayOfWeek::Monday);
        assert_eq!(input.items[0].meal_type, MealType::Breakfast);
    }

    #[test]
    fn test_recipe_input_is_private() {
        let input = recipe_input(&mealplanner_ai::fallback::recipe());

        assert!(!input.is_public);
        assert!(!input.ingredients.is_empty());
    }
}
