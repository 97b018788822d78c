use std::collections::HashSet;

use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::Validate;

use crate::{GeneratedIngredient, GeneratedMealPlan, GeneratedRecipe, MealPlanRequest};

/// Generated text that does not satisfy the expected schema
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct Rejection(pub String);

impl Rejection {
    fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

const FENCE: &str = "```";

/// Body of the answer: the whole text, or the inside of a single fenced block
fn unwrap_fence(text: &str) -> Result<&str, Rejection> {
    let text = text.trim();
    let Some(rest) = text.strip_prefix(FENCE) else {
        return Ok(text);
    };

    let Some(body) = rest.strip_suffix(FENCE) else {
        return Err(Rejection::new("unterminated code fence"));
    };

    let (info, body) = body.split_once('\n').unwrap_or((body, ""));
    if !matches!(info.trim(), "" | "json" | "JSON") {
        return Err(Rejection::new(format!(
            "unexpected code fence language `{}`",
            info.trim()
        )));
    }

    if body.contains(FENCE) {
        return Err(Rejection::new("more than one code fence"));
    }

    Ok(body.trim())
}

fn parse<T>(text: &str) -> Result<T, Rejection>
where
    T: DeserializeOwned + Validate,
{
    let body = unwrap_fence(text)?;
    if body.is_empty() {
        return Err(Rejection::new("empty response"));
    }

    let value: T =
        serde_json::from_str(body).map_err(|err| Rejection::new(format!("invalid JSON: {err}")))?;

    value
        .validate()
        .map_err(|err| Rejection::new(format!("invalid values: {err}")))?;

    Ok(value)
}

fn check_ingredients(ingredients: &[GeneratedIngredient]) -> Result<(), Rejection> {
    if ingredients.iter().any(|i| i.name.trim().is_empty()) {
        return Err(Rejection::new("empty ingredient name"));
    }

    Ok(())
}

pub fn parse_recipe(text: &str) -> Result<GeneratedRecipe, Rejection> {
    let recipe: GeneratedRecipe = parse(text)?;

    if recipe.title.trim().is_empty() {
        return Err(Rejection::new("empty recipe title"));
    }

    check_ingredients(&recipe.ingredients)?;

    if recipe.instructions.iter().any(|step| step.trim().is_empty()) {
        return Err(Rejection::new("empty instruction step"));
    }

    Ok(recipe)
}

/// Parse a plan and check it only covers the requested days and meal types
pub fn parse_meal_plan(
    text: &str,
    request: &MealPlanRequest,
) -> Result<GeneratedMealPlan, Rejection> {
    let plan: GeneratedMealPlan = parse(text)?;

    let days = request.requested_days();
    let meal_types = request.requested_meal_types();
    let mut seen = HashSet::new();

    for day in &plan.days {
        if !days.contains(&day.day) {
            return Err(Rejection::new(format!("day `{}` was not requested", day.day)));
        }

        if !seen.insert(day.day) {
            return Err(Rejection::new(format!("day `{}` appears twice", day.day)));
        }

        if let Some(meal) = day
            .meals
            .iter()
            .find(|meal| !meal_types.contains(&meal.meal_type))
        {
            return Err(Rejection::new(format!(
                "meal type `{}` on {} was not requested",
                meal.meal_type, day.day
            )));
        }

        for meal in &day.meals {
            if meal.name.trim().is_empty() {
                return Err(Rejection::new(format!("empty meal name on {}", day.day)));
            }

            check_ingredients(&meal.ingredients)?;
        }
    }

    Ok(plan)
}
