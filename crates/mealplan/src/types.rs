use chrono::NaiveDate;
use mealplanner_shared::{DayOfWeek, Error, IngredientLine, MealType, trim_lines, trim_optional};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Longest allowed plan, both ends included
pub const MAX_PLAN_DAYS: i64 = 31;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MealPlanItemInput {
    pub day_of_week: DayOfWeek,
    pub meal_type: MealType,
    pub recipe_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub custom_meal_name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50), nested)]
    pub custom_ingredients: Vec<IngredientLine>,
    #[serde(default = "default_servings")]
    #[validate(range(min = 1, max = 50))]
    pub servings: u32,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

fn default_servings() -> u32 {
    1
}

impl MealPlanItemInput {
    pub fn recipe(
        day_of_week: DayOfWeek,
        meal_type: MealType,
        recipe_id: impl Into<String>,
    ) -> Self {
        Self {
            day_of_week,
            meal_type,
            recipe_id: Some(recipe_id.into()),
            custom_meal_name: None,
            custom_ingredients: vec![],
            servings: 1,
            notes: None,
        }
    }

    pub fn custom(day_of_week: DayOfWeek, meal_type: MealType, name: impl Into<String>) -> Self {
        Self {
            day_of_week,
            meal_type,
            recipe_id: None,
            custom_meal_name: Some(name.into()),
            custom_ingredients: vec![],
            servings: 1,
            notes: None,
        }
    }

    /// Blank recipe ids and meal names count as absent
    pub fn normalize(self) -> Self {
        Self {
            recipe_id: trim_optional(self.recipe_id),
            custom_meal_name: trim_optional(self.custom_meal_name),
            custom_ingredients: trim_lines(self.custom_ingredients),
            notes: trim_optional(self.notes),
            ..self
        }
    }

    /// An item points at a recipe or names a custom meal, never both
    pub fn check_target(&self) -> mealplanner_shared::Result<()> {
        if self.recipe_id.is_some() == self.custom_meal_name.is_some() {
            return Err(Error::BadRequest(
                "A meal plan item needs exactly one of recipe_id or custom_meal_name".to_owned(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MealPlanInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(length(max = 200), nested)]
    pub items: Vec<MealPlanItemInput>,
}

impl MealPlanInput {
    pub fn normalize(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            notes: trim_optional(self.notes),
            items: self
                .items
                .into_iter()
                .map(MealPlanItemInput::normalize)
                .collect(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MealPlanUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl MealPlanUpdate {
    pub fn normalize(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            notes: trim_optional(self.notes),
            ..self
        }
    }
}

pub fn check_date_range(start: NaiveDate, end: NaiveDate) -> mealplanner_shared::Result<()> {
    if end < start {
        return Err(Error::BadRequest(
            "end_date must be on or after start_date".to_owned(),
        ));
    }

    if (end - start).num_days() + 1 > MAX_PLAN_DAYS {
        return Err(Error::BadRequest(format!(
            "A meal plan cannot span more than {MAX_PLAN_DAYS} days"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_date_range() {
        assert!(check_date_range(date("2025-01-06"), date("2025-01-06")).is_ok());
        assert!(check_date_range(date("2025-01-01"), date("2025-01-31")).is_ok());
        assert!(matches!(
            check_date_range(date("2025-01-07"), date("2025-01-06")),
            Err(Error::BadRequest(_))
        ));
        assert!(matches!(
            check_date_range(date("2025-01-01"), date("2025-02-01")),
            Err(Error::BadRequest(_))
        ));
    }

    #[test]
    fn test_item_target() {
        let item = MealPlanItemInput::recipe(DayOfWeek::Monday, MealType::Lunch, "r1");
        assert!(item.check_target().is_ok());

        let item = MealPlanItemInput::custom(DayOfWeek::Monday, MealType::Lunch, "Leftovers");
        assert!(item.check_target().is_ok());

        let mut both = MealPlanItemInput::recipe(DayOfWeek::Monday, MealType::Lunch, "r1");
        both.custom_meal_name = Some("Leftovers".to_owned());
        assert!(both.check_target().is_err());

        let neither =
            MealPlanItemInput::custom(DayOfWeek::Monday, MealType::Lunch, " ").normalize();
        assert!(neither.check_target().is_err());

        let mut blank_recipe =
            MealPlanItemInput::custom(DayOfWeek::Monday, MealType::Lunch, " Leftovers ");
        blank_recipe.recipe_id = Some(String::new());
        let blank_recipe = blank_recipe.normalize();
        assert_eq!(blank_recipe.recipe_id, None);
        assert_eq!(blank_recipe.custom_meal_name.as_deref(), Some("Leftovers"));
        assert!(blank_recipe.check_target().is_ok());
    }

    #[test]
    fn test_blank_plan_name_is_rejected() {
        let input = MealPlanInput {
            name: "   ".to_owned(),
            start_date: date("2025-01-06"),
            end_date: date("2025-01-12"),
            notes: Some(" ".to_owned()),
            items: vec![],
        }
        .normalize();

        assert_eq!(input.notes, None);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_item_defaults_from_json() {
        let item: MealPlanItemInput = serde_json::from_str(
            r#"{"day_of_week":"friday","meal_type":"dinner","custom_meal_name":"Pizza night"}"#,
        )
        .unwrap();

        assert_eq!(item.servings, 1);
        assert!(item.custom_ingredients.is_empty());
        assert!(item.validate().is_ok());
    }
}
