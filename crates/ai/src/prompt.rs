use chrono::{Days, NaiveDate};
use mealplanner_shared::{DayOfWeek, MealType};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeRequest {
    #[serde(default)]
    #[validate(length(max = 30))]
    pub ingredients: Vec<String>,
    #[validate(length(min = 1, max = 50))]
    pub cuisine: Option<String>,
    pub meal_type: Option<MealType>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub dietary_restrictions: Vec<String>,
    #[validate(range(min = 5, max = 1440))]
    pub max_time: Option<u32>,
    #[serde(default = "default_servings")]
    #[validate(range(min = 1, max = 50))]
    pub servings: u32,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MealPlanRequest {
    pub start_date: NaiveDate,
    #[serde(default = "default_days")]
    #[validate(range(min = 1, max = 7))]
    pub days: u32,
    #[serde(default = "default_meal_types")]
    #[validate(length(min = 1, max = 4))]
    pub meal_types: Vec<MealType>,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub allergies: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub cuisine_preferences: Vec<String>,
    #[validate(range(min = 500, max = 10000))]
    pub calorie_target: Option<u32>,
    #[serde(default = "default_servings")]
    #[validate(range(min = 1, max = 50))]
    pub servings: u32,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

fn default_servings() -> u32 {
    2
}

impl Default for RecipeRequest {
    fn default() -> Self {
        Self {
            ingredients: vec![],
            cuisine: None,
            meal_type: None,
            dietary_restrictions: vec![],
            max_time: None,
            servings: default_servings(),
            notes: None,
        }
    }
}

fn default_days() -> u32 {
    7
}

fn default_meal_types() -> Vec<MealType> {
    vec![MealType::Breakfast, MealType::Lunch, MealType::Dinner]
}

impl MealPlanRequest {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            days: default_days(),
            meal_types: default_meal_types(),
            dietary_preferences: vec![],
            allergies: vec![],
            cuisine_preferences: vec![],
            calorie_target: None,
            servings: default_servings(),
            notes: None,
        }
    }

    /// Last date covered by the plan
    pub fn end_date(&self) -> NaiveDate {
        self.start_date
            .checked_add_days(Days::new(u64::from(self.days.saturating_sub(1))))
            .unwrap_or(self.start_date)
    }

    /// Weekdays of every date in the plan, in calendar order
    pub fn requested_days(&self) -> Vec<DayOfWeek> {
        self.start_date
            .iter_days()
            .take(self.days as usize)
            .map(|date| DayOfWeek::from(chrono::Datelike::weekday(&date)))
            .collect()
    }

    /// Requested meal types, deduplicated and in daily order
    pub fn requested_meal_types(&self) -> Vec<MealType> {
        let mut meal_types = self.meal_types.clone();
        meal_types.sort();
        meal_types.dedup();
        meal_types
    }
}

fn join_or(values: &[String], empty: &str) -> String {
    if values.is_empty() {
        return empty.to_owned();
    }

    values.join(", ")
}

const RECIPE_SHAPE: &str = r#"{
  "title": string,
  "description": string,
  "cuisine": string | null,
  "meal_type": "breakfast" | "lunch" | "dinner" | "snack",
  "difficulty": "easy" | "medium" | "hard",
  "prep_time": integer minutes,
  "cook_time": integer minutes,
  "servings": integer,
  "calories": integer per serving | null,
  "ingredients": [{ "name": string, "quantity": number, "unit": string }],
  "instructions": [string],
  "dietary_tags": [string]
}"#;

const MEAL_PLAN_SHAPE: &str = r#"{
  "days": [{
    "day": "monday" | "tuesday" | "wednesday" | "thursday" | "friday" | "saturday" | "sunday",
    "meals": [{
      "meal_type": "breakfast" | "lunch" | "dinner" | "snack",
      "name": string,
      "description": string,
      "ingredients": [{ "name": string, "quantity": number, "unit": string }],
      "calories": integer | null
    }]
  }]
}"#;

const RULES: &str = "Answer with a single JSON object and nothing else. \
Quantities are decimal numbers such as 0.5, never fractions such as \"1/2\". \
Do not add fields that are not listed.";

pub fn recipe_prompt(request: &RecipeRequest) -> String {
    let meal_type = request
        .meal_type
        .map(|meal_type| meal_type.to_string())
        .unwrap_or_else(|| "any".to_owned());

    let max_time = request
        .max_time
        .map(|minutes| format!("{minutes} minutes"))
        .unwrap_or_else(|| "no limit".to_owned());

    let mut prompt = format!(
        "Create one recipe.\n\
         Available ingredients: {}\n\
         Cuisine: {}\n\
         Meal type: {meal_type}\n\
         Dietary restrictions: {}\n\
         Maximum total time: {max_time}\n\
         Servings: {}\n",
        join_or(&request.ingredients, "any"),
        request.cuisine.as_deref().unwrap_or("any"),
        join_or(&request.dietary_restrictions, "none"),
        request.servings,
    );

    if let Some(notes) = &request.notes {
        prompt.push_str(&format!("Notes: {notes}\n"));
    }

    prompt.push_str(&format!("\n{RULES}\nThe JSON object has this shape:\n{RECIPE_SHAPE}\n"));

    prompt
}

pub fn meal_plan_prompt(request: &MealPlanRequest) -> String {
    let days = request
        .requested_days()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let meal_types = request
        .requested_meal_types()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let calories = request
        .calorie_target
        .map(|target| format!("{target} kcal per day"))
        .unwrap_or_else(|| "not specified".to_owned());

    let mut prompt = format!(
        "Create a meal plan.\n\
         Days, exactly once each: {days}\n\
         Meals per day, only these: {meal_types}\n\
         Dietary preferences: {}\n\
         Allergies to avoid: {}\n\
         Preferred cuisines: {}\n\
         Calorie target: {calories}\n\
         Servings per meal: {}\n",
        join_or(&request.dietary_preferences, "none"),
        join_or(&request.allergies, "none"),
        join_or(&request.cuisine_preferences, "any"),
        request.servings,
    );

    if let Some(notes) = &request.notes {
        prompt.push_str(&format!("Notes: {notes}\n"));
    }

    prompt.push_str(&format!(
        "\n{RULES}\nThe JSON object has this shape:\n{MEAL_PLAN_SHAPE}\n"
    ));

    prompt
}
