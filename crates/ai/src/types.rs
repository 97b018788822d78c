use mealplanner_shared::{DayOfWeek, Difficulty, MealType};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GeneratedIngredient {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, max = 100000.0))]
    pub quantity: f64,
    #[validate(length(max = 30))]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GeneratedRecipe {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(length(max = 50))]
    pub cuisine: Option<String>,
    pub meal_type: MealType,
    pub difficulty: Difficulty,
    #[validate(range(max = 1440))]
    pub prep_time: u32,
    #[validate(range(max = 1440))]
    pub cook_time: u32,
    #[validate(range(min = 1, max = 50))]
    pub servings: u32,
    #[validate(range(max = 10000))]
    pub calories: Option<u32>,
    #[validate(length(min = 1, max = 100), nested)]
    pub ingredients: Vec<GeneratedIngredient>,
    #[validate(length(min = 1, max = 100))]
    pub instructions: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub dietary_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GeneratedMeal {
    pub meal_type: MealType,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
    #[validate(length(max = 50), nested)]
    pub ingredients: Vec<GeneratedIngredient>,
    #[validate(range(max = 5000))]
    pub calories: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GeneratedDay {
    pub day: DayOfWeek,
    #[validate(length(min = 1, max = 6), nested)]
    pub meals: Vec<GeneratedMeal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GeneratedMealPlan {
    #[validate(length(min = 1, max = 7), nested)]
    pub days: Vec<GeneratedDay>,
}
