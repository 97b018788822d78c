use mealplanner_shared::{
    Difficulty, IngredientLine, MealType, normalize_tags, trim_lines, trim_optional, trim_steps,
};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

/// Where a recipe comes from
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Source {
    #[default]
    Manual,
    Ai,
    Suggestion,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecipeInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(length(max = 50))]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub meal_type: MealType,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    #[validate(range(max = 1440))]
    pub prep_time: u32,
    #[serde(default)]
    #[validate(range(max = 1440))]
    pub cook_time: u32,
    #[validate(range(min = 1, max = 50))]
    pub servings: u32,
    #[validate(range(max = 10000))]
    pub calories: Option<u32>,
    #[validate(length(min = 1, max = 100), nested)]
    pub ingredients: Vec<IngredientLine>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub instructions: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub dietary_tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
}

impl RecipeInput {
    /// Trim text fields so blank values fail validation instead of being stored empty
    pub fn normalize(self) -> Self {
        Self {
            title: self.title.trim().to_owned(),
            description: self.description.trim().to_owned(),
            cuisine: trim_optional(self.cuisine),
            ingredients: trim_lines(self.ingredients),
            instructions: trim_steps(self.instructions),
            dietary_tags: normalize_tags(self.dietary_tags),
            ..self
        }
    }
}
