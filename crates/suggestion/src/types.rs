use mealplanner_shared::{
    IngredientLine, MealType, normalize_tags, trim_lines, trim_optional, trim_steps,
};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

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
pub enum Status {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SuggestionInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[serde(default)]
    pub meal_type: MealType,
    #[validate(length(max = 50))]
    pub cuisine: Option<String>,
    #[validate(length(min = 1, max = 100), nested)]
    pub ingredients: Vec<IngredientLine>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub instructions: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub dietary_tags: Vec<String>,
}

impl SuggestionInput {
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

/// Outcome of an admin review
#[derive(Debug, Clone)]
pub enum Decision {
    Approve {
        publish_recipe: bool,
        note: Option<String>,
    },
    Reject {
        reason: String,
    },
}

/// The three per-user interaction tables share one layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interaction {
    Like,
    Save,
    View,
}

impl Interaction {
    pub fn table(&self) -> &'static str {
        match self {
            Interaction::Like => "suggestion_like",
            Interaction::Save => "suggestion_save",
            Interaction::View => "suggestion_view",
        }
    }
}
