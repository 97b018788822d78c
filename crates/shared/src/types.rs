use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Zero based position, monday first
    pub fn index(&self) -> usize {
        Self::VARIANTS
            .iter()
            .position(|d| d == self)
            .unwrap_or_default()
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(value: chrono::Weekday) -> Self {
        Self::VARIANTS[value.num_days_from_monday() as usize]
    }
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    #[default]
    Dinner,
    Snack,
}

impl MealType {
    pub fn index(&self) -> usize {
        Self::VARIANTS
            .iter()
            .position(|m| m == self)
            .unwrap_or_default()
    }
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// A quantified ingredient line, stored as JSON in recipes, meal plan items and suggestions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct IngredientLine {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "Must be greater than 0"))]
    pub quantity: f64,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub unit: String,
}

impl IngredientLine {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            unit: self.unit.trim().to_owned(),
            ..self
        }
    }
}

pub fn trim_lines(lines: Vec<IngredientLine>) -> Vec<IngredientLine> {
    lines.into_iter().map(IngredientLine::trimmed).collect()
}

/// Trimmed value, `None` when nothing is left
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Trimmed steps, blank ones dropped
pub fn trim_steps(steps: Vec<String>) -> Vec<String> {
    steps
        .into_iter()
        .map(|step| step.trim().to_owned())
        .filter(|step| !step.is_empty())
        .collect()
}

/// Trimmed, deduplicated, non-empty tag list
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }

    normalized
}
