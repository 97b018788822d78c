use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GroceryItem {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub unit: String,
    #[serde(default = "default_category")]
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[serde(default)]
    pub checked: bool,
}

fn default_category() -> String {
    crate::Category::Other.to_string()
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GroceryListInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500), nested)]
    pub items: Vec<GroceryItem>,
}

impl GroceryListInput {
    pub fn normalize(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            items: self
                .items
                .into_iter()
                .map(|item| GroceryItem {
                    name: item.name.trim().to_owned(),
                    unit: item.unit.trim().to_owned(),
                    category: item.category.trim().to_owned(),
                    ..item
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenerateInput {
    #[validate(length(min = 1))]
    pub meal_plan_id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}
