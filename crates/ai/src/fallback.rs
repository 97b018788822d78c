//! Fixed answers used whenever generation fails

use mealplanner_shared::{Difficulty, MealType};

use crate::{
    GeneratedDay, GeneratedIngredient, GeneratedMeal, GeneratedMealPlan, GeneratedRecipe,
    MealPlanRequest,
};

fn ingredient(name: &str, quantity: f64, unit: &str) -> GeneratedIngredient {
    GeneratedIngredient {
        name: name.to_owned(),
        quantity,
        unit: unit.to_owned(),
    }
}

pub fn recipe() -> GeneratedRecipe {
    GeneratedRecipe {
        title: "Simple Vegetable Stir-Fry".to_owned(),
        description: "A quick stir-fry of mixed vegetables served over rice.".to_owned(),
        cuisine: Some("Asian".to_owned()),
        meal_type: MealType::Dinner,
        difficulty: Difficulty::Easy,
        prep_time: 10,
        cook_time: 15,
        servings: 2,
        calories: Some(420),
        ingredients: vec![
            ingredient("rice", 150.0, "g"),
            ingredient("broccoli", 200.0, "g"),
            ingredient("carrot", 1.0, "piece"),
            ingredient("bell pepper", 1.0, "piece"),
            ingredient("soy sauce", 2.0, "tbsp"),
            ingredient("vegetable oil", 1.0, "tbsp"),
        ],
        instructions: vec![
            "Cook the rice according to the package.".to_owned(),
            "Slice the vegetables into bite sized pieces.".to_owned(),
            "Stir-fry the vegetables in hot oil for 5 minutes.".to_owned(),
            "Add the soy sauce and serve over the rice.".to_owned(),
        ],
        dietary_tags: vec!["vegetarian".to_owned()],
    }
}

/// (name, ingredients, calories) rotated per day
type Menu = &'static [(&'static str, &'static [(&'static str, f64, &'static str)], u32)];

const BREAKFASTS: Menu = &[
    (
        "Oatmeal with banana",
        &[("oat", 80.0, "g"), ("banana", 1.0, "piece"), ("milk", 200.0, "ml")],
        350,
    ),
    ("Scrambled eggs on toast", &[("egg", 2.0, "piece"), ("bread", 2.0, "piece")], 380),
    ("Greek yogurt with berries", &[("greek yogurt", 200.0, "g"), ("blueberry", 80.0, "g")], 260),
];

const LUNCHES: Menu = &[
    (
        "Chicken salad",
        &[("chicken breast", 150.0, "g"), ("lettuce", 1.0, "piece"), ("tomato", 1.0, "piece")],
        450,
    ),
    (
        "Lentil soup",
        &[("lentil", 100.0, "g"), ("carrot", 1.0, "piece"), ("onion", 1.0, "piece")],
        400,
    ),
    (
        "Tuna wrap",
        &[("tuna", 120.0, "g"), ("tortilla", 1.0, "piece"), ("cucumber", 0.5, "piece")],
        420,
    ),
];

const DINNERS: Menu = &[
    ("Baked salmon with potatoes", &[("salmon", 150.0, "g"), ("potato", 200.0, "g")], 550),
    ("Vegetable stir-fry with rice", &[("rice", 150.0, "g"), ("broccoli", 200.0, "g")], 480),
    (
        "Spaghetti with tomato sauce",
        &[("spaghetti", 120.0, "g"), ("tomato sauce", 200.0, "ml")],
        520,
    ),
];

const SNACKS: Menu = &[
    ("Apple with peanut butter", &[("apple", 1.0, "piece"), ("peanut butter", 1.0, "tbsp")], 200),
    ("Hummus and carrots", &[("chickpea", 60.0, "g"), ("carrot", 1.0, "piece")], 180),
];

fn menu(meal_type: MealType) -> Menu {
    match meal_type {
        MealType::Breakfast => BREAKFASTS,
        MealType::Lunch => LUNCHES,
        MealType::Dinner => DINNERS,
        MealType::Snack => SNACKS,
    }
}

/// One meal per requested (day, meal type), picked from a fixed menu
pub fn meal_plan(request: &MealPlanRequest) -> GeneratedMealPlan {
    let meal_types = request.requested_meal_types();

    let days = request
        .requested_days()
        .into_iter()
        .enumerate()
        .map(|(position, day)| GeneratedDay {
            day,
            meals: meal_types
                .iter()
                .map(|meal_type| {
                    let dishes = menu(*meal_type);
                    let (name, ingredients, calories) = dishes[position % dishes.len()];

                    GeneratedMeal {
                        meal_type: *meal_type,
                        name: name.to_owned(),
                        description: String::new(),
                        ingredients: ingredients
                            .iter()
                            .map(|(name, quantity, unit)| ingredient(name, *quantity, unit))
                            .collect(),
                        calories: Some(calories),
                    }
                })
                .collect(),
        })
        .collect();

    GeneratedMealPlan { days }
}
