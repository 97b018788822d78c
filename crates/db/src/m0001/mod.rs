mod food_category;
mod grocery_list;
mod ingredient;
mod meal_plan;
mod meal_plan_item;
mod recipe;
mod recipe_favorite;
mod suggestion;
mod suggestion_interaction;
mod user;
mod user_profile;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "mealplanner",
    "m0001",
    vec_box![],
    vec_box![
        user::CreateTable,
        user::CreateIdx1,
        user_profile::CreateTable,
        food_category::CreateTable,
        ingredient::CreateTable,
        ingredient::CreateIdx1,
        recipe::CreateTable,
        recipe::CreateIdx1,
        recipe::CreateIdx2,
        recipe_favorite::CreateTable,
        meal_plan::CreateTable,
        meal_plan::CreateIdx1,
        meal_plan_item::CreateTable,
        meal_plan_item::CreateIdx1,
        suggestion::CreateTable,
        suggestion::CreateIdx1,
        suggestion_interaction::CreateLikeTable,
        suggestion_interaction::CreateSaveTable,
        suggestion_interaction::CreateViewTable,
        grocery_list::CreateTable,
        grocery_list::CreateIdx1
    ]
);
