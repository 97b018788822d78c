use sea_query::Iden;

#[derive(Iden, Clone, Copy)]
pub enum User {
    Table,
    Id,
    Email,
    PasswordHash,
    Name,
    Role,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum UserProfile {
    Table,
    UserId,
    DietaryPreferences,
    Allergies,
    CuisinePreferences,
    HouseholdSize,
    CookingSkill,
    DailyCalorieTarget,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum FoodCategory {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Ingredient {
    Table,
    Id,
    Name,
    CategoryId,
    DefaultUnit,
    CaloriesPerUnit,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Recipe {
    Table,
    Id,
    UserId,
    Title,
    Description,
    Cuisine,
    MealType,
    Difficulty,
    PrepTime,
    CookTime,
    Servings,
    Calories,
    Ingredients,
    Instructions,
    DietaryTags,
    IsPublic,
    Source,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum RecipeFavorite {
    Table,
    UserId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum MealPlan {
    Table,
    Id,
    UserId,
    Name,
    StartDate,
    EndDate,
    Notes,
    IsAiGenerated,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum MealPlanItem {
    Table,
    Id,
    MealPlanId,
    DayOfWeek,
    MealType,
    RecipeId,
    CustomMealName,
    CustomIngredients,
    Servings,
    Notes,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Suggestion {
    Table,
    Id,
    AuthorId,
    Title,
    Description,
    MealType,
    Cuisine,
    Ingredients,
    Instructions,
    DietaryTags,
    Status,
    ReviewNote,
    ReviewedBy,
    ReviewedAt,
    CreatedAt,
    UpdatedAt,
}

/// Shared column layout of the like, save and view interaction tables
#[derive(Iden, Clone, Copy)]
pub enum SuggestionInteraction {
    UserId,
    SuggestionId,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum SuggestionLike {
    Table,
}

#[derive(Iden, Clone, Copy)]
pub enum SuggestionSave {
    Table,
}

#[derive(Iden, Clone, Copy)]
pub enum SuggestionView {
    Table,
}

#[derive(Iden, Clone, Copy)]
pub enum GroceryList {
    Table,
    Id,
    UserId,
    MealPlanId,
    Name,
    Items,
    CreatedAt,
    UpdatedAt,
}
