use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::sqlite_operation;
use crate::table::{MealPlan, MealPlanItem, Recipe};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(MealPlanItem::Table)
        .col(
            ColumnDef::new(MealPlanItem::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(MealPlanItem::MealPlanId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(MealPlanItem::DayOfWeek)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(MealPlanItem::MealType)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(ColumnDef::new(MealPlanItem::RecipeId).string().string_len(26))
        .col(
            ColumnDef::new(MealPlanItem::CustomMealName)
                .string()
                .string_len(200),
        )
        .col(
            ColumnDef::new(MealPlanItem::CustomIngredients)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(MealPlanItem::Servings)
                .integer()
                .not_null()
                .default(1),
        )
        .col(ColumnDef::new(MealPlanItem::Notes).text())
        .col(
            ColumnDef::new(MealPlanItem::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_meal_plan_item_plan")
                .from(MealPlanItem::Table, MealPlanItem::MealPlanId)
                .to(MealPlan::Table, MealPlan::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_meal_plan_item_recipe")
                .from(MealPlanItem::Table, MealPlanItem::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(MealPlanItem::Table).to_owned()
}

sqlite_operation!(CreateTable, create_table(), drop_table());

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_meal_plan_item_plan")
        .table(MealPlanItem::Table)
        .col(MealPlanItem::MealPlanId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_meal_plan_item_plan")
        .table(MealPlanItem::Table)
        .to_owned()
}

sqlite_operation!(CreateIdx1, create_idx_1(), drop_idx_1());
