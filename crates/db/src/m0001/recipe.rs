use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::sqlite_operation;
use crate::table::{Recipe, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Recipe::Table)
        .col(
            ColumnDef::new(Recipe::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(Recipe::UserId).string().string_len(26))
        .col(
            ColumnDef::new(Recipe::Title)
                .string()
                .not_null()
                .string_len(200),
        )
        .col(
            ColumnDef::new(Recipe::Description)
                .text()
                .not_null()
                .default(""),
        )
        .col(ColumnDef::new(Recipe::Cuisine).string().string_len(50))
        .col(
            ColumnDef::new(Recipe::MealType)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(
            ColumnDef::new(Recipe::Difficulty)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(
            ColumnDef::new(Recipe::PrepTime)
                .integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Recipe::CookTime)
                .integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Recipe::Servings)
                .integer()
                .not_null()
                .default(1),
        )
        .col(ColumnDef::new(Recipe::Calories).integer())
        .col(
            ColumnDef::new(Recipe::Ingredients)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(Recipe::Instructions)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(Recipe::DietaryTags)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(Recipe::IsPublic)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(Recipe::Source)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(ColumnDef::new(Recipe::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(Recipe::UpdatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_user")
                .from(Recipe::Table, Recipe::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Recipe::Table).to_owned()
}

sqlite_operation!(CreateTable, create_table(), drop_table());

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_user")
        .table(Recipe::Table)
        .col(Recipe::UserId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_user")
        .table(Recipe::Table)
        .to_owned()
}

sqlite_operation!(CreateIdx1, create_idx_1(), drop_idx_1());

fn create_idx_2() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_public_meal_type")
        .table(Recipe::Table)
        .col(Recipe::IsPublic)
        .col(Recipe::MealType)
        .to_owned()
}

fn drop_idx_2() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_public_meal_type")
        .table(Recipe::Table)
        .to_owned()
}

sqlite_operation!(CreateIdx2, create_idx_2(), drop_idx_2());
