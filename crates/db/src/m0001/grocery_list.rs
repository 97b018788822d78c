use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::sqlite_operation;
use crate::table::{GroceryList, MealPlan, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(GroceryList::Table)
        .col(
            ColumnDef::new(GroceryList::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(GroceryList::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(GroceryList::MealPlanId).string().string_len(26))
        .col(
            ColumnDef::new(GroceryList::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(GroceryList::Items)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(GroceryList::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(GroceryList::UpdatedAt)
                .big_integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_grocery_list_user")
                .from(GroceryList::Table, GroceryList::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_grocery_list_meal_plan")
                .from(GroceryList::Table, GroceryList::MealPlanId)
                .to(MealPlan::Table, MealPlan::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(GroceryList::Table).to_owned()
}

sqlite_operation!(CreateTable, create_table(), drop_table());

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_grocery_list_user")
        .table(GroceryList::Table)
        .col(GroceryList::UserId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_grocery_list_user")
        .table(GroceryList::Table)
        .to_owned()
}

sqlite_operation!(CreateIdx1, create_idx_1(), drop_idx_1());
