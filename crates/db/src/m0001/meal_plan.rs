use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::sqlite_operation;
use crate::table::{MealPlan, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(MealPlan::Table)
        .col(
            ColumnDef::new(MealPlan::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(MealPlan::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(MealPlan::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(MealPlan::StartDate)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(MealPlan::EndDate)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(ColumnDef::new(MealPlan::Notes).text())
        .col(
            ColumnDef::new(MealPlan::IsAiGenerated)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(MealPlan::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(MealPlan::UpdatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_meal_plan_user")
                .from(MealPlan::Table, MealPlan::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(MealPlan::Table).to_owned()
}

sqlite_operation!(CreateTable, create_table(), drop_table());

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_meal_plan_user_start")
        .table(MealPlan::Table)
        .col(MealPlan::UserId)
        .col(MealPlan::StartDate)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_meal_plan_user_start")
        .table(MealPlan::Table)
        .to_owned()
}

sqlite_operation!(CreateIdx1, create_idx_1(), drop_idx_1());
