use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::sqlite_operation;
use crate::table::{FoodCategory, Ingredient};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Ingredient::Table)
        .col(
            ColumnDef::new(Ingredient::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Ingredient::Name)
                .string()
                .not_null()
                .string_len(100)
                .unique_key(),
        )
        .col(ColumnDef::new(Ingredient::CategoryId).string().string_len(26))
        .col(ColumnDef::new(Ingredient::DefaultUnit).string().string_len(30))
        .col(ColumnDef::new(Ingredient::CaloriesPerUnit).double())
        .col(ColumnDef::new(Ingredient::CreatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_ingredient_category")
                .from(Ingredient::Table, Ingredient::CategoryId)
                .to(FoodCategory::Table, FoodCategory::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Ingredient::Table).to_owned()
}

sqlite_operation!(CreateTable, create_table(), drop_table());

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_ingredient_category")
        .table(Ingredient::Table)
        .col(Ingredient::CategoryId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_ingredient_category")
        .table(Ingredient::Table)
        .to_owned()
}

sqlite_operation!(CreateIdx1, create_idx_1(), drop_idx_1());
