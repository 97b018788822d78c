use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::sqlite_operation;
use crate::table::FoodCategory;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(FoodCategory::Table)
        .col(
            ColumnDef::new(FoodCategory::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(FoodCategory::Name)
                .string()
                .not_null()
                .string_len(50)
                .unique_key(),
        )
        .col(ColumnDef::new(FoodCategory::Description).string().string_len(500))
        .col(
            ColumnDef::new(FoodCategory::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(FoodCategory::Table).to_owned()
}

sqlite_operation!(CreateTable, create_table(), drop_table());
