use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::sqlite_operation;
use crate::table::{Suggestion, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Suggestion::Table)
        .col(
            ColumnDef::new(Suggestion::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(Suggestion::AuthorId).string().string_len(26))
        .col(
            ColumnDef::new(Suggestion::Title)
                .string()
                .not_null()
                .string_len(200),
        )
        .col(
            ColumnDef::new(Suggestion::Description)
                .text()
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(Suggestion::MealType)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(ColumnDef::new(Suggestion::Cuisine).string().string_len(50))
        .col(
            ColumnDef::new(Suggestion::Ingredients)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(Suggestion::Instructions)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(Suggestion::DietaryTags)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(Suggestion::Status)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(ColumnDef::new(Suggestion::ReviewNote).string().string_len(500))
        .col(ColumnDef::new(Suggestion::ReviewedBy).string().string_len(26))
        .col(ColumnDef::new(Suggestion::ReviewedAt).big_integer())
        .col(
            ColumnDef::new(Suggestion::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(Suggestion::UpdatedAt)
                .big_integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_suggestion_author")
                .from(Suggestion::Table, Suggestion::AuthorId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Suggestion::Table).to_owned()
}

sqlite_operation!(CreateTable, create_table(), drop_table());

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_suggestion_status")
        .table(Suggestion::Table)
        .col(Suggestion::Status)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_suggestion_status")
        .table(Suggestion::Table)
        .to_owned()
}

sqlite_operation!(CreateIdx1, create_idx_1(), drop_idx_1());
