use sea_query::{
    Alias, ColumnDef, ForeignKey, ForeignKeyAction, Iden, Index, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::sqlite_operation;
use crate::table::{
    Suggestion, SuggestionInteraction, SuggestionLike, SuggestionSave, SuggestionView, User,
};

fn create_table(table: impl Iden) -> TableCreateStatement {
    let name = table.to_string();
    let table = Alias::new(name.clone());

    Table::create()
        .table(table.clone())
        .col(
            ColumnDef::new(SuggestionInteraction::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(SuggestionInteraction::SuggestionId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(SuggestionInteraction::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .primary_key(
            Index::create()
                .col(SuggestionInteraction::UserId)
                .col(SuggestionInteraction::SuggestionId),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{name}_user"))
                .from(table.clone(), SuggestionInteraction::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{name}_suggestion"))
                .from(table, SuggestionInteraction::SuggestionId)
                .to(Suggestion::Table, Suggestion::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table(table: impl Iden) -> TableDropStatement {
    Table::drop()
        .table(Alias::new(table.to_string()))
        .to_owned()
}

sqlite_operation!(
    CreateLikeTable,
    create_table(SuggestionLike::Table),
    drop_table(SuggestionLike::Table)
);

sqlite_operation!(
    CreateSaveTable,
    create_table(SuggestionSave::Table),
    drop_table(SuggestionSave::Table)
);

sqlite_operation!(
    CreateViewTable,
    create_table(SuggestionView::Table),
    drop_table(SuggestionView::Table)
);
