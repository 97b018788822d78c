use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::sqlite_operation;
use crate::table::{Recipe, RecipeFavorite, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(RecipeFavorite::Table)
        .col(
            ColumnDef::new(RecipeFavorite::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(RecipeFavorite::RecipeId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(RecipeFavorite::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .primary_key(
            Index::create()
                .col(RecipeFavorite::UserId)
                .col(RecipeFavorite::RecipeId),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_favorite_user")
                .from(RecipeFavorite::Table, RecipeFavorite::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_favorite_recipe")
                .from(RecipeFavorite::Table, RecipeFavorite::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(RecipeFavorite::Table).to_owned()
}

sqlite_operation!(CreateTable, create_table(), drop_table());
