use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement, TableDropStatement,
};

use crate::sqlite_operation;
use crate::table::{User, UserProfile};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(UserProfile::Table)
        .col(
            ColumnDef::new(UserProfile::UserId)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(UserProfile::DietaryPreferences)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(UserProfile::Allergies)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(UserProfile::CuisinePreferences)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(UserProfile::HouseholdSize)
                .integer()
                .not_null()
                .default(1),
        )
        .col(
            ColumnDef::new(UserProfile::CookingSkill)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(ColumnDef::new(UserProfile::DailyCalorieTarget).integer())
        .col(
            ColumnDef::new(UserProfile::UpdatedAt)
                .big_integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_user_profile_user")
                .from(UserProfile::Table, UserProfile::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(UserProfile::Table).to_owned()
}

sqlite_operation!(CreateTable, create_table(), drop_table());
