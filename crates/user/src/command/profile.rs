use mealplanner_db::table;
use mealplanner_shared::{Error, normalize_tags, timestamp};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use crate::CookingSkill;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub allergies: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub cuisine_preferences: Vec<String>,
    #[serde(default = "default_household_size")]
    #[validate(range(min = 1, max = 20))]
    pub household_size: u8,
    #[serde(default)]
    pub cooking_skill: CookingSkill,
    #[validate(range(min = 500, max = 10000))]
    pub daily_calorie_target: Option<u32>,
}

fn default_household_size() -> u8 {
    1
}

impl super::Command {
    pub async fn update_profile(
        &self,
        user_id: impl Into<String>,
        input: ProfileInput,
    ) -> mealplanner_shared::Result<()> {
        input.validate()?;

        let user_id = user_id.into();
        let now = timestamp();

        let dietary_preferences =
            serde_json::to_string(&normalize_tags(input.dietary_preferences))?;
        let allergies = serde_json::to_string(&normalize_tags(input.allergies))?;
        let cuisine_preferences =
            serde_json::to_string(&normalize_tags(input.cuisine_preferences))?;

        let mut tx = self.0.begin().await?;

        if let Some(name) = input.name {
            let (sql, values) = Query::update()
                .table(table::User::Table)
                .values([
                    (table::User::Name, name.trim().into()),
                    (table::User::UpdatedAt, now.into()),
                ])
                .and_where(Expr::col(table::User::Id).eq(&user_id))
                .build_sqlx(SqliteQueryBuilder);

            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        let (sql, values) = Query::update()
            .table(table::UserProfile::Table)
            .values([
                (
                    table::UserProfile::DietaryPreferences,
                    dietary_preferences.into(),
                ),
                (table::UserProfile::Allergies, allergies.into()),
                (
                    table::UserProfile::CuisinePreferences,
                    cuisine_preferences.into(),
                ),
                (
                    table::UserProfile::HouseholdSize,
                    i64::from(input.household_size).into(),
                ),
                (
                    table::UserProfile::CookingSkill,
                    input.cooking_skill.to_string().into(),
                ),
                (
                    table::UserProfile::DailyCalorieTarget,
                    input.daily_calorie_target.map(i64::from).into(),
                ),
                (table::UserProfile::UpdatedAt, now.into()),
            ])
            .and_where(Expr::col(table::UserProfile::UserId).eq(&user_id))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("Profile"));
        }

        tx.commit().await?;

        Ok(())
    }
}
