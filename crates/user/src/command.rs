use std::ops::Deref;

use moodmeal_db::table;
use moodmeal_recipe::Recommender;
use moodmeal_shared::{
    Mood, State,
    recipe::Recipe,
    user::{PantryIngredient, User},
};
use sea_query::{OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use ulid::Ulid;
use validator::Validate;

#[derive(Validate, Clone, Debug)]
pub struct CreateInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 50))]
    pub username: String,
}

/// Whole-document user mutations. Every operation loads the user, applies
/// the change and writes the document back.
#[derive(Clone)]
pub struct Command(pub State);

impl Deref for Command {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, input: CreateInput) -> moodmeal_shared::Result<User> {
        input.validate()?;

        let query = crate::Query(self.0.clone());
        if query.find_by_email(&input.email).await?.is_some() {
            moodmeal_shared::bail!("email {} already registered", input.email);
        }

        let user = User {
            id: Ulid::new().to_string(),
            email: input.email,
            username: input.username,
            ..Default::default()
        };
        self.save(&user).await?;

        Ok(user)
    }

    #[tracing::instrument(skip_all, fields(user_id = %user.id))]
    pub async fn save(&self, user: &User) -> moodmeal_shared::Result<()> {
        let body = serde_json::to_string(user)?;

        let statement = Query::insert()
            .into_table(table::User::Table)
            .columns([table::User::Id, table::User::Email, table::User::Body])
            .values_panic([
                user.id.to_owned().into(),
                user.email.to_owned().into(),
                body.into(),
            ])
            .on_conflict(
                OnConflict::column(table::User::Id)
                    .update_columns([table::User::Email, table::User::Body])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    pub async fn set_mood(&self, id: &str, mood: Mood) -> moodmeal_shared::Result<()> {
        self.update(id, |user| user.set_mood(mood)).await
    }

    pub async fn add_to_pantry(
        &self,
        id: &str,
        ingredient: PantryIngredient,
    ) -> moodmeal_shared::Result<()> {
        self.update(id, |user| user.add_to_pantry(ingredient)).await
    }

    /// Returns false when the pantry has no entry with `ingredient_id`.
    pub async fn remove_from_pantry(
        &self,
        id: &str,
        ingredient_id: &str,
    ) -> moodmeal_shared::Result<bool> {
        self.update(id, |user| user.remove_from_pantry(ingredient_id))
            .await
    }

    /// Returns false when the pantry has no entry with `ingredient_id`.
    pub async fn mark_ingredient_used(
        &self,
        id: &str,
        ingredient_id: &str,
        is_used: bool,
    ) -> moodmeal_shared::Result<bool> {
        self.update(id, |user| user.mark_ingredient_used(ingredient_id, is_used))
            .await
    }

    pub async fn toggle_favorite(
        &self,
        id: &str,
        recipe_id: &str,
        is_favorite: bool,
    ) -> moodmeal_shared::Result<()> {
        self.update(id, |user| user.toggle_favorite(recipe_id, is_favorite))
            .await
    }

    /// Adds `recipe` to the cooking history and depletes the pantry.
    /// Returns the number of pantry entries marked used.
    #[tracing::instrument(skip(self, recipe, recommender), fields(recipe_id = %recipe.id))]
    pub async fn cook(
        &self,
        id: &str,
        recipe: &Recipe,
        recommender: &Recommender,
        now: OffsetDateTime,
    ) -> moodmeal_shared::Result<usize> {
        self.update(id, |user| crate::cook(user, recipe, recommender, now))
            .await
    }

    async fn update<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut User) -> T,
    ) -> moodmeal_shared::Result<T> {
        let Some(mut user) = crate::Query(self.0.clone()).find(id).await? else {
            moodmeal_shared::not_found!("user {id}");
        };

        let value = f(&mut user);
        self.save(&user).await?;

        Ok(value)
    }
}
