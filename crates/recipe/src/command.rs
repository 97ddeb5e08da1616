use std::ops::Deref;

use moodmeal_db::table;
use moodmeal_shared::{Mood, State, recipe::Recipe};
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqliteConnection;

use crate::{CreateRecipeInput, import_or_fallback};

#[derive(Clone)]
pub struct Command(pub State);

impl Deref for Command {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    #[tracing::instrument(skip_all, fields(recipe_id = %recipe.id))]
    pub async fn save(&self, recipe: &Recipe) -> moodmeal_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;
        upsert(&mut tx, recipe).await?;
        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, fields(count = recipes.len()))]
    pub async fn save_all(&self, recipes: &[Recipe]) -> moodmeal_shared::Result<usize> {
        let mut tx = self.write_db.begin().await?;
        for recipe in recipes {
            upsert(&mut tx, recipe).await?;
        }
        tx.commit().await?;

        Ok(recipes.len())
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreateRecipeInput,
        creator_id: &str,
    ) -> moodmeal_shared::Result<Recipe> {
        let recipe = input.into_recipe(creator_id)?;
        self.save(&recipe).await?;

        Ok(recipe)
    }

    /// Stores the recipes of an API response body, or the fallback catalog
    /// when the body is missing or unusable.
    pub async fn import<R: rand::Rng + ?Sized>(
        &self,
        body: Option<&[u8]>,
        rng: &mut R,
    ) -> moodmeal_shared::Result<Vec<Recipe>> {
        let recipes = import_or_fallback(body, rng);
        self.save_all(&recipes).await?;

        Ok(recipes)
    }

    #[tracing::instrument(skip(self))]
    pub async fn rate(&self, id: &str, rating: f64) -> moodmeal_shared::Result<Recipe> {
        if !(0.0..=5.0).contains(&rating) {
            moodmeal_shared::bail!("rating must be between 0 and 5, got {rating}");
        }

        let Some(mut recipe) = crate::Query(self.0.clone()).find(id).await? else {
            moodmeal_shared::not_found!("recipe {id}");
        };

        recipe.rating = Some(rating);
        self.save(&recipe).await?;

        Ok(recipe)
    }
}

async fn upsert(conn: &mut SqliteConnection, recipe: &Recipe) -> moodmeal_shared::Result<()> {
    let body = serde_json::to_string(recipe)?;

    let statement = Query::insert()
        .into_table(table::Recipe::Table)
        .columns([
            table::Recipe::Id,
            table::Recipe::Name,
            table::Recipe::CreatorId,
            table::Recipe::Body,
        ])
        .values_panic([
            recipe.id.to_owned().into(),
            recipe.name.to_owned().into(),
            recipe.creator_id.to_owned().into(),
            body.into(),
        ])
        .on_conflict(
            OnConflict::column(table::Recipe::Id)
                .update_columns([
                    table::Recipe::Name,
                    table::Recipe::CreatorId,
                    table::Recipe::Body,
                ])
                .to_owned(),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let (sql, values) = Query::delete()
        .from_table(table::RecipeMood::Table)
        .and_where(Expr::col(table::RecipeMood::RecipeId).eq(&recipe.id))
        .build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let mut moods: Vec<Mood> = Vec::with_capacity(recipe.suitable_for_moods.len());
    for mood in &recipe.suitable_for_moods {
        if !moods.contains(mood) {
            moods.push(*mood);
        }
    }

    if moods.is_empty() {
        return Ok(());
    }

    let mut statement = Query::insert()
        .into_table(table::RecipeMood::Table)
        .columns([table::RecipeMood::RecipeId, table::RecipeMood::Mood])
        .to_owned();

    for mood in moods {
        statement.values_panic([recipe.id.to_owned().into(), mood.to_string().into()]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}
