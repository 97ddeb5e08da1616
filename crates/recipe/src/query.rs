use std::ops::Deref;

use moodmeal_db::table;
use moodmeal_shared::{Mood, State, recipe::Recipe};
use sea_query::{Expr, ExprTrait, Func, IntoColumnRef, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(FromRow)]
pub struct RecipeRow {
    pub body: sqlx::types::Json<Recipe>,
}

#[derive(Clone)]
pub struct Query(pub State);

impl Deref for Query {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Query {
    pub async fn find(&self, id: &str) -> anyhow::Result<Option<Recipe>> {
        let statement = sea_query::Query::select()
            .column(table::Recipe::Body)
            .from(table::Recipe::Table)
            .and_where(Expr::col(table::Recipe::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.map(|r| r.body.0))
    }

    /// Recipes for the given ids, in the order of `ids`. Unknown ids are
    /// skipped.
    pub async fn find_many(&self, ids: &[String]) -> anyhow::Result<Vec<Recipe>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let statement = sea_query::Query::select()
            .column(table::Recipe::Body)
            .from(table::Recipe::Table)
            .and_where(Expr::col(table::Recipe::Id).is_in(ids.iter().cloned()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let mut recipes: Vec<Recipe> = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?
            .into_iter()
            .map(|r| r.body.0)
            .collect();

        recipes.sort_by_key(|r| ids.iter().position(|id| id == &r.id));

        Ok(recipes)
    }

    /// All stored recipes in insertion order, optionally restricted to a mood.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, mood: Option<Mood>) -> anyhow::Result<Vec<Recipe>> {
        let mut statement = sea_query::Query::select()
            .column(table::Recipe::Body)
            .from(table::Recipe::Table)
            .order_by(table::Recipe::CreatedAt, Order::Asc)
            .order_by_expr(Expr::cust("rowid"), Order::Asc)
            .to_owned();

        if let Some(mood) = mood {
            statement.and_where(table::Recipe::Id.into_column_ref().in_subquery(by_mood(mood)));
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let recipes = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(recipes.into_iter().map(|r| r.body.0).collect())
    }

    pub async fn count(&self, mood: Option<Mood>) -> anyhow::Result<u64> {
        let mut statement = sea_query::Query::select()
            .expr(Func::count(Expr::col(table::Recipe::Id)))
            .from(table::Recipe::Table)
            .to_owned();

        if let Some(mood) = mood {
            statement.and_where(table::Recipe::Id.into_column_ref().in_subquery(by_mood(mood)));
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (total,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        Ok(total.try_into().unwrap_or_default())
    }
}

fn by_mood(mood: Mood) -> SelectStatement {
    sea_query::Query::select()
        .column(table::RecipeMood::RecipeId)
        .from(table::RecipeMood::Table)
        .and_where(Expr::col(table::RecipeMood::Mood).eq(mood.to_string()))
        .to_owned()
}
