use std::ops::Deref;

use moodmeal_db::table;
use moodmeal_shared::{State, user::User};
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(FromRow)]
pub struct UserRow {
    pub body: sqlx::types::Json<User>,
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
    pub async fn find(&self, id: &str) -> anyhow::Result<Option<User>> {
        self.find_by(Expr::col(table::User::Id).eq(id)).await
    }

    pub async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        self.find_by(Expr::col(table::User::Email).eq(email)).await
    }

    async fn find_by(&self, condition: Expr) -> anyhow::Result<Option<User>> {
        let statement = sea_query::Query::select()
            .column(table::User::Body)
            .from(table::User::Table)
            .and_where(condition)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.map(|r| r.body.0))
    }
}
