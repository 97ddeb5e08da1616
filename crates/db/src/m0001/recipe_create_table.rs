use sea_query::{ColumnDef, Expr, Table, TableCreateStatement, TableDropStatement};

use crate::table::Recipe;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Recipe::Table)
        .col(ColumnDef::new(Recipe::Id).string().not_null().primary_key())
        .col(ColumnDef::new(Recipe::Name).string().not_null())
        .col(ColumnDef::new(Recipe::CreatorId).string())
        .col(ColumnDef::new(Recipe::Body).text().not_null())
        .col(
            ColumnDef::new(Recipe::CreatedAt)
                .big_integer()
                .not_null()
                .default(Expr::cust("(unixepoch())")),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Recipe::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}
