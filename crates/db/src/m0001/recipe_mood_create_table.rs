use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Recipe, RecipeMood};

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(RecipeMood::Table)
        .col(ColumnDef::new(RecipeMood::RecipeId).string().not_null())
        .col(
            ColumnDef::new(RecipeMood::Mood)
                .string()
                .not_null()
                .string_len(15),
        )
        .foreign_key(
            ForeignKey::create()
                .from(RecipeMood::Table, RecipeMood::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(RecipeMood::Table).to_owned()
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
