use anyhow::Result;
use moodmeal_shared::State;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{ConnectOptions, SqlitePool};
use sqlx_migrator::{Migrate, Plan};
use std::str::FromStr;
use std::time::Duration;
use tracing::log::LevelFilter;

use crate::config::Config;

/// Connection options with the PRAGMAs every connection of a pool gets
///
/// - WAL mode enables concurrent reads and writes
/// - busy_timeout reduces SQLITE_BUSY errors
/// - synchronous=NORMAL is safe with WAL
/// - foreign_keys must be explicitly enabled
fn connect_options(database_url: &str) -> Result<SqliteConnectOptions> {
    Ok(SqliteConnectOptions::from_str(database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000))
        .synchronous(SqliteSynchronous::Normal)
        .pragma("cache_size", "-20000")
        .foreign_keys(true)
        .pragma("temp_store", "memory")
        .log_statements(LevelFilter::Debug))
}

/// Create a read-only connection pool for concurrent reads
pub async fn create_read_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = connect_options(database_url)?.read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(max_connections, "created read-only pool");

    Ok(pool)
}

/// Create a read-write connection pool
///
/// Limited to 1 connection to avoid SQLITE_BUSY errors on writes.
pub async fn create_write_pool(database_url: &str) -> Result<SqlitePool> {
    let options = connect_options(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    tracing::info!("created read-write pool with 1 max connection");

    Ok(pool)
}

/// Create a single pool for both reads and writes
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = connect_options(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(max_connections, "created pool");

    Ok(pool)
}

/// Applies pending schema migrations.
#[tracing::instrument(skip(pool))]
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    let mut conn = pool.acquire().await?;
    moodmeal_db::migrator::<sqlx::Sqlite>()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(())
}

/// Opens the configured database, creating and migrating it when needed,
/// and returns the split read/write state used by the repositories.
pub async fn connect(config: &Config) -> Result<State> {
    let write_db = create_write_pool(&config.database.url).await?;
    migrate(&write_db).await?;

    let read_db = create_read_pool(&config.database.url, config.database.max_connections).await?;

    Ok(State { read_db, write_db })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, ObservabilityConfig, RecommendConfig, TermsConfig};

    fn database_url(dir: &temp_dir::TempDir) -> String {
        format!("sqlite:{}", dir.child("moodmeal.db").to_str().unwrap())
    }

    #[tokio::test]
    async fn test_create_pool_applies_pragmas() {
        let dir = temp_dir::TempDir::new().unwrap();
        let pool = create_pool(&database_url(&dir), 1).await.unwrap();

        let journal_mode: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(journal_mode.0, "wal");

        let foreign_keys: (i32,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(foreign_keys.0, 1);

        let temp_store: (i32,) = sqlx::query_as("PRAGMA temp_store")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(temp_store.0, 2);
    }

    #[tokio::test]
    async fn test_connect_migrates_once() {
        let dir = temp_dir::TempDir::new().unwrap();
        let config = Config {
            database: DatabaseConfig {
                url: database_url(&dir),
                max_connections: 2,
            },
            observability: ObservabilityConfig::default(),
            recommend: RecommendConfig::default(),
            terms: TermsConfig::default(),
        };

        let state = connect(&config).await.unwrap();
        migrate(&state.write_db).await.unwrap();

        let tables: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('recipe', 'recipe_mood', 'user')",
        )
        .fetch_one(&state.read_db)
        .await
        .unwrap();
        assert_eq!(tables.0, 3);
    }
}
