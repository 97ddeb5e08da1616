use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use moodmeal_recipe::{Recommender, TermTable};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
    #[serde(default)]
    pub terms: TermsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON lines instead of the console format
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecommendConfig {
    /// Rank by pantry matches when a user asks for pantry-aware results
    #[serde(default = "default_true")]
    pub use_pantry_ranking: bool,
    /// Expand German/English synonyms when ranking by pantry matches
    #[serde(default = "default_true")]
    pub bilingual_pantry: bool,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            use_pantry_ranking: true,
            bilingual_pantry: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TermsConfig {
    /// TOML or JSON term table replacing the built-in vocabulary
    #[serde(default)]
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. DATABASE_URL
    /// 2. Environment variables (MOODMEAL__DATABASE__URL, etc.)
    /// 3. Config file specified by path, CONFIG_PATH or config/default.toml
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("database.url", "sqlite:moodmeal.db")?
            .set_default("database.max_connections", 5)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // The file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MOODMEAL")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.url.trim().is_empty() {
            return Err("Database url must not be empty".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        Ok(())
    }

    /// Builds the recommender from the configured term table, falling back
    /// to the built-in vocabulary when no path is set.
    pub fn recommender(&self) -> Result<Recommender, ConfigError> {
        let terms = match &self.terms.path {
            Some(path) => TermTable::load(path)?,
            None => TermTable::default(),
        };

        Ok(Recommender::new(terms).bilingual_pantry(self.recommend.bilingual_pantry))
    }
}
