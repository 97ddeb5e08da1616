use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use moodmeal_shared::Mood;
use moodmeal_user::PantrySort;
use sqlx::migrate::MigrateDatabase;
use time::{Date, OffsetDateTime, macros::format_description};

use crate::config::Config;

pub mod pantry;
pub mod recipe;
pub mod user;

/// moodmeal - Recipes for how you feel
#[derive(Parser)]
#[command(name = "moodmeal")]
#[command(about = "Mood-driven recipe recommendations and pantry tracking", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Import recipes from a recipe API response, or the built-in catalog
    Seed {
        /// JSON body as returned by the recipe API
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Set the current mood of a user
    Mood {
        #[arg(long)]
        user: String,
        mood: Mood,
    },
    /// Manage the pantry of a user
    Pantry {
        #[command(subcommand)]
        command: PantryCommands,
    },
    /// Browse and author recipes
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// Recommend recipes for a user
    Recommend {
        #[arg(long)]
        user: String,
        /// Mood to recommend for, defaults to the user's current mood
        #[arg(long)]
        mood: Option<Mood>,
        /// Ingredient the recipe should contain, repeatable
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
        /// Rank by what is in the pantry
        #[arg(long)]
        pantry: bool,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Cook a recipe: record it and use up matching pantry entries
    Cook {
        #[arg(long)]
        user: String,
        #[arg(long)]
        recipe: String,
    },
    /// Add or remove a favorite, or list favorites without --recipe
    Favorite {
        #[arg(long)]
        user: String,
        #[arg(long)]
        recipe: Option<String>,
        #[arg(long)]
        remove: bool,
    },
    /// What was cooked over the last seven days
    Plan {
        #[arg(long)]
        user: String,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
    },
    Show {
        #[arg(long)]
        user: String,
    },
}

#[derive(Subcommand)]
pub enum PantryCommands {
    Add {
        #[arg(long)]
        user: String,
        name: String,
        #[arg(long)]
        quantity: Option<f64>,
        #[arg(long)]
        unit: Option<String>,
        /// Expiry date as YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        expires: Option<OffsetDateTime>,
    },
    Remove {
        #[arg(long)]
        user: String,
        id: String,
    },
    /// Mark an entry as used, or unused again with --undo
    Use {
        #[arg(long)]
        user: String,
        id: String,
        #[arg(long)]
        undo: bool,
    },
    List {
        #[arg(long)]
        user: String,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = PantrySort::Name)]
        sort: PantrySort,
    },
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    List {
        #[arg(long)]
        mood: Option<Mood>,
        #[arg(long)]
        search: Option<String>,
        /// List recipes created by this user first
        #[arg(long)]
        user: Option<String>,
    },
    Create {
        #[arg(long)]
        user: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
        #[arg(long = "instruction")]
        instructions: Vec<String>,
        /// Preparation time in minutes
        #[arg(long)]
        minutes: Option<u32>,
        #[arg(long = "mood")]
        moods: Vec<Mood>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    Rate {
        #[arg(long)]
        recipe: String,
        rating: f64,
    },
    /// Common ingredient names containing the given text
    Suggest { text: String },
}

pub fn parse_date(value: &str) -> Result<OffsetDateTime, String> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map(|date| date.midnight().assume_utc())
        .map_err(|e| e.to_string())
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    crate::observability::init_observability(
        &config.observability.log_level,
        config.observability.json,
    )?;

    match cli.command {
        Commands::Migrate => migrate_command(&config).await,
        Commands::Reset => reset_command(&config).await,
        Commands::Seed { file } => seed_command(&config, file).await,
        Commands::User { command } => match command {
            UserCommands::Create { email, username } => {
                user::create(&config, email, username).await
            }
            UserCommands::Show { user } => user::show(&config, &user).await,
        },
        Commands::Mood { user, mood } => user::set_mood(&config, &user, mood).await,
        Commands::Pantry { command } => match command {
            PantryCommands::Add {
                user,
                name,
                quantity,
                unit,
                expires,
            } => pantry::add(&config, &user, name, quantity, unit, expires).await,
            PantryCommands::Remove { user, id } => pantry::remove(&config, &user, &id).await,
            PantryCommands::Use { user, id, undo } => {
                pantry::mark_used(&config, &user, &id, !undo).await
            }
            PantryCommands::List { user, search, sort } => {
                pantry::list(&config, &user, &search, sort).await
            }
        },
        Commands::Recipe { command } => match command {
            RecipeCommands::List { mood, search, user } => {
                recipe::list(&config, mood, search, user).await
            }
            RecipeCommands::Create {
                user,
                name,
                description,
                ingredients,
                instructions,
                minutes,
                moods,
                tags,
            } => {
                let input = moodmeal_recipe::CreateRecipeInput {
                    name,
                    description,
                    ingredients,
                    instructions,
                    preparation_time: minutes,
                    moods,
                    tags,
                    ..Default::default()
                };
                recipe::create(&config, &user, input).await
            }
            RecipeCommands::Rate { recipe, rating } => {
                recipe::rate(&config, &recipe, rating).await
            }
            RecipeCommands::Suggest { text } => {
                recipe::suggest(&text);
                Ok(())
            }
        },
        Commands::Recommend {
            user,
            mood,
            ingredients,
            pantry,
            limit,
        } => recipe::recommend(&config, &user, mood, ingredients, pantry, limit).await,
        Commands::Cook { user, recipe } => user::cook(&config, &user, &recipe).await,
        Commands::Favorite {
            user,
            recipe,
            remove,
        } => match recipe {
            Some(recipe) => user::toggle_favorite(&config, &user, &recipe, !remove).await,
            None => user::favorites(&config, &user).await,
        },
        Commands::Plan { user } => user::plan(&config, &user).await,
    }
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: &Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!("Database does not exist, creating: {}", config.database.url);
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    crate::db::migrate(&pool).await?;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn reset_command(config: &Config) -> Result<()> {
    tracing::info!("Resetting database...");

    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!("Dropping existing database: {}", config.database.url);
        sqlx::Sqlite::drop_database(&config.database.url).await?;
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    migrate_command(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn seed_command(config: &Config, file: Option<PathBuf>) -> Result<()> {
    let body = match file {
        Some(path) => match tokio::fs::read(&path).await {
            Ok(body) => Some(body),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot read recipe file");
                None
            }
        },
        None => None,
    };

    let state = crate::db::connect(config).await?;
    let recipes = moodmeal_recipe::Command(state)
        .import(body.as_deref(), &mut rand::rng())
        .await?;

    println!("imported {} recipes", recipes.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::try_parse_from([
            "moodmeal",
            "recommend",
            "--user",
            "u1",
            "--mood",
            "happy",
            "--ingredient",
            "eggs",
            "--ingredient",
            "tomaten",
            "--pantry",
        ])
        .unwrap();

        let Commands::Recommend {
            user,
            mood,
            ingredients,
            pantry,
            limit,
        } = cli.command
        else {
            panic!("expected recommend");
        };
        assert_eq!(user, "u1");
        assert_eq!(mood, Some(Mood::Happy));
        assert_eq!(ingredients, vec!["eggs", "tomaten"]);
        assert!(pantry);
        assert_eq!(limit, 10);
    }

    #[test]
    fn test_parse_pantry_add() {
        let cli = Cli::try_parse_from([
            "moodmeal",
            "--config",
            "moodmeal.toml",
            "pantry",
            "add",
            "--user",
            "u1",
            "Milch",
            "--quantity",
            "1",
            "--unit",
            "l",
            "--expires",
            "2026-03-01",
        ])
        .unwrap();

        assert_eq!(cli.config.as_deref(), Some("moodmeal.toml"));
        let Commands::Pantry {
            command: PantryCommands::Add { name, expires, .. },
        } = cli.command
        else {
            panic!("expected pantry add");
        };
        assert_eq!(name, "Milch");
        assert_eq!(
            expires,
            Some(time::macros::datetime!(2026-03-01 00:00 UTC))
        );
    }

    #[test]
    fn test_rejects_unknown_mood() {
        assert!(Cli::try_parse_from(["moodmeal", "mood", "--user", "u1", "hungry"]).is_err());
        assert!(parse_date("01.03.2026").is_err());
    }
}
