use anyhow::Result;
use moodmeal_recipe::{CreateRecipeInput, RecommendQuery};
use moodmeal_shared::{Mood, recipe::Recipe, user::PantryIngredient};

use crate::config::Config;

fn print_recipe(recipe: &Recipe) {
    let moods: Vec<String> = recipe
        .suitable_for_moods
        .iter()
        .map(|m| m.icon().to_string())
        .collect();

    println!(
        "{}  {}  {} min  {}  {}",
        recipe.id,
        recipe.name,
        recipe.preparation_time,
        recipe.difficulty(),
        moods.join("")
    );
}

pub async fn list(
    config: &Config,
    mood: Option<Mood>,
    search: Option<String>,
    user: Option<String>,
) -> Result<()> {
    let state = crate::db::connect(config).await?;
    let recipes = moodmeal_recipe::Query(state).list(mood).await?;

    let found = moodmeal_recipe::search(&recipes, search.as_deref().unwrap_or_default());
    let found: Vec<Recipe> = found.into_iter().cloned().collect();
    let ordered = match &user {
        Some(user) => moodmeal_recipe::own_first(&found, user),
        None => found.iter().collect(),
    };

    for recipe in ordered {
        print_recipe(recipe);
    }

    Ok(())
}

#[tracing::instrument(skip(config, input))]
pub async fn create(config: &Config, user: &str, input: CreateRecipeInput) -> Result<()> {
    let state = crate::db::connect(config).await?;
    super::user::find_user(&moodmeal_user::Query(state.clone()), user).await?;

    let recipe = moodmeal_recipe::Command(state).create(input, user).await?;

    tracing::info!(recipe_id = %recipe.id, "recipe created");
    println!("{}", recipe.id);

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn rate(config: &Config, id: &str, rating: f64) -> Result<()> {
    let state = crate::db::connect(config).await?;
    let recipe = moodmeal_recipe::Command(state).rate(id, rating).await?;

    println!("{} rated {rating}", recipe.name);

    Ok(())
}

pub fn suggest(text: &str) {
    for name in moodmeal_recipe::suggest_ingredients(text) {
        println!("{name}");
    }
}

#[tracing::instrument(skip(config))]
pub async fn recommend(
    config: &Config,
    user: &str,
    mood: Option<Mood>,
    ingredients: Vec<String>,
    use_pantry: bool,
    limit: usize,
) -> Result<()> {
    let recommender = config.recommender()?;
    let state = crate::db::connect(config).await?;
    let user = super::user::find_user(&moodmeal_user::Query(state.clone()), user).await?;

    let mood = mood.or(user.current_mood);
    let candidates = moodmeal_recipe::Query(state).list(mood).await?;

    let pantry: Vec<PantryIngredient> = if use_pantry {
        user.available_pantry().cloned().collect()
    } else {
        Vec::new()
    };

    let query = RecommendQuery {
        mood,
        ingredients: &ingredients,
        pantry: &pantry,
        use_pantry_ranking: use_pantry && config.recommend.use_pantry_ranking,
    };

    let recipes = recommender.recommend(&candidates, &query);
    if recipes.is_empty() {
        println!("no matching recipes");
        return Ok(());
    }

    for recipe in recipes.iter().take(limit) {
        let explained = recommender.explain(recipe, &query);
        let favorite = if user.is_favorite(&recipe.id) { "*" } else { " " };

        print!("{favorite}");
        print_recipe(recipe);

        if !ingredients.is_empty() {
            println!("    matches {} of {} ingredients", explained.matched_terms, ingredients.len());
        }
        if use_pantry {
            println!(
                "    {} from pantry, missing: {}",
                explained.pantry_matches,
                explained.missing.join(", ")
            );
        }
    }

    Ok(())
}
