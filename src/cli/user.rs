use anyhow::Result;
use moodmeal_shared::{Mood, user::User};
use time::OffsetDateTime;

use crate::config::Config;

pub(crate) async fn find_user(query: &moodmeal_user::Query, id: &str) -> Result<User> {
    query
        .find(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("user {id} not found"))
}

#[tracing::instrument(skip(config))]
pub async fn create(config: &Config, email: String, username: String) -> Result<()> {
    let state = crate::db::connect(config).await?;
    let user = moodmeal_user::Command(state)
        .create(moodmeal_user::CreateInput { email, username })
        .await?;

    tracing::info!(user_id = %user.id, "user created");
    println!("{}", user.id);

    Ok(())
}

pub async fn show(config: &Config, id: &str) -> Result<()> {
    let state = crate::db::connect(config).await?;
    let user = find_user(&moodmeal_user::Query(state), id).await?;

    println!("{} <{}>", user.username, user.email);
    match user.current_mood {
        Some(mood) => println!("mood: {} {mood}", mood.icon()),
        None => println!("mood: -"),
    }
    println!(
        "pantry: {} entries, {} available",
        user.pantry_ingredients.len(),
        user.available_pantry().count()
    );
    println!("favorites: {}", user.favorites.len());
    for cooked in user.recent_cooked(5) {
        println!("cooked: {} ({})", cooked.recipe_name, cooked.day_of_week());
    }

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn set_mood(config: &Config, id: &str, mood: Mood) -> Result<()> {
    let state = crate::db::connect(config).await?;
    moodmeal_user::Command(state).set_mood(id, mood).await?;

    println!("{} {mood}: {}", mood.icon(), mood.recommended_food_types().join(", "));

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn cook(config: &Config, id: &str, recipe_id: &str) -> Result<()> {
    let recommender = config.recommender()?;
    let state = crate::db::connect(config).await?;

    let Some(recipe) = moodmeal_recipe::Query(state.clone()).find(recipe_id).await? else {
        anyhow::bail!("recipe {recipe_id} not found");
    };

    let used = moodmeal_user::Command(state)
        .cook(id, &recipe, &recommender, OffsetDateTime::now_utc())
        .await?;

    println!("cooked {}, {used} pantry entries used", recipe.name);

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn toggle_favorite(
    config: &Config,
    id: &str,
    recipe_id: &str,
    is_favorite: bool,
) -> Result<()> {
    let state = crate::db::connect(config).await?;

    if is_favorite && moodmeal_recipe::Query(state.clone()).find(recipe_id).await?.is_none() {
        anyhow::bail!("recipe {recipe_id} not found");
    }

    moodmeal_user::Command(state)
        .toggle_favorite(id, recipe_id, is_favorite)
        .await?;

    Ok(())
}

pub async fn favorites(config: &Config, id: &str) -> Result<()> {
    let state = crate::db::connect(config).await?;
    let user = find_user(&moodmeal_user::Query(state.clone()), id).await?;

    for recipe in moodmeal_recipe::Query(state)
        .find_many(&user.favorites)
        .await?
    {
        println!("{}  {}", recipe.id, recipe.name);
    }

    Ok(())
}

pub async fn plan(config: &Config, id: &str) -> Result<()> {
    let state = crate::db::connect(config).await?;
    let user = find_user(&moodmeal_user::Query(state), id).await?;

    for day in moodmeal_user::weekly_plan(&user, OffsetDateTime::now_utc()) {
        let names: Vec<&str> = day
            .recipes
            .iter()
            .map(|c| c.recipe_name.as_str())
            .collect();
        println!("{}: {}", day.weekday, names.join(", "));
    }

    Ok(())
}
