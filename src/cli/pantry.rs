use anyhow::Result;
use moodmeal_shared::user::PantryIngredient;
use moodmeal_user::PantrySort;
use time::OffsetDateTime;

use crate::config::Config;

#[tracing::instrument(skip(config))]
pub async fn add(
    config: &Config,
    id: &str,
    name: String,
    quantity: Option<f64>,
    unit: Option<String>,
    expires: Option<OffsetDateTime>,
) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("ingredient name must not be empty");
    }

    let mut ingredient = PantryIngredient::new(name);
    ingredient.quantity = quantity;
    ingredient.unit = unit;
    ingredient.expiry_date = expires;

    let state = crate::db::connect(config).await?;
    moodmeal_user::Command(state)
        .add_to_pantry(id, ingredient)
        .await?;

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn remove(config: &Config, id: &str, ingredient_id: &str) -> Result<()> {
    let state = crate::db::connect(config).await?;
    if !moodmeal_user::Command(state)
        .remove_from_pantry(id, ingredient_id)
        .await?
    {
        tracing::warn!(ingredient_id, "pantry entry not found");
    }

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn mark_used(config: &Config, id: &str, ingredient_id: &str, is_used: bool) -> Result<()> {
    let state = crate::db::connect(config).await?;
    if !moodmeal_user::Command(state)
        .mark_ingredient_used(id, ingredient_id, is_used)
        .await?
    {
        tracing::warn!(ingredient_id, "pantry entry not found");
    }

    Ok(())
}

pub async fn list(config: &Config, id: &str, search: &str, sort: PantrySort) -> Result<()> {
    let state = crate::db::connect(config).await?;
    let user = super::user::find_user(&moodmeal_user::Query(state), id).await?;
    let now = OffsetDateTime::now_utc();

    for entry in moodmeal_user::list_pantry(&user, search, sort) {
        let amount = match (entry.quantity, &entry.unit) {
            (Some(quantity), Some(unit)) => format!("{quantity} {unit}"),
            (Some(quantity), None) => quantity.to_string(),
            _ => String::new(),
        };
        let expiry = match entry.days_remaining(now) {
            Some(days) if days < 0 => "expired".to_string(),
            Some(days) => format!("{days}d left"),
            None => String::new(),
        };
        let used = if entry.is_used { "used" } else { "" };

        println!("{}  {}  {amount}  {expiry}  {used}", entry.id, entry.name);
    }

    Ok(())
}
