use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, Weekday};
use ulid::Ulid;

use crate::recipe::Recipe;

/// History entry for a cooked recipe. Name and image are copied from the
/// recipe so the entry survives later changes to it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CookedRecipe {
    pub id: String,
    pub recipe_id: String,
    pub recipe_name: String,
    #[serde(rename = "imageURL", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(with = "time::serde::timestamp")]
    pub cooking_date: OffsetDateTime,
}

impl CookedRecipe {
    pub fn new(recipe: &Recipe, cooking_date: OffsetDateTime) -> Self {
        Self {
            id: Ulid::new().to_string(),
            recipe_id: recipe.id.to_owned(),
            recipe_name: recipe.name.to_owned(),
            image_url: recipe.image_url.to_owned(),
            cooking_date,
        }
    }

    pub fn day_of_week(&self) -> Weekday {
        self.cooking_date.weekday()
    }
}
