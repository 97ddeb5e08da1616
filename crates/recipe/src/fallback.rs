use moodmeal_shared::{
    Mood,
    recipe::{Difficulty, Recipe},
};
use serde::Deserialize;
use ulid::Ulid;

const CATALOG: &str = include_str!("../data/fallback.json");

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogRecipe {
    name: String,
    description: String,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    preparation_time: u32,
    difficulty: Difficulty,
    #[serde(rename = "imageURL")]
    image_url: Option<String>,
    suitable_for_moods: Vec<Mood>,
    tags: Vec<String>,
}

impl From<CatalogRecipe> for Recipe {
    fn from(value: CatalogRecipe) -> Self {
        Recipe {
            id: Ulid::new().to_string(),
            name: value.name,
            description: value.description,
            ingredients: value.ingredients,
            instructions: value.instructions,
            preparation_time: value.preparation_time,
            difficulty: Some(value.difficulty),
            image_url: value.image_url,
            suitable_for_moods: value.suitable_for_moods,
            tags: value.tags,
            rating: None,
            creator_id: None,
        }
    }
}

/// Built-in German recipes served when the recipe API is unavailable. Every
/// call hands out fresh ids.
pub fn catalog() -> Vec<Recipe> {
    match serde_json::from_str::<Vec<CatalogRecipe>>(CATALOG) {
        Ok(recipes) => recipes.into_iter().map(Recipe::from).collect(),
        Err(err) => {
            tracing::error!(error = %err, "fallback catalog is malformed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::VariantArray;

    use super::*;

    #[test]
    fn test_catalog_is_usable() {
        let recipes = catalog();
        assert_eq!(recipes.len(), 13);

        for recipe in &recipes {
            assert!(recipe.is_cookable(), "{} is not cookable", recipe.name);
            assert!(!recipe.suitable_for_moods.is_empty());
            assert!(!recipe.description.is_empty());
        }

        for mood in Mood::VARIANTS {
            assert!(
                recipes.iter().any(|r| r.is_suitable_for(*mood)),
                "no fallback recipe for {mood}"
            );
        }
    }

    #[test]
    fn test_catalog_ids_are_fresh() {
        let first: HashSet<_> = catalog().into_iter().map(|r| r.id).collect();
        let second: HashSet<_> = catalog().into_iter().map(|r| r.id).collect();

        assert_eq!(first.len(), 13);
        assert!(first.is_disjoint(&second));
    }

    #[test]
    fn test_known_entries() {
        let recipes = catalog();
        let bolognese = recipes
            .iter()
            .find(|r| r.name == "Spaghetti Bolognese")
            .unwrap();
        assert_eq!(bolognese.preparation_time, 45);
        assert_eq!(bolognese.difficulty(), Difficulty::Medium);
        assert_eq!(bolognese.suitable_for_moods, vec![Mood::Happy, Mood::Sad]);

        let torte = recipes
            .iter()
            .find(|r| r.name == "Schwarzwälder Kirschtorte")
            .unwrap();
        assert_eq!(torte.difficulty(), Difficulty::Hard);
    }
}
