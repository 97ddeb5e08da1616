mod cooked;
mod pantry;

pub use cooked::*;
pub use pantry::*;

use serde::{Deserialize, Deserializer, Serialize};

use crate::Mood;

/// User document. Owns its pantry and cooking history; every mutation is
/// persisted by writing the whole document back.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub favorites: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub current_mood: Option<Mood>,
    #[serde(default)]
    pub pantry_ingredients: Vec<PantryIngredient>,
    #[serde(default)]
    pub cooked_recipes: Vec<CookedRecipe>,
}

// Older documents store a missing mood as "".
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<Mood>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(mood) => mood
            .parse::<Mood>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl User {
    pub fn set_mood(&mut self, mood: Mood) {
        self.current_mood = Some(mood);
    }

    /// Adds an ingredient, replacing an existing entry with the same name
    /// (case-insensitive) in place.
    pub fn add_to_pantry(&mut self, ingredient: PantryIngredient) {
        match self
            .pantry_ingredients
            .iter_mut()
            .find(|existing| existing.same_name(&ingredient.name))
        {
            Some(existing) => *existing = ingredient,
            None => self.pantry_ingredients.push(ingredient),
        }
    }

    /// Returns false when no entry has this id.
    pub fn remove_from_pantry(&mut self, ingredient_id: &str) -> bool {
        let len = self.pantry_ingredients.len();
        self.pantry_ingredients.retain(|i| i.id != ingredient_id);

        len != self.pantry_ingredients.len()
    }

    /// Returns false when no entry has this id.
    pub fn mark_ingredient_used(&mut self, ingredient_id: &str, is_used: bool) -> bool {
        match self
            .pantry_ingredients
            .iter_mut()
            .find(|i| i.id == ingredient_id)
        {
            Some(ingredient) => {
                ingredient.is_used = is_used;
                true
            }
            None => false,
        }
    }

    pub fn available_pantry(&self) -> impl Iterator<Item = &PantryIngredient> {
        self.pantry_ingredients.iter().filter(|i| !i.is_used)
    }

    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.favorites.iter().any(|id| id == recipe_id)
    }

    pub fn toggle_favorite(&mut self, recipe_id: &str, is_favorite: bool) {
        if is_favorite {
            if !self.is_favorite(recipe_id) {
                self.favorites.push(recipe_id.to_owned());
            }
        } else {
            self.favorites.retain(|id| id != recipe_id);
        }
    }

    /// Appends a history entry, keeping the newest entry first.
    pub fn record_cooked(&mut self, cooked: CookedRecipe) {
        self.cooked_recipes.push(cooked);
        self.cooked_recipes
            .sort_by(|a, b| b.cooking_date.cmp(&a.cooking_date));
    }

    pub fn recent_cooked(&self, count: usize) -> &[CookedRecipe] {
        &self.cooked_recipes[..count.min(self.cooked_recipes.len())]
    }
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime};

    use super::*;
    use crate::recipe::Recipe;

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: id.to_owned(),
            name: format!("Recipe {id}"),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_to_pantry_replaces_same_name() {
        let mut user = User::default();
        user.add_to_pantry(PantryIngredient::new("Eier").quantity(6.0, "Stück"));
        user.add_to_pantry(PantryIngredient::new("Milch"));
        user.add_to_pantry(PantryIngredient::new("eier").quantity(10.0, "Stück"));

        assert_eq!(user.pantry_ingredients.len(), 2);
        assert_eq!(user.pantry_ingredients[0].name, "eier");
        assert_eq!(user.pantry_ingredients[0].quantity, Some(10.0));
        assert_eq!(user.pantry_ingredients[1].name, "Milch");
    }

    #[test]
    fn test_mark_and_remove_unknown_id() {
        let mut user = User::default();
        user.add_to_pantry(PantryIngredient::new("Reis"));
        let id = user.pantry_ingredients[0].id.to_owned();

        assert!(!user.mark_ingredient_used("missing", true));
        assert!(user.mark_ingredient_used(&id, true));
        assert_eq!(user.available_pantry().count(), 0);

        assert!(!user.remove_from_pantry("missing"));
        assert!(user.remove_from_pantry(&id));
        assert!(user.pantry_ingredients.is_empty());
    }

    #[test]
    fn test_favorites_have_set_semantics() {
        let mut user = User::default();
        user.toggle_favorite("a", true);
        user.toggle_favorite("a", true);
        user.toggle_favorite("b", true);
        assert_eq!(user.favorites, vec!["a", "b"]);

        user.toggle_favorite("a", false);
        user.toggle_favorite("c", false);
        assert_eq!(user.favorites, vec!["b"]);
    }

    #[test]
    fn test_cooked_history_newest_first() {
        let now = OffsetDateTime::now_utc();
        let mut user = User::default();
        user.record_cooked(CookedRecipe::new(&recipe("old"), now - Duration::days(2)));
        user.record_cooked(CookedRecipe::new(&recipe("new"), now));
        user.record_cooked(CookedRecipe::new(&recipe("mid"), now - Duration::days(1)));

        let ids: Vec<_> = user
            .cooked_recipes
            .iter()
            .map(|c| c.recipe_id.as_str())
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
        assert_eq!(user.recent_cooked(2).len(), 2);
        assert_eq!(user.recent_cooked(10).len(), 3);
    }

    #[test]
    fn test_empty_mood_reads_as_none() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","email":"a@b.c","username":"anna","currentMood":""}"#,
        )
        .unwrap();
        assert_eq!(user.current_mood, None);

        let user: User = serde_json::from_str(
            r#"{"id":"u1","email":"a@b.c","username":"anna","currentMood":"Calm"}"#,
        )
        .unwrap();
        assert_eq!(user.current_mood, Some(Mood::Calm));
    }
}
