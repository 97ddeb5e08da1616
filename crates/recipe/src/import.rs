use moodmeal_shared::{
    Mood,
    recipe::{Difficulty, Recipe},
};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use strum::VariantArray;
use ulid::Ulid;

pub const DEFAULT_DESCRIPTION: &str = "Ein leckeres deutsches Rezept";
pub const DEFAULT_PREPARATION_TIME: u32 = 30;

const MOOD_KEYWORDS: [(&[&str], &[Mood]); 5] = [
    (&["leicht", "frisch"], &[Mood::Energetic, Mood::Calm]),
    (&["fest", "party"], &[Mood::Happy]),
    (&["suppe", "eintopf", "comfort"], &[Mood::Sad]),
    (&["frühstück", "snack", "energie"], &[Mood::Tired]),
    (&["salat", "gesund", "beruhigend"], &[Mood::Stressed]),
];

/// Recipe as listed by the external recipe search API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRecipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub prep_time: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ApiResponse {
    List(Vec<ApiRecipe>),
    Wrapped { recipes: Vec<ApiRecipe> },
}

/// Accepts either a bare array of recipes or `{ "recipes": [...] }`.
pub fn parse_response(body: &[u8]) -> serde_json::Result<Vec<ApiRecipe>> {
    Ok(match serde_json::from_slice(body)? {
        ApiResponse::List(recipes) => recipes,
        ApiResponse::Wrapped { recipes } => recipes,
    })
}

impl ApiRecipe {
    pub fn into_recipe<R: rand::Rng + ?Sized>(self, rng: &mut R) -> Recipe {
        let moods = self.moods(rng);
        let preparation_time = self
            .prep_time
            .map(|t| u32::try_from(t.max(0)).unwrap_or(u32::MAX))
            .unwrap_or(DEFAULT_PREPARATION_TIME);

        Recipe {
            id: if self.id.is_empty() {
                Ulid::new().to_string()
            } else {
                self.id
            },
            name: self.title,
            description: self
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_owned()),
            ingredients: self.ingredients,
            instructions: self.instructions,
            preparation_time,
            difficulty: Some(Difficulty::from_preparation_time(preparation_time)),
            image_url: self.image_url,
            suitable_for_moods: moods,
            tags: self.tags.or(self.categories).unwrap_or_default(),
            rating: None,
            creator_id: None,
        }
    }

    fn moods<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Vec<Mood> {
        let labels: Vec<&String> = self
            .categories
            .iter()
            .flatten()
            .chain(self.tags.iter().flatten())
            .collect();

        moods_for(labels, rng)
    }
}

/// Moods suggested by category and tag labels. Every keyword group with a
/// hit contributes its moods; without any hit a single mood is drawn from
/// `rng`.
pub fn moods_for<I, S, R>(labels: I, rng: &mut R) -> Vec<Mood>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: rand::Rng + ?Sized,
{
    let labels: Vec<String> = labels
        .into_iter()
        .map(|l| l.as_ref().to_lowercase())
        .collect();

    let mut moods = Vec::new();
    for (keywords, group) in MOOD_KEYWORDS {
        let hit = labels
            .iter()
            .any(|label| keywords.iter().any(|k| label.contains(k)));

        if !hit {
            continue;
        }

        for mood in group {
            if !moods.contains(mood) {
                moods.push(*mood);
            }
        }
    }

    if moods.is_empty() {
        moods.extend(Mood::VARIANTS.choose(rng).copied());
    }

    moods
}

/// Converts an API response body into recipes. A missing, malformed or
/// empty body yields the built-in catalog, so the result is never empty.
pub fn import_or_fallback<R: rand::Rng + ?Sized>(body: Option<&[u8]>, rng: &mut R) -> Vec<Recipe> {
    let parsed = match body.map(parse_response) {
        Some(Ok(recipes)) => recipes,
        Some(Err(err)) => {
            tracing::warn!(error = %err, "failed to parse recipe api response");
            Vec::new()
        }
        None => {
            tracing::warn!("no recipe api response");
            Vec::new()
        }
    };

    if parsed.is_empty() {
        let recipes = crate::fallback::catalog();
        tracing::info!(count = recipes.len(), "using fallback recipes");

        return recipes;
    }

    tracing::info!(count = parsed.len(), "recipes imported");

    parsed.into_iter().map(|r| r.into_recipe(rng)).collect()
}
