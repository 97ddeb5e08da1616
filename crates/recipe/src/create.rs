use moodmeal_shared::{
    Mood,
    recipe::{Difficulty, Recipe},
};
use ulid::Ulid;
use validator::Validate;

use crate::import::DEFAULT_PREPARATION_TIME;

#[derive(Validate, Clone, Debug, Default)]
pub struct CreateRecipeInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub ingredients: Vec<String>,
    #[validate(length(min = 1))]
    pub instructions: Vec<String>,
    pub preparation_time: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub image_url: Option<String>,
    pub moods: Vec<Mood>,
    pub tags: Vec<String>,
}

impl CreateRecipeInput {
    /// Validates the input and builds a new recipe owned by `creator_id`.
    /// Blank ingredient, instruction and tag lines are dropped first, so a
    /// list made only of blank lines fails validation.
    pub fn into_recipe(
        mut self,
        creator_id: impl Into<String>,
    ) -> Result<Recipe, validator::ValidationErrors> {
        for lines in [&mut self.ingredients, &mut self.instructions, &mut self.tags] {
            lines.retain(|line| !line.trim().is_empty());
        }

        self.validate()?;

        let preparation_time = self.preparation_time.unwrap_or(DEFAULT_PREPARATION_TIME);

        Ok(Recipe {
            id: Ulid::new().to_string(),
            name: self.name,
            description: self.description,
            ingredients: self.ingredients,
            instructions: self.instructions,
            preparation_time,
            difficulty: Some(
                self.difficulty
                    .unwrap_or_else(|| Difficulty::from_preparation_time(preparation_time)),
            ),
            image_url: self.image_url.filter(|url| !url.is_empty()),
            suitable_for_moods: self.moods,
            tags: self.tags,
            rating: None,
            creator_id: Some(creator_id.into()),
        })
    }
}
