use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::Mood;

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Under 30 minutes is easy, under an hour medium, anything longer hard.
    pub fn from_preparation_time(minutes: u32) -> Self {
        match minutes {
            0..30 => Difficulty::Easy,
            30..60 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }
}

/// Recipe document as stored in the recipe collection.
///
/// Field names follow the document schema (`preparationTime`, `imageURL`,
/// `suitableForMoods`, `creatorId`, ...) so stored documents round-trip.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub preparation_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(rename = "imageURL", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub suitable_for_moods: Vec<Mood>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
}

impl Recipe {
    /// Explicit difficulty, or the one derived from the preparation time.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
            .unwrap_or_else(|| Difficulty::from_preparation_time(self.preparation_time))
    }

    pub fn is_suitable_for(&self, mood: Mood) -> bool {
        self.suitable_for_moods.contains(&mood)
    }

    /// A recipe can be cooked only with at least one ingredient and one step.
    pub fn is_cookable(&self) -> bool {
        !self.ingredients.is_empty() && !self.instructions.is_empty()
    }
}
