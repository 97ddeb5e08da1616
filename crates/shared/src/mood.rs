use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Tired,
    Stressed,
    Calm,
}

impl Mood {
    /// Food types suggested to a user in this mood.
    pub fn recommended_food_types(&self) -> &'static [&'static str] {
        match self {
            Mood::Happy => &["Festive", "Colorful", "Diverse"],
            Mood::Sad => &["Comforting", "Warm", "Sweet"],
            Mood::Energetic => &["Light", "Fresh", "Protein-rich"],
            Mood::Tired => &["Energizing", "Nutrient-dense", "Carb-rich"],
            Mood::Stressed => &["Calming", "Magnesium-rich", "Soothing"],
            Mood::Calm => &["Balanced", "Light", "Healthy"],
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Mood::Happy => "face.smiling",
            Mood::Sad => "cloud.rain",
            Mood::Energetic => "bolt",
            Mood::Tired => "zzz",
            Mood::Stressed => "exclamationmark.triangle",
            Mood::Calm => "leaf",
        }
    }
}
