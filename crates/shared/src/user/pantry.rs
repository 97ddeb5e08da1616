use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use ulid::Ulid;

/// Units offered when adding a pantry ingredient.
pub const UNITS: [&str; 9] = ["g", "kg", "ml", "l", "Stück", "TL", "EL", "Tasse", "Prise"];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PantryIngredient {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub expiry_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub is_used: bool,
}

impl PantryIngredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            name: name.into(),
            quantity: None,
            unit: None,
            expiry_date: None,
            is_used: false,
        }
    }

    pub fn quantity(mut self, quantity: f64, unit: impl Into<String>) -> Self {
        self.quantity = Some(quantity);
        self.unit = Some(unit.into());
        self
    }

    pub fn expires_at(mut self, date: OffsetDateTime) -> Self {
        self.expiry_date = Some(date);
        self
    }

    /// Whole days until expiry, negative once expired.
    pub fn days_remaining(&self, now: OffsetDateTime) -> Option<i64> {
        self.expiry_date.map(|date| (date - now).whole_days())
    }

    pub(crate) fn same_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
