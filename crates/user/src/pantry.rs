use moodmeal_shared::user::{PantryIngredient, User};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(EnumString, Display, VariantArray, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PantrySort {
    #[default]
    Name,
    Expiry,
    Recent,
}

/// Pantry entries whose name contains `search` (case-insensitive), ordered
/// by `sort`. Entries without an expiry date come last when sorting by
/// expiry; `Recent` lists the latest additions first.
pub fn list_pantry<'a>(user: &'a User, search: &str, sort: PantrySort) -> Vec<&'a PantryIngredient> {
    let search = search.to_lowercase();
    let mut entries: Vec<&PantryIngredient> = user
        .pantry_ingredients
        .iter()
        .filter(|i| search.is_empty() || i.name.to_lowercase().contains(&search))
        .collect();

    match sort {
        PantrySort::Name => entries.sort_by_key(|i| i.name.to_lowercase()),
        PantrySort::Expiry => entries.sort_by(|a, b| match (a.expiry_date, b.expiry_date) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
        PantrySort::Recent => entries.reverse(),
    }

    entries
}
