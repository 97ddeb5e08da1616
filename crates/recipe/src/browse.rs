use moodmeal_shared::recipe::Recipe;

/// Ingredient names offered while typing a pantry entry or a query.
pub const COMMON_INGREDIENTS: [&str; 31] = [
    "Kartoffeln",
    "Zwiebeln",
    "Karotten",
    "Tomaten",
    "Reis",
    "Nudeln",
    "Hühnchen",
    "Rind",
    "Schwein",
    "Lamm",
    "Tofu",
    "Kichererbsen",
    "Brokkoli",
    "Blumenkohl",
    "Spinat",
    "Knoblauch",
    "Paprika",
    "Zucchini",
    "Aubergine",
    "Pilze",
    "Eier",
    "Milch",
    "Käse",
    "Joghurt",
    "Sahne",
    "Butter",
    "Olivenöl",
    "Salz",
    "Pfeffer",
    "Zucker",
    "Mehl",
];

/// Case-insensitive substring search over name, ingredients and tags.
pub fn search<'a>(recipes: &'a [Recipe], text: &str) -> Vec<&'a Recipe> {
    let text = text.to_lowercase();
    if text.is_empty() {
        return recipes.iter().collect();
    }

    let hit = |value: &String| value.to_lowercase().contains(&text);

    recipes
        .iter()
        .filter(|r| hit(&r.name) || r.ingredients.iter().any(hit) || r.tags.iter().any(hit))
        .collect()
}

/// Recipes created by `user_id` first, then everything else. Both groups
/// keep their input order.
pub fn own_first<'a>(recipes: &'a [Recipe], user_id: &str) -> Vec<&'a Recipe> {
    let (mut own, others): (Vec<&Recipe>, Vec<&Recipe>) = recipes
        .iter()
        .partition(|r| r.creator_id.as_deref() == Some(user_id));

    own.extend(others);
    own
}

pub fn suggest_ingredients(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.to_lowercase();

    COMMON_INGREDIENTS
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&prefix))
        .collect()
}
