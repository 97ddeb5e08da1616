use moodmeal_shared::{
    Mood,
    recipe::Recipe,
    user::PantryIngredient,
};

use crate::{
    TermTable, normalize,
    normalize::{contains, overlaps},
};

/// Inputs of a single recommendation pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendQuery<'a> {
    pub mood: Option<Mood>,
    pub ingredients: &'a [String],
    pub pantry: &'a [PantryIngredient],
    pub use_pantry_ranking: bool,
}

/// Per-recipe view of how well a recipe fits a query, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeMatch<'a> {
    pub recipe: &'a Recipe,
    pub matched_terms: usize,
    pub pantry_matches: usize,
    pub missing: Vec<&'a str>,
}

/// Mood and ingredient driven recipe ranking.
///
/// Holds the term table used to bridge German and English ingredient names.
/// With `bilingual_pantry` set, pantry names are expanded through the same
/// table before pantry ranking compares them with recipe ingredients.
/// Missing-ingredient reports and depletion always compare the literal
/// pantry name, so a short synonym such as "ei" never marks an entry used.
#[derive(Debug, Clone)]
pub struct Recommender {
    terms: TermTable,
    bilingual_pantry: bool,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(TermTable::default())
    }
}

impl Recommender {
    pub fn new(terms: TermTable) -> Self {
        Self {
            terms,
            bilingual_pantry: true,
        }
    }

    pub fn bilingual_pantry(mut self, enabled: bool) -> Self {
        self.bilingual_pantry = enabled;
        self
    }

    pub fn terms(&self) -> &TermTable {
        &self.terms
    }

    pub fn recommend(&self, candidates: &[Recipe], query: &RecommendQuery<'_>) -> Vec<Recipe> {
        let mut recipes: Vec<&Recipe> = match query.mood {
            Some(mood) => candidates
                .iter()
                .filter(|r| r.is_suitable_for(mood))
                .collect(),
            None => candidates.iter().collect(),
        };

        let terms = query_terms(query.ingredients);
        if !terms.is_empty() {
            let mut scored: Vec<(usize, &Recipe)> = recipes
                .into_iter()
                .map(|r| (self.count_terms(&normalized_ingredients(r), &terms), r))
                .filter(|(count, _)| *count > 0)
                .collect();

            scored.sort_by(|a, b| b.0.cmp(&a.0));
            recipes = scored.into_iter().map(|(_, r)| r).collect();
        }

        if query.use_pantry_ranking {
            let pantry = self.pantry_terms(query.pantry, self.bilingual_pantry);
            if !pantry.is_empty() {
                let mut scored: Vec<(usize, &Recipe)> = recipes
                    .into_iter()
                    .map(|r| (count_covered(&normalized_ingredients(r), &pantry), r))
                    .collect();

                scored.sort_by(|a, b| b.0.cmp(&a.0));
                recipes = scored.into_iter().map(|(_, r)| r).collect();
            }
        }

        tracing::debug!(
            candidates = candidates.len(),
            results = recipes.len(),
            mood = ?query.mood,
            terms = terms.len(),
            "recommendation computed"
        );

        recipes.into_iter().cloned().collect()
    }

    /// Number of distinct query terms found in the recipe's ingredients,
    /// directly or through either translation direction.
    pub fn ingredient_match_count(&self, recipe: &Recipe, query_ingredients: &[String]) -> usize {
        self.count_terms(
            &normalized_ingredients(recipe),
            &query_terms(query_ingredients),
        )
    }

    /// Number of recipe ingredients covered by an unused pantry entry.
    pub fn pantry_match_count(&self, recipe: &Recipe, pantry: &[PantryIngredient]) -> usize {
        count_covered(
            &normalized_ingredients(recipe),
            &self.pantry_terms(pantry, self.bilingual_pantry),
        )
    }

    /// Recipe ingredients, in recipe order, that no unused pantry entry covers.
    pub fn missing_ingredients<'a>(
        &self,
        recipe: &'a Recipe,
        pantry: &[PantryIngredient],
    ) -> Vec<&'a str> {
        let pantry = self.pantry_terms(pantry, false);

        recipe
            .ingredients
            .iter()
            .filter(|ingredient| !is_covered(&normalize(ingredient), &pantry))
            .map(String::as_str)
            .collect()
    }

    /// Marks every unused pantry entry that covers one of the recipe's
    /// ingredients as used. Returns how many entries changed.
    pub fn deplete_pantry(&self, recipe: &Recipe, pantry: &mut [PantryIngredient]) -> usize {
        let ingredients = normalized_ingredients(recipe);
        let mut depleted = 0;

        for entry in pantry.iter_mut().filter(|e| !e.is_used) {
            let name = normalize(&entry.name);
            let used = ingredients
                .iter()
                .any(|ingredient| overlaps(ingredient, &name));

            if used {
                entry.is_used = true;
                depleted += 1;
            }
        }

        depleted
    }

    pub fn explain<'a>(&self, recipe: &'a Recipe, query: &RecommendQuery<'_>) -> RecipeMatch<'a> {
        RecipeMatch {
            recipe,
            matched_terms: self.ingredient_match_count(recipe, query.ingredients),
            pantry_matches: self.pantry_match_count(recipe, query.pantry),
            missing: self.missing_ingredients(recipe, query.pantry),
        }
    }

    fn count_terms(&self, ingredients: &[String], terms: &[String]) -> usize {
        terms
            .iter()
            .filter(|term| {
                self.terms.match_set(term).into_iter().any(|candidate| {
                    ingredients
                        .iter()
                        .any(|ingredient| contains(ingredient, candidate))
                })
            })
            .count()
    }

    fn pantry_names(&self, name: &str, bilingual: bool) -> Vec<String> {
        let name = normalize(name);
        if !bilingual {
            return vec![name];
        }

        self.terms
            .match_set(&name)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    fn pantry_terms(&self, pantry: &[PantryIngredient], bilingual: bool) -> Vec<Vec<String>> {
        pantry
            .iter()
            .filter(|entry| !entry.is_used && !entry.name.trim().is_empty())
            .map(|entry| self.pantry_names(&entry.name, bilingual))
            .collect()
    }
}

fn normalized_ingredients(recipe: &Recipe) -> Vec<String> {
    recipe.ingredients.iter().map(|i| normalize(i)).collect()
}

fn query_terms(ingredients: &[String]) -> Vec<String> {
    let mut terms: Vec<String> = Vec::with_capacity(ingredients.len());
    for term in ingredients.iter().map(|i| normalize(i)) {
        if !term.trim().is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    }

    terms
}

fn is_covered(ingredient: &str, pantry: &[Vec<String>]) -> bool {
    pantry
        .iter()
        .any(|names| names.iter().any(|name| overlaps(ingredient, name)))
}

fn count_covered(ingredients: &[String], pantry: &[Vec<String>]) -> usize {
    ingredients
        .iter()
        .filter(|ingredient| is_covered(ingredient, pantry))
        .count()
}
