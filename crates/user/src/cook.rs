use moodmeal_recipe::Recommender;
use moodmeal_shared::{
    recipe::Recipe,
    user::{CookedRecipe, User},
};
use time::OffsetDateTime;

/// Records `recipe` as cooked at `now` and marks the pantry entries it
/// consumed as used. Returns the number of pantry entries depleted.
pub fn cook(
    user: &mut User,
    recipe: &Recipe,
    recommender: &Recommender,
    now: OffsetDateTime,
) -> usize {
    user.record_cooked(CookedRecipe::new(recipe, now));

    let depleted = recommender.deplete_pantry(recipe, &mut user.pantry_ingredients);
    tracing::debug!(
        user_id = %user.id,
        recipe_id = %recipe.id,
        depleted,
        "recipe cooked"
    );

    depleted
}

#[cfg(test)]
mod tests {
    use moodmeal_shared::user::PantryIngredient;
    use time::Duration;

    use super::*;

    #[test]
    fn test_cook_records_and_depletes() {
        let now = OffsetDateTime::now_utc();
        let recommender = Recommender::default();
        let recipe = Recipe {
            id: "pfannkuchen".to_owned(),
            name: "Pfannkuchen".to_owned(),
            ingredients: vec!["3 Eier".to_owned(), "500ml Milch".to_owned()],
            image_url: Some("https://example.com/p.jpg".to_owned()),
            ..Default::default()
        };
        let mut user = User::default();
        user.add_to_pantry(PantryIngredient::new("Eier"));
        user.add_to_pantry(PantryIngredient::new("Reis"));
        user.record_cooked(CookedRecipe::new(&recipe, now - Duration::days(1)));

        assert_eq!(cook(&mut user, &recipe, &recommender, now), 1);
        assert_eq!(user.cooked_recipes.len(), 2);
        assert_eq!(user.cooked_recipes[0].cooking_date, now);
        assert_eq!(user.cooked_recipes[0].recipe_name, "Pfannkuchen");
        assert_eq!(
            user.cooked_recipes[0].image_url.as_deref(),
            Some("https://example.com/p.jpg")
        );
        assert!(user.pantry_ingredients[0].is_used);
        assert!(!user.pantry_ingredients[1].is_used);

        assert_eq!(cook(&mut user, &recipe, &recommender, now), 0);
        assert!(user.pantry_ingredients[0].is_used);
    }
}
