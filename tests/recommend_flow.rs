use moodmeal::config::{Config, DatabaseConfig, ObservabilityConfig, RecommendConfig, TermsConfig};
use moodmeal_recipe::RecommendQuery;
use moodmeal_shared::{Mood, user::PantryIngredient};
use rand::{SeedableRng, rngs::StdRng};
use temp_dir::TempDir;
use time::OffsetDateTime;

fn test_config(dir: &TempDir) -> Config {
    Config {
        database: DatabaseConfig {
            url: format!("sqlite:{}", dir.child("moodmeal.db").to_str().unwrap()),
            max_connections: 2,
        },
        observability: ObservabilityConfig::default(),
        recommend: RecommendConfig::default(),
        terms: TermsConfig::default(),
    }
}

fn names(recipes: &[moodmeal_shared::recipe::Recipe]) -> Vec<&str> {
    recipes.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
async fn test_seed_recommend_and_cook() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = test_config(&dir);
    let recommender = config.recommender()?;
    let state = moodmeal::db::connect(&config).await?;

    let recipe_command = moodmeal_recipe::Command(state.clone());
    let recipe_query = moodmeal_recipe::Query(state.clone());
    let user_command = moodmeal_user::Command(state.clone());
    let user_query = moodmeal_user::Query(state.clone());

    let seeded = recipe_command
        .import(None, &mut StdRng::seed_from_u64(1))
        .await?;
    assert_eq!(recipe_query.count(None).await? as usize, seeded.len());

    let user = user_command
        .create(moodmeal_user::CreateInput {
            email: "lena@moodmeal.app".to_owned(),
            username: "lena".to_owned(),
        })
        .await?;
    user_command.set_mood(&user.id, Mood::Sad).await?;

    let user = user_query.find(&user.id).await?.unwrap();
    let candidates = recipe_query.list(user.current_mood).await?;
    let ingredients = vec!["tomato".to_owned()];
    let by_ingredient = recommender.recommend(
        &candidates,
        &RecommendQuery {
            mood: user.current_mood,
            ingredients: &ingredients,
            ..Default::default()
        },
    );
    assert_eq!(names(&by_ingredient), vec!["Spaghetti Bolognese", "Gulaschsuppe"]);

    for name in ["Eier", "Zucker", "Mehl"] {
        user_command
            .add_to_pantry(&user.id, PantryIngredient::new(name))
            .await?;
    }
    let user = user_query.find(&user.id).await?.unwrap();
    let pantry: Vec<PantryIngredient> = user.available_pantry().cloned().collect();

    let calm = recipe_query.list(Some(Mood::Calm)).await?;
    let by_pantry = recommender.recommend(
        &calm,
        &RecommendQuery {
            mood: Some(Mood::Calm),
            pantry: &pantry,
            use_pantry_ranking: true,
            ..Default::default()
        },
    );
    assert_eq!(by_pantry.len(), calm.len());
    assert_eq!(by_pantry[0].name, "Pfannkuchen");

    let pancakes = by_pantry[0].clone();
    let used = user_command
        .cook(&user.id, &pancakes, &recommender, OffsetDateTime::now_utc())
        .await?;
    assert_eq!(used, 3);

    user_command
        .toggle_favorite(&user.id, &pancakes.id, true)
        .await?;

    let user = user_query.find(&user.id).await?.unwrap();
    assert_eq!(user.available_pantry().count(), 0);
    assert_eq!(user.cooked_recipes[0].recipe_id, pancakes.id);
    assert_eq!(
        recipe_query.find_many(&user.favorites).await?,
        vec![pancakes.clone()]
    );

    let plan = moodmeal_user::weekly_plan(&user, OffsetDateTime::now_utc());
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].recipes[0].recipe_name, "Pfannkuchen");

    Ok(())
}
