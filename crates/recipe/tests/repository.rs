use moodmeal_recipe::{Command, CreateRecipeInput, Query};
use moodmeal_shared::{Mood, recipe::Recipe};
use rand::{SeedableRng, rngs::StdRng};
use temp_dir::TempDir;

mod helpers;

fn recipe(id: &str, moods: &[Mood]) -> Recipe {
    Recipe {
        id: id.to_owned(),
        name: format!("Recipe {id}"),
        ingredients: vec!["2 Eier".to_owned()],
        instructions: vec!["Braten".to_owned()],
        preparation_time: 15,
        suitable_for_moods: moods.to_vec(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_save_and_find() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.clone());
    let query = Query(state);

    let mut omelette = recipe("omelette", &[Mood::Tired, Mood::Happy]);
    omelette.image_url = Some("https://example.com/o.jpg".to_owned());
    command.save(&omelette).await?;

    assert_eq!(query.find("omelette").await?, Some(omelette.clone()));
    assert_eq!(query.find("missing").await?, None);

    omelette.suitable_for_moods = vec![Mood::Calm];
    command.save(&omelette).await?;

    assert_eq!(query.count(None).await?, 1);
    assert_eq!(query.count(Some(Mood::Tired)).await?, 0);
    assert_eq!(query.count(Some(Mood::Calm)).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_list_by_mood() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.clone());
    let query = Query(state);

    command
        .save_all(&[
            recipe("c", &[Mood::Happy]),
            recipe("a", &[Mood::Sad, Mood::Sad]),
            recipe("b", &[Mood::Happy, Mood::Sad]),
        ])
        .await?;

    let ids = |recipes: Vec<Recipe>| recipes.into_iter().map(|r| r.id).collect::<Vec<_>>();
    assert_eq!(ids(query.list(None).await?), vec!["c", "a", "b"]);
    assert_eq!(ids(query.list(Some(Mood::Happy)).await?), vec!["c", "b"]);
    assert_eq!(ids(query.list(Some(Mood::Sad)).await?), vec!["a", "b"]);
    assert!(query.list(Some(Mood::Calm)).await?.is_empty());

    let favorites = vec!["b".to_owned(), "missing".to_owned(), "c".to_owned()];
    assert_eq!(ids(query.find_many(&favorites).await?), vec!["b", "c"]);
    assert!(query.find_many(&[]).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_create_and_rate() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.clone());
    let query = Query(state);

    let created = command
        .create(
            CreateRecipeInput {
                name: "Rührei".to_owned(),
                description: "Schnell".to_owned(),
                ingredients: vec!["3 Eier".to_owned()],
                instructions: vec!["Braten".to_owned()],
                moods: vec![Mood::Tired],
                ..Default::default()
            },
            "anna",
        )
        .await?;

    let invalid = command
        .create(
            CreateRecipeInput {
                name: "Leer".to_owned(),
                ..Default::default()
            },
            "anna",
        )
        .await;
    assert!(matches!(invalid, Err(moodmeal_shared::Error::Validate(_))));

    let rated = command.rate(&created.id, 4.5).await?;
    assert_eq!(rated.rating, Some(4.5));
    assert_eq!(query.find(&created.id).await?.and_then(|r| r.rating), Some(4.5));
    assert_eq!(query.count(None).await?, 1);

    assert!(matches!(
        command.rate("missing", 3.0).await,
        Err(moodmeal_shared::Error::NotFound(_))
    ));
    assert!(command.rate(&created.id, 7.0).await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_import_falls_back() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.clone());
    let query = Query(state);
    let mut rng = StdRng::seed_from_u64(42);

    let imported = command.import(Some(b"{\"error\":\"quota\"}"), &mut rng).await?;
    assert_eq!(imported.len(), moodmeal_recipe::fallback_catalog().len());
    assert_eq!(query.count(None).await?, imported.len() as u64);

    let body = r#"{"recipes":[{"id":"g-1","title":"Gemüsesuppe","ingredients":["Karotten"],"instructions":["Kochen"],"categories":["Suppe"]}]}"#.as_bytes();
    let imported = command.import(Some(body), &mut rng).await?;
    assert_eq!(imported.len(), 1);

    let soup = query.find("g-1").await?.unwrap();
    assert_eq!(soup.suitable_for_moods, vec![Mood::Sad]);
    assert!(query.list(Some(Mood::Sad)).await?.iter().any(|r| r.id == "g-1"));

    Ok(())
}
