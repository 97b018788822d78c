use mealplanner_recipe::{RecipesQuery, Source};
use mealplanner_shared::{Actor, Error, PageArgs};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_create_and_find() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&cmd, "john").await?;

    let id = cmd
        .create(&john, helpers::recipe_input("Garlic pasta", false))
        .await?;

    let recipe = mealplanner_recipe::find(&cmd.0, &Actor::user(&john), &id)
        .await?
        .unwrap();
    assert_eq!(recipe.title, "Garlic pasta");
    assert_eq!(recipe.author_name.as_deref(), Some("john"));
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.dietary_tags, vec!["vegetarian"]);
    assert_eq!(recipe.source, Source::Manual);
    assert_eq!(recipe.total_time(), 30);
    assert!(!recipe.is_favorite);

    Ok(())
}

#[tokio::test]
async fn test_private_recipe_visibility() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&cmd, "john").await?;
    let jane = helpers::create_user(&cmd, "jane").await?;

    let private = cmd
        .create(&john, helpers::recipe_input("Secret sauce", false))
        .await?;
    let public = cmd
        .create(&john, helpers::recipe_input("Shared soup", true))
        .await?;

    let jane_actor = Actor::user(&jane);
    assert!(
        mealplanner_recipe::find(&cmd.0, &jane_actor, &private)
            .await?
            .is_none()
    );
    assert!(
        mealplanner_recipe::find(&cmd.0, &Actor::admin(&jane), &private)
            .await?
            .is_some()
    );

    let err = cmd
        .update(&jane_actor, &private, helpers::recipe_input("Hijack", true))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = cmd
        .update(&jane_actor, &public, helpers::recipe_input("Hijack", true))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden));

    let err = cmd.delete(&jane_actor, &public).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden));

    cmd.delete(&Actor::admin(&jane), &public).await?;
    assert!(
        mealplanner_recipe::find(&cmd.0, &Actor::user(&john), &public)
            .await?
            .is_none()
    );

    Ok(())
}

#[tokio::test]
async fn test_toggle_favorite_twice() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&cmd, "john").await?;
    let jane = helpers::create_user(&cmd, "jane").await?;

    let id = cmd
        .create(&john, helpers::recipe_input("Shared soup", true))
        .await?;

    assert!(cmd.toggle_favorite(&jane, &id).await?);
    let recipe = mealplanner_recipe::find(&cmd.0, &Actor::user(&jane), &id)
        .await?
        .unwrap();
    assert!(recipe.is_favorite);

    let favorites =
        mealplanner_recipe::favorites(&cmd.0, &Actor::user(&jane), PageArgs::default()).await?;
    assert_eq!(favorites.items.len(), 1);

    assert!(!cmd.toggle_favorite(&jane, &id).await?);
    let favorites =
        mealplanner_recipe::favorites(&cmd.0, &Actor::user(&jane), PageArgs::default()).await?;
    assert!(favorites.items.is_empty());

    let private = cmd
        .create(&john, helpers::recipe_input("Secret sauce", false))
        .await?;
    let err = cmd.toggle_favorite(&jane, &private).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_filter() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&cmd, "john").await?;
    let jane = helpers::create_user(&cmd, "jane").await?;

    cmd.create(&john, helpers::recipe_input("Garlic pasta", true))
        .await?;
    cmd.create(&john, helpers::recipe_input("Secret pasta", false))
        .await?;
    let mut slow = helpers::recipe_input("Slow roast", true);
    slow.cook_time = 240;
    slow.dietary_tags = vec![];
    slow.cuisine = Some("French".to_owned());
    cmd.create(&jane, slow).await?;

    let page = mealplanner_recipe::filter(&cmd.0, RecipesQuery::new(Actor::user(&jane))).await?;
    assert_eq!(page.pagination.total, 2);

    let page = mealplanner_recipe::filter(&cmd.0, RecipesQuery::new(Actor::admin(&jane))).await?;
    assert_eq!(page.pagination.total, 3);

    let page = mealplanner_recipe::filter(
        &cmd.0,
        RecipesQuery {
            search: Some("pasta".to_owned()),
            ..RecipesQuery::new(Actor::user(&john))
        },
    )
    .await?;
    assert_eq!(page.pagination.total, 2);

    let page = mealplanner_recipe::filter(
        &cmd.0,
        RecipesQuery {
            only_mine: true,
            ..RecipesQuery::new(Actor::user(&jane))
        },
    )
    .await?;
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Slow roast");

    let page = mealplanner_recipe::filter(
        &cmd.0,
        RecipesQuery {
            max_total_time: Some(60),
            dietary_tag: Some("vegetarian".to_owned()),
            ..RecipesQuery::new(Actor::user(&jane))
        },
    )
    .await?;
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Garlic pasta");

    let page = mealplanner_recipe::filter(
        &cmd.0,
        RecipesQuery {
            cuisine: Some("french".to_owned()),
            ..RecipesQuery::new(Actor::user(&john))
        },
    )
    .await?;
    assert_eq!(page.items.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_blank_fields_are_trimmed_before_validation() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&cmd, "john").await?;

    let err = cmd
        .create(&john, helpers::recipe_input("    ", true))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let mut input = helpers::recipe_input("  Garlic pasta  ", true);
    input.cuisine = Some("   ".to_owned());
    input.ingredients[0].name = "  spaghetti ".to_owned();
    input.instructions.push("   ".to_owned());
    let id = cmd.create(&john, input).await?;

    let recipe = mealplanner_recipe::find(&cmd.0, &Actor::user(&john), &id)
        .await?
        .unwrap();
    assert_eq!(recipe.title, "Garlic pasta");
    assert_eq!(recipe.cuisine, None);
    assert_eq!(recipe.ingredients[0].name, "spaghetti");
    assert_eq!(recipe.instructions.len(), 2);

    let err = cmd
        .update(&Actor::user(&john), &id, helpers::recipe_input("\t", true))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    Ok(())
}

#[tokio::test]
async fn test_concurrent_favorite_toggles_do_not_fail() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&cmd, "john").await?;

    let id = cmd
        .create(&john, helpers::recipe_input("Shared soup", true))
        .await?;

    let (first, second) = tokio::join!(
        cmd.toggle_favorite(&john, &id),
        cmd.toggle_favorite(&john, &id)
    );
    first?;
    second?;

    let favorites =
        mealplanner_recipe::favorites(&cmd.0, &Actor::user(&john), PageArgs::default()).await?;
    assert!(favorites.items.len() <= 1);

    Ok(())
}
