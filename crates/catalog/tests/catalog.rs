use mealplanner_catalog::{CategoryInput, IngredientInput, IngredientsQuery};
use mealplanner_shared::{Error, PageArgs};
use temp_dir::TempDir;

mod helpers;

fn category(name: &str) -> CategoryInput {
    CategoryInput {
        name: name.to_owned(),
        description: None,
    }
}

fn ingredient(name: &str, category_id: Option<&str>) -> IngredientInput {
    IngredientInput {
        name: name.to_owned(),
        category_id: category_id.map(ToOwned::to_owned),
        default_unit: Some("g".to_owned()),
        calories_per_unit: Some(1.5),
    }
}

#[tokio::test]
async fn test_category_crud() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let produce = cmd.create_category(category("Produce")).await?;
    cmd.create_category(category("Dairy")).await?;

    let err = cmd.create_category(category("Produce")).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    cmd.update_category(
        &produce,
        CategoryInput {
            name: "Fruits & Vegetables".to_owned(),
            description: Some("Fresh".to_owned()),
        },
    )
    .await?;

    let categories = mealplanner_catalog::list_categories(&cmd.0).await?;
    let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Dairy", "Fruits & Vegetables"]);

    let err = cmd
        .update_category("missing", category("Other"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_delete_category_keeps_ingredients() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let dairy = cmd.create_category(category("Dairy")).await?;
    let milk = cmd.create_ingredient(ingredient("Milk", Some(&dairy))).await?;

    let found = mealplanner_catalog::find_ingredient(&cmd.0, &milk)
        .await?
        .unwrap();
    assert_eq!(found.name, "milk");
    assert_eq!(found.category_name.as_deref(), Some("Dairy"));

    cmd.delete_category(&dairy).await?;

    let found = mealplanner_catalog::find_ingredient(&cmd.0, &milk)
        .await?
        .unwrap();
    assert_eq!(found.category_id, None);
    assert_eq!(found.category_name, None);

    Ok(())
}

#[tokio::test]
async fn test_ingredient_validation() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let err = cmd
        .create_ingredient(ingredient("Milk", Some("missing")))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::BadRequest(_)));

    cmd.create_ingredient(ingredient("Milk", None)).await?;
    let err = cmd
        .create_ingredient(ingredient(" MILK ", None))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    let err = cmd
        .create_ingredient(IngredientInput {
            calories_per_unit: Some(-1.0),
            ..ingredient("Butter", None)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    Ok(())
}

#[tokio::test]
async fn test_filter_ingredients() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let dairy = cmd.create_category(category("Dairy")).await?;
    for name in ["Milk", "Butter", "Cheddar cheese"] {
        cmd.create_ingredient(ingredient(name, Some(&dairy))).await?;
    }
    cmd.create_ingredient(ingredient("Cheese crackers", None))
        .await?;

    let page = mealplanner_catalog::filter_ingredients(
        &cmd.0,
        IngredientsQuery {
            search: Some("chee".to_owned()),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(page.pagination.total, 2);

    let page = mealplanner_catalog::filter_ingredients(
        &cmd.0,
        IngredientsQuery {
            category_id: Some(dairy),
            page: PageArgs::new(1, 2),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.total_pages, 2);
    let names: Vec<_> = page.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["butter", "cheddar cheese"]);

    let found = mealplanner_catalog::find_ingredient_by_name(&cmd.0, "Cheddar Cheese").await?;
    assert!(found.is_some());

    Ok(())
}

#[tokio::test]
async fn test_blank_names_are_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let err = cmd.create_category(category("   ")).await.unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let err = cmd
        .create_ingredient(ingredient(" \t ", None))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let id = cmd
        .create_category(CategoryInput {
            name: "  Bakery ".to_owned(),
            description: Some("  ".to_owned()),
        })
        .await?;
    let found = mealplanner_catalog::find_category(&cmd.0, &id)
        .await?
        .unwrap();
    assert_eq!(found.name, "Bakery");
    assert_eq!(found.description, None);

    let err = cmd.update_category(&id, category(" ")).await.unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    Ok(())
}
