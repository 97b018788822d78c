use axum::http::StatusCode;
use serde_json::json;

mod helpers;

#[tokio::test]
async fn test_recipe_crud_and_visibility() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (owner, _) = app.register("owner").await?;
    let (other, _) = app.register("other").await?;

    let (status, body) = app
        .send(
            "POST",
            "/api/recipes",
            Some(&owner),
            Some(helpers::recipe_body("Secret pasta", false)),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) = app
        .send("GET", &format!("/api/recipes/{id}"), Some(&owner), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Secret pasta");
    assert_eq!(body["data"]["source"], "manual");
    assert_eq!(body["data"]["author_name"], "owner");

    let (status, _) = app
        .send("GET", &format!("/api/recipes/{id}"), Some(&other), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            "PUT",
            &format!("/api/recipes/{id}"),
            Some(&owner),
            Some(helpers::recipe_body("Shared pasta", true)),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send("GET", &format!("/api/recipes/{id}"), Some(&other), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Shared pasta");

    let (status, _) = app
        .send(
            "PUT",
            &format!("/api/recipes/{id}"),
            Some(&other),
            Some(helpers::recipe_body("Stolen pasta", true)),
        )
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send("DELETE", &format!("/api/recipes/{id}"), Some(&other), None)
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send("DELETE", &format!("/api/recipes/{id}"), Some(&owner), None)
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send("GET", &format!("/api/recipes/{id}"), Some(&owner), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_recipe_validation() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (token, _) = app.register("cook").await?;

    let mut body = helpers::recipe_body("No ingredients", false);
    body["ingredients"] = json!([]);

    let (status, body) = app
        .send("POST", "/api/recipes", Some(&token), Some(body))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["ingredients"].is_array());

    Ok(())
}

#[tokio::test]
async fn test_list_filters_and_pagination() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (token, _) = app.register("lister").await?;

    for i in 0..3 {
        app.send(
            "POST",
            "/api/recipes",
            Some(&token),
            Some(helpers::recipe_body(&format!("Pasta {i}"), true)),
        )
        .await?;
    }

    let mut soup = helpers::recipe_body("Miso soup", true);
    soup["cuisine"] = json!("japanese");
    soup["meal_type"] = json!("lunch");
    app.send("POST", "/api/recipes", Some(&token), Some(soup))
        .await?;

    let (status, body) = app
        .send("GET", "/api/recipes?limit=2&page=1", Some(&token), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total"], 4);
    assert_eq!(body["pagination"]["total_pages"], 2);

    let (_, body) = app
        .send("GET", "/api/recipes?meal_type=lunch", Some(&token), None)
        .await?;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["title"], "Miso soup");

    let (_, body) = app
        .send("GET", "/api/recipes?search=pasta", Some(&token), None)
        .await?;
    assert_eq!(body["pagination"]["total"], 3);

    Ok(())
}

#[tokio::test]
async fn test_toggle_favorite_twice() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (token, _) = app.register("fan").await?;

    let (_, body) = app
        .send(
            "POST",
            "/api/recipes",
            Some(&token),
            Some(helpers::recipe_body("Lasagna", true)),
        )
        .await?;
    let id = body["data"]["id"].as_str().unwrap().to_owned();
    let uri = format!("/api/recipes/{id}/favorite");

    let (status, body) = app.send("POST", &uri, Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_favorite"], true);

    let (_, body) = app
        .send("GET", "/api/recipes/favorites", Some(&token), None)
        .await?;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["is_favorite"], true);

    let (_, body) = app.send("POST", &uri, Some(&token), None).await?;
    assert_eq!(body["data"]["is_favorite"], false);

    let (_, body) = app
        .send("GET", "/api/recipes/favorites", Some(&token), None)
        .await?;
    assert_eq!(body["pagination"]["total"], 0);

    Ok(())
}

#[tokio::test]
async fn test_malformed_requests_use_the_error_envelope() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (token, _) = app.register("owner").await?;

    let (status, body) = app
        .send_raw("POST", "/api/recipes", Some(&token), Some(b"{not json".to_vec()))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());

    let mut recipe = helpers::recipe_body("Brunch pasta", true);
    recipe["meal_type"] = json!("brunch");
    let (status, body) = app
        .send("POST", "/api/recipes", Some(&token), Some(recipe))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = app
        .send("GET", "/api/recipes?page=first", Some(&token), None)
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = app
        .send("GET", "/api/nothing-here", Some(&token), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route not found");

    Ok(())
}

#[tokio::test]
async fn test_blank_title_and_nested_errors_are_rejected() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (token, _) = app.register("owner").await?;

    let (status, body) = app
        .send(
            "POST",
            "/api/recipes",
            Some(&token),
            Some(helpers::recipe_body("    ", true)),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["title"].is_array());

    let mut recipe = helpers::recipe_body("Pasta", true);
    recipe["ingredients"][1]["quantity"] = json!(0);
    let (status, body) = app
        .send("POST", "/api/recipes", Some(&token), Some(recipe))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["ingredients[1].quantity"][0],
        "Must be greater than 0"
    );

    let (_, body) = app.send("GET", "/api/recipes", Some(&token), None).await?;
    assert_eq!(body["pagination"]["total"], 0);

    Ok(())
}
