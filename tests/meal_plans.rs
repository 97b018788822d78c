use axum::http::StatusCode;
use serde_json::json;

mod helpers;

#[tokio::test]
async fn test_end_before_start_is_rejected() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (token, _) = app.register("planner").await?;

    let (status, body) = app
        .send(
            "POST",
            "/api/meal-plans",
            Some(&token),
            Some(json!({
                "name": "Backwards",
                "start_date": "2025-03-09",
                "end_date": "2025-03-03",
            })),
        )
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, body) = app.send("GET", "/api/meal-plans", Some(&token), None).await?;
    assert_eq!(body["pagination"]["total"], 0);

    Ok(())
}

#[tokio::test]
async fn test_invalid_item_rolls_back_plan() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (token, _) = app.register("planner").await?;

    let (status, _) = app
        .send(
            "POST",
            "/api/meal-plans",
            Some(&token),
            Some(json!({
                "name": "Broken",
                "start_date": "2025-03-03",
                "end_date": "2025-03-09",
                "items": [
                    {"day_of_week": "monday", "meal_type": "lunch", "custom_meal_name": "Salad"},
                    {"day_of_week": "monday", "meal_type": "dinner", "recipe_id": "missing"}
                ]
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.send("GET", "/api/meal-plans", Some(&token), None).await?;
    assert_eq!(body["pagination"]["total"], 0);

    Ok(())
}

#[tokio::test]
async fn test_plan_items_and_grocery_list() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (token, _) = app.register("planner").await?;
    let (stranger, _) = app.register("stranger").await?;

    let (_, body) = app
        .send(
            "POST",
            "/api/recipes",
            Some(&token),
            Some(helpers::recipe_body("Pasta", false)),
        )
        .await?;
    let recipe_id = body["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) = app
        .send(
            "POST",
            "/api/meal-plans",
            Some(&token),
            Some(json!({
                "name": "Week 10",
                "start_date": "2025-03-03",
                "end_date": "2025-03-09",
                "items": [
                    {"day_of_week": "monday", "meal_type": "dinner", "recipe_id": recipe_id, "servings": 4},
                    {
                        "day_of_week": "tuesday",
                        "meal_type": "lunch",
                        "custom_meal_name": "Tomato salad",
                        "custom_ingredients": [{"name": "Tomato", "quantity": 2, "unit": "pcs"}]
                    }
                ]
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let plan_id = body["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/meal-plans/{plan_id}/items"),
            Some(&token),
            Some(json!({"day_of_week": "sunday", "meal_type": "breakfast", "custom_meal_name": "Toast"})),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let item_id = body["data"]["id"].as_str().unwrap().to_owned();

    let (_, body) = app
        .send("GET", &format!("/api/meal-plans/{plan_id}"), Some(&token), None)
        .await?;
    assert_eq!(body["data"]["item_count"], 3);
    assert_eq!(body["data"]["items"][0]["recipe_title"], "Pasta");

    let (status, _) = app
        .send(
            "DELETE",
            &format!("/api/meal-plans/{plan_id}/items/{item_id}"),
            Some(&token),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send("GET", &format!("/api/meal-plans/{plan_id}"), Some(&stranger), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            "POST",
            "/api/grocery-lists/generate",
            Some(&stranger),
            Some(json!({"meal_plan_id": plan_id})),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(
            "POST",
            "/api/grocery-lists/generate",
            Some(&token),
            Some(json!({"meal_plan_id": plan_id, "name": "Groceries"})),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let list_id = body["data"]["id"].as_str().unwrap().to_owned();
    let items = body["data"]["items"].as_array().unwrap();
    let tomato = items
        .iter()
        .find(|item| item["name"] == "tomato")
        .expect("tomato line");
    // 3 pcs scaled from 2 to 4 servings, plus 2 pcs from the salad
    assert_eq!(tomato["quantity"], 8.0);

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/grocery-lists/{list_id}/items/0/toggle"),
            Some(&token),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["checked"], true);

    let (status, _) = app
        .send(
            "POST",
            &format!("/api/grocery-lists/{list_id}/items/99/toggle"),
            Some(&token),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send("GET", &format!("/api/grocery-lists/{list_id}"), Some(&stranger), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}
