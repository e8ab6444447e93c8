use mealmosaic_core::{
    create_document, delete_document, fetch_document, replace_document, MemoryStore, ResourceKind,
    StatusCode,
};
use serde_json::json;
use uuid::Uuid;

async fn seed_user(store: &MemoryStore) -> String {
    let user = create_document(
        store,
        ResourceKind::User,
        json!({"username": "planner", "email": "planner@example.com"}),
    )
    .await
    .unwrap();
    user["_id"].as_str().unwrap().to_string()
}

async fn seed_recipe(store: &MemoryStore) -> String {
    let recipe = create_document(
        store,
        ResourceKind::Recipe,
        json!({
            "title": "Plan Recipe",
            "cuisine": "Fusion",
            "prepTimeMinutes": 5,
            "cookTimeMinutes": 10,
            "servings": 1,
            "ingredients": [{"name": "Rice", "quantity": 1, "unit": "cup"}],
            "steps": ["Cook rice"]
        }),
    )
    .await
    .unwrap();
    recipe["_id"].as_str().unwrap().to_string()
}

fn week_plan(user: &str, recipe: &str) -> serde_json::Value {
    json!({
        "title": "Week Plan",
        "user": user,
        "startDate": "2024-05-01",
        "endDate": "2024-05-02",
        "entries": [
            {"date": "2024-05-01", "mealType": "dinner", "recipe": recipe, "notes": "First night"}
        ]
    })
}

#[tokio::test]
async fn create_meal_plan_with_existing_references() {
    let store = MemoryStore::new();
    let user = seed_user(&store).await;
    let recipe = seed_recipe(&store).await;

    let plan = create_document(&store, ResourceKind::MealPlan, week_plan(&user, &recipe))
        .await
        .unwrap();
    assert_eq!(plan["title"], "Week Plan");
    assert_eq!(plan["entries"][0]["mealType"], "dinner");

    let id = plan["_id"].as_str().unwrap();
    let fetched = fetch_document(&store, ResourceKind::MealPlan, id)
        .await
        .unwrap();
    assert_eq!(fetched, plan);
}

#[tokio::test]
async fn reversed_date_range_rejected() {
    let store = MemoryStore::new();
    let user = seed_user(&store).await;
    let recipe = seed_recipe(&store).await;

    let mut payload = week_plan(&user, &recipe);
    payload["startDate"] = json!("2024-05-10");
    payload["endDate"] = json!("2024-05-01");

    let rejection = create_document(&store, ResourceKind::MealPlan, payload)
        .await
        .unwrap_err();
    assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
    assert_eq!(rejection.message, "endDate must be on or after startDate");
}

#[tokio::test]
async fn date_order_reported_even_with_broken_entries() {
    let store = MemoryStore::new();
    let user = seed_user(&store).await;

    // Reversed dates AND a bad meal type AND a dangling recipe: the date
    // order still wins.
    let payload = json!({
        "title": "Week Plan",
        "user": user,
        "startDate": "2024-05-10",
        "endDate": "2024-05-01",
        "entries": [
            {"date": "2024-05-01", "mealType": "Brunch", "recipe": Uuid::new_v4().to_string()}
        ]
    });

    let rejection = create_document(&store, ResourceKind::MealPlan, payload)
        .await
        .unwrap_err();
    assert_eq!(rejection.message, "endDate must be on or after startDate");
}

#[tokio::test]
async fn single_day_plan_accepted() {
    let store = MemoryStore::new();
    let user = seed_user(&store).await;
    let recipe = seed_recipe(&store).await;

    let mut payload = week_plan(&user, &recipe);
    payload["endDate"] = json!("2024-05-01");

    create_document(&store, ResourceKind::MealPlan, payload)
        .await
        .unwrap();
}

#[tokio::test]
async fn unparseable_dates_rejected() {
    let store = MemoryStore::new();
    let user = seed_user(&store).await;
    let recipe = seed_recipe(&store).await;

    let mut payload = week_plan(&user, &recipe);
    payload["endDate"] = json!("sometime in May");

    let rejection = create_document(&store, ResourceKind::MealPlan, payload)
        .await
        .unwrap_err();
    assert_eq!(rejection.message, "startDate and endDate must be valid dates");
}

#[tokio::test]
async fn meal_type_case_variant_rejected() {
    let store = MemoryStore::new();
    let user = seed_user(&store).await;
    let recipe = seed_recipe(&store).await;

    let mut payload = week_plan(&user, &recipe);
    payload["entries"][0]["mealType"] = json!("Dinner");

    let rejection = create_document(&store, ResourceKind::MealPlan, payload)
        .await
        .unwrap_err();
    assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        rejection.message,
        "entries[0].mealType must be one of: breakfast, lunch, dinner, snack"
    );
}

#[tokio::test]
async fn empty_entries_count_as_missing() {
    let store = MemoryStore::new();
    let user = seed_user(&store).await;
    let recipe = seed_recipe(&store).await;

    let mut payload = week_plan(&user, &recipe);
    payload["entries"] = json!([]);

    let rejection = create_document(&store, ResourceKind::MealPlan, payload)
        .await
        .unwrap_err();
    assert_eq!(rejection.missing_fields, Some(vec!["entries".to_string()]));
}

#[tokio::test]
async fn dangling_recipe_reference_not_found() {
    let store = MemoryStore::new();
    let user = seed_user(&store).await;
    let ghost = Uuid::new_v4().to_string();

    let rejection = create_document(&store, ResourceKind::MealPlan, week_plan(&user, &ghost))
        .await
        .unwrap_err();
    assert_eq!(rejection.status, StatusCode::NOT_FOUND);
    assert_eq!(rejection.message, "One or more recipe references were not found");
}

#[tokio::test]
async fn malformed_recipe_id_wins_over_existing_ones() {
    let store = MemoryStore::new();
    let user = seed_user(&store).await;
    let recipe = seed_recipe(&store).await;

    let payload = json!({
        "title": "Week Plan",
        "user": user,
        "startDate": "2024-05-01",
        "endDate": "2024-05-02",
        "entries": [
            {"date": "2024-05-01", "mealType": "lunch", "recipe": recipe},
            {"date": "2024-05-01", "mealType": "dinner", "recipe": "not-a-valid-id"}
        ]
    });

    let rejection = create_document(&store, ResourceKind::MealPlan, payload)
        .await
        .unwrap_err();
    assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
    assert_eq!(rejection.message, "Invalid recipe id in entries");
}

#[tokio::test]
async fn owner_must_be_a_valid_id() {
    let store = MemoryStore::new();
    let recipe = seed_recipe(&store).await;

    let rejection = create_document(
        &store,
        ResourceKind::MealPlan,
        week_plan("definitely-not-an-id", &recipe),
    )
    .await
    .unwrap_err();
    assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
    assert_eq!(rejection.message, "user must be a valid id");
}

#[tokio::test]
async fn owner_must_exist() {
    let store = MemoryStore::new();
    let recipe = seed_recipe(&store).await;
    let ghost = Uuid::new_v4().to_string();

    let rejection = create_document(&store, ResourceKind::MealPlan, week_plan(&ghost, &recipe))
        .await
        .unwrap_err();
    assert_eq!(rejection.status, StatusCode::NOT_FOUND);
    assert_eq!(rejection.message, "Referenced user not found");
}

#[tokio::test]
async fn replace_rechecks_references() {
    let store = MemoryStore::new();
    let user = seed_user(&store).await;
    let recipe = seed_recipe(&store).await;

    let plan = create_document(&store, ResourceKind::MealPlan, week_plan(&user, &recipe))
        .await
        .unwrap();
    let id = plan["_id"].as_str().unwrap().to_string();

    // Swapping in a recipe that was never created fails the replace.
    let mut payload = week_plan(&user, &Uuid::new_v4().to_string());
    let rejection = replace_document(&store, ResourceKind::MealPlan, &id, payload.clone())
        .await
        .unwrap_err();
    assert_eq!(rejection.status, StatusCode::NOT_FOUND);

    // The same payload pointed back at a live recipe succeeds.
    payload["entries"][0]["recipe"] = json!(recipe);
    let updated = replace_document(&store, ResourceKind::MealPlan, &id, payload)
        .await
        .unwrap();
    assert_eq!(updated["_id"], plan["_id"]);
}

#[tokio::test]
async fn deleting_a_referenced_recipe_does_not_cascade() {
    let store = MemoryStore::new();
    let user = seed_user(&store).await;
    let recipe = seed_recipe(&store).await;

    let plan = create_document(&store, ResourceKind::MealPlan, week_plan(&user, &recipe))
        .await
        .unwrap();

    delete_document(&store, ResourceKind::Recipe, &recipe)
        .await
        .unwrap();

    // The plan still exists and still holds the now-dangling id.
    let id = plan["_id"].as_str().unwrap();
    let fetched = fetch_document(&store, ResourceKind::MealPlan, id)
        .await
        .unwrap();
    assert_eq!(fetched["entries"][0]["recipe"], json!(recipe));
}
