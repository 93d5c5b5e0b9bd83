mod common;

use common::TestApp;
use http::StatusCode;
use lemon_server::auth::Role;
use serde_json::json;

#[tokio::test]
async fn test_catalog_reads_are_public_writes_need_manager() {
    let app = TestApp::new().await;
    let (_, customer) = app.user("cust", &[]).await;
    let (_, manager) = app.user("boss", &[Role::Manager]).await;

    let (status, body) = app.get("/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let new_category = json!({"title": "Main Courses"});
    let (status, _) = app.post("/api/categories", None, new_category.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app
        .post("/api/categories", Some(&customer), new_category.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.post("/api/categories", Some(&manager), new_category).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["slug"], "main-courses");
}

#[tokio::test]
async fn test_admin_can_manage_catalog() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin("root").await;
    let (status, _) = app
        .post("/api/categories", Some(&admin), json!({"title": "Drinks"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_category_slug_conflict_and_delete_guard() {
    let app = TestApp::new().await;
    let (_, manager) = app.user("boss", &[Role::Manager]).await;
    let item = app.menu_item(&manager, "mains", "Lemon Chicken", 12.5).await;

    let (status, _) = app
        .post(
            "/api/categories",
            Some(&manager),
            json!({"title": "Other", "slug": "mains"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, list) = app.get("/api/categories", None).await;
    let category_id = list[0]["id"].as_i64().unwrap();
    let (status, _) = app
        .delete(&format!("/api/categories/{category_id}"), Some(&manager))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .delete(&format!("/api/menu-items/{item}"), Some(&manager))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app
        .delete(&format!("/api/categories/{category_id}"), Some(&manager))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_menu_item_validation() {
    let app = TestApp::new().await;
    let (_, manager) = app.user("boss", &[Role::Manager]).await;
    app.menu_item(&manager, "mains", "Greek Salad", 9.0).await;
    let (_, list) = app.get("/api/categories", None).await;
    let category_id = list[0]["id"].as_i64().unwrap();

    // Duplicate title
    let (status, _) = app
        .post(
            "/api/menu-items",
            Some(&manager),
            json!({"title": "Greek Salad", "price": 8.0, "category_id": category_id}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Non-positive price
    let (status, _) = app
        .post(
            "/api/menu-items",
            Some(&manager),
            json!({"title": "Free Bread", "price": 0, "category_id": category_id}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown category
    let (status, _) = app
        .post(
            "/api/menu-items",
            Some(&manager),
            json!({"title": "Bruschetta", "price": 5.0, "category_id": 999}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/menu-items/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_menu_item_listing_filters_and_pages() {
    let app = TestApp::new().await;
    let (_, manager) = app.user("boss", &[Role::Manager]).await;
    app.menu_item(&manager, "mains", "Lemon Chicken", 12.5).await;
    app.menu_item(&manager, "mains", "Grilled Fish", 15.0).await;
    app.menu_item(&manager, "desserts", "Lemon Dessert", 4.75).await;

    let (status, body) = app.get("/api/menu-items?ordering=-price", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["data"][0]["title"], "Grilled Fish");
    assert_eq!(body["data"][2]["title"], "Lemon Dessert");

    let (_, body) = app.get("/api/menu-items?category=desserts", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["category"]["slug"], "desserts");

    let (_, body) = app.get("/api/menu-items?search=lemon", None).await;
    assert_eq!(body["total"], 2);

    let (_, body) = app
        .get("/api/menu-items?ordering=title&per_page=2&page=2", None)
        .await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["title"], "Lemon Dessert");

    let (status, body) = app
        .get("/api/menu-items?page=9223372036854775807&per_page=100", None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["total"], 3);
    assert_eq!(body["data"], json!([]));

    let (status, _) = app.get("/api/menu-items?ordering=bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_menu_item_patch_and_put() {
    let app = TestApp::new().await;
    let (_, manager) = app.user("boss", &[Role::Manager]).await;
    let id = app.menu_item(&manager, "mains", "Pasta", 10.0).await;
    let uri = format!("/api/menu-items/{id}");

    let (status, body) = app
        .patch(&uri, Some(&manager), json!({"featured": true}))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["featured"], true);
    assert_eq!(body["price"], 10.0);

    let category_id = body["category"]["id"].as_i64().unwrap();
    let (status, body) = app
        .put(
            &uri,
            Some(&manager),
            json!({"title": "Fresh Pasta", "price": 11.25, "category_id": category_id}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["title"], "Fresh Pasta");
    assert_eq!(body["price"], 11.25);
    assert_eq!(body["featured"], false);
}
