//! End-to-end account and link flows over the full router.

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_account_lifecycle() {
    let server = common::test_server();

    let registered = server
        .post("/users/register")
        .json(&json!({ "username": "alice", "email": "a@x.com", "password": "pw" }))
        .await;
    registered.assert_status(StatusCode::CREATED);
    let user_id = registered.json::<Value>()["user"]["id"].clone();

    let login = server
        .post("/users/login")
        .json(&json!({ "email": "a@x.com", "password": "pw" }))
        .await;
    login.assert_status_ok();
    let token = login.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string();

    let profile = server
        .get("/users/profile")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(profile["user"]["id"], user_id);
    assert_eq!(profile["user"]["username"], "alice");
    assert!(profile["user"].get("password_hash").is_none());

    let api_key = server
        .post("/users/api-key")
        .authorization_bearer(&token)
        .await
        .json::<Value>()["api_key"]
        .as_str()
        .unwrap()
        .to_string();

    server
        .put("/users/profile")
        .authorization_bearer(&token)
        .json(&json!({ "email": "alice@new.example" }))
        .await
        .assert_status_ok();

    let profile = server
        .get("/users/profile")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(profile["user"]["email"], "alice@new.example");
    assert_eq!(profile["user"]["username"], "alice");
    assert_eq!(profile["user"]["api_key"], api_key);
    assert!(profile["user"].get("password_hash").is_none());

    // Old email no longer logs in, new one does.
    server
        .post("/users/login")
        .json(&json!({ "email": "a@x.com", "password": "pw" }))
        .await
        .assert_status_unauthorized();
    server
        .post("/users/login")
        .json(&json!({ "email": "alice@new.example", "password": "pw" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_shorten_inspect_redirect() {
    let server = common::test_server();

    let created = server
        .post("/urls")
        .json(&json!({ "original_url": "https://www.rust-lang.org/learn" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let created = created.json::<Value>();
    let code = created["short_code"].as_str().unwrap();

    let inspected = server.get(&format!("/urls/{code}")).await.json::<Value>();
    assert_eq!(inspected["short_url"], created["short_url"]);

    let redirect = server.get(&format!("/{code}")).await;
    redirect.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(redirect.header("location"), "https://www.rust-lang.org/learn");
}

#[tokio::test]
async fn test_links_get_distinct_codes() {
    let server = common::test_server();
    let mut codes = std::collections::HashSet::new();

    for i in 0..50 {
        let created = server
            .post("/urls")
            .json(&json!({ "original_url": format!("https://example.com/{i}") }))
            .await
            .json::<Value>();
        codes.insert(created["short_code"].as_str().unwrap().to_string());
    }

    assert_eq!(codes.len(), 50);
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = linkvault::routes::app_router(common::create_test_state());

    let response = app
        .oneshot(Request::get("/health/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
