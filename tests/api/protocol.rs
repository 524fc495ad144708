use reqwest::Method;
use serde_json::json;

use crate::support::{get, send, start_server};

#[tokio::test]
async fn health_check() {
    let base = start_server().await;
    let (status, body) = get(&base, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["ok"], true);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn wrong_method_gets_405_with_allow() {
    let base = start_server().await;
    let resp = reqwest::Client::new()
        .patch(format!("{base}/api/articles/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);
    assert_eq!(resp.headers()["allow"], "GET, PUT, DELETE");
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "success": false, "error": "Method PATCH Not Allowed" }));

    let resp = reqwest::Client::new()
        .delete(format!("{base}/api/settings"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);
    assert_eq!(resp.headers()["allow"], "GET, PUT");
}

#[tokio::test]
async fn unknown_path_is_404_envelope() {
    let base = start_server().await;
    let (status, body) = get(&base, "/api/authors").await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn responses_are_not_cacheable() {
    let base = start_server().await;
    for path in ["/api/articles", "/api/articles/missing", "/api/price-ticker"] {
        let resp = reqwest::get(format!("{base}{path}")).await.unwrap();
        assert_eq!(resp.headers()["cache-control"], "no-store, max-age=0", "{path}");
    }
}

#[tokio::test]
async fn bad_query_strings_are_400() {
    let base = start_server().await;
    for path in [
        "/api/articles?colour=red",
        "/api/articles?limit=0",
        "/api/articles?limit=101",
        "/api/articles?limit=ten",
        "/api/articles?sort=views",
        "/api/articles?order=sideways",
        "/api/categories?includeChildren=true",
    ] {
        let (status, body) = get(&base, path).await;
        assert_eq!(status, 400, "{path}");
        assert_eq!(body["success"], false, "{path}");
    }
}

#[tokio::test]
async fn bad_bodies_are_400() {
    let base = start_server().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/articles"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let (status, _) = send(
        Method::POST,
        &base,
        "/api/articles",
        &json!({ "title": "T", "content": "C", "category": "defi", "author": "A", "views": 3 }),
    )
    .await;
    assert_eq!(status, 400);
}
