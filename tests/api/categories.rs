use reqwest::Method;
use serde_json::json;

use crate::support::{delete, get, ids, send, start_server};

#[tokio::test]
async fn lists_all_categories() {
    let base = start_server().await;
    let (status, body) = get(&base, "/api/categories").await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 8);
    assert_eq!(body["data"][0]["displayOrder"], 1);
}

#[tokio::test]
async fn filters_by_parent_and_name() {
    let base = start_server().await;
    let (_, body) = get(&base, "/api/categories?parentId=1").await;
    assert_eq!(ids(&body), ["7", "8"]);

    let (_, body) = get(&base, "/api/categories?name=CHAIN").await;
    assert_eq!(ids(&body), ["3"]);

    let (_, body) = get(&base, "/api/categories?sort=name&order=asc&limit=3").await;
    assert_eq!(ids(&body), ["7", "3", "1"]);
    assert_eq!(body["pagination"]["totalPages"], 3);
}

#[tokio::test]
async fn include_children_embeds_direct_children() {
    let base = start_server().await;
    let (status, body) = get(&base, "/api/categories/1?includeChildren=true").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["slug"], "crypto-news");
    let children: Vec<_> = body["data"]["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap())
        .collect();
    assert_eq!(children, ["bitcoin", "ethereum"]);

    let (_, body) = get(&base, "/api/categories/1").await;
    assert!(body["data"].get("children").is_none());
}

#[tokio::test]
async fn create_applies_defaults() {
    let base = start_server().await;
    let (status, body) = send(
        Method::POST,
        &base,
        "/api/categories",
        &json!({ "name": "Mining", "slug": "mining", "description": "Hash rates and hardware" }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Category created successfully");
    assert_eq!(body["data"]["color"], "#607D8B");
    assert_eq!(body["data"]["iconName"], "category");
    assert_eq!(body["data"]["parentId"], serde_json::Value::Null);
}

#[tokio::test]
async fn create_validates_input() {
    let base = start_server().await;
    let (status, body) = send(Method::POST, &base, "/api/categories", &json!({ "name": "X" })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Missing required fields: slug, description");

    let (status, _) = send(
        Method::POST,
        &base,
        "/api/categories",
        &json!({ "name": "X", "slug": "Bad Slug", "description": "d" }),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = send(
        Method::POST,
        &base,
        "/api/categories",
        &json!({ "name": "X", "slug": "x", "description": "d", "color": "blue" }),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = send(
        Method::POST,
        &base,
        "/api/categories",
        &json!({ "name": "X", "slug": "defi", "description": "d" }),
    )
    .await;
    assert_eq!(status, 409);
}

#[tokio::test]
async fn renaming_slug_refiles_articles() {
    let base = start_server().await;
    let (status, body) = send(
        Method::PUT,
        &base,
        "/api/categories/3",
        &json!({ "slug": "chain-tech" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["slug"], "chain-tech");

    let (_, body) = get(&base, "/api/articles/2").await;
    assert_eq!(body["data"]["category"], "chain-tech");
}

#[tokio::test]
async fn parent_cycles_are_rejected() {
    let base = start_server().await;
    let (status, _) = send(Method::PUT, &base, "/api/categories/1", &json!({ "parentId": "7" })).await;
    assert_eq!(status, 400);

    let (status, _) = send(Method::PUT, &base, "/api/categories/1", &json!({ "parentId": "1" })).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn delete_guards_children_and_articles() {
    let base = start_server().await;
    let (status, _) = delete(&base, "/api/categories/1").await;
    assert_eq!(status, 400);

    let (status, _) = delete(&base, "/api/categories/6").await;
    assert_eq!(status, 400);

    let (status, body) = delete(&base, "/api/categories/8").await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Category with ID 8 deleted successfully");

    let (status, _) = delete(&base, "/api/categories/8").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn blank_filters_impose_no_constraint() {
    let base = start_server().await;
    let (status, body) = get(&base, "/api/categories?slug=&parentId=&name=").await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 8);
}
