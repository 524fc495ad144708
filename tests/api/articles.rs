use reqwest::Method;
use serde_json::json;

use crate::support::{delete, get, ids, send, start_server};

#[tokio::test]
async fn lists_newest_first_with_drafts_last() {
    let base = start_server().await;
    let (status, body) = get(&base, "/api/articles").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 5);
    assert_eq!(body["count"], 5);
    assert_eq!(ids(&body), ["1", "3", "2", "5", "4"]);
    assert_eq!(body["pagination"]["totalPages"], 1);
    assert_eq!(body["pagination"]["currentPage"], 1);
}

#[tokio::test]
async fn filters_combine() {
    let base = start_server().await;

    let (_, body) = get(&base, "/api/articles?status=published").await;
    assert_eq!(ids(&body), ["1", "3", "2"]);

    let (_, body) = get(&base, "/api/articles?tag=ethereum").await;
    assert_eq!(ids(&body), ["2", "4"]);

    let (_, body) = get(&base, "/api/articles?tag=ethereum&status=draft").await;
    assert_eq!(ids(&body), ["4"]);

    let (_, body) = get(&base, "/api/articles?category=blockchain").await;
    assert_eq!(ids(&body), ["2"]);

    let (_, body) = get(&base, "/api/articles?q=LENDING").await;
    assert_eq!(ids(&body), ["4"]);
}

#[tokio::test]
async fn paginates_after_filtering() {
    let base = start_server().await;
    let (status, body) = get(&base, "/api/articles?limit=2&offset=2").await;
    assert_eq!(status, 200);
    assert_eq!(ids(&body), ["2", "5"]);
    assert_eq!(body["count"], 2);
    assert_eq!(body["total"], 5);
    assert_eq!(
        body["pagination"],
        json!({"limit": 2, "offset": 2, "total": 5, "totalPages": 3, "currentPage": 2})
    );

    let (_, body) = get(&base, "/api/articles?offset=50").await;
    assert_eq!(body["count"], 0);
    assert_eq!(body["total"], 5);
}

#[tokio::test]
async fn largest_offset_is_an_empty_page() {
    let base = start_server().await;
    let (status, body) = get(&base, &format!("/api/articles?offset={}&limit=1", u64::MAX)).await;
    assert_eq!(status, 200);
    assert_eq!(body["count"], 0);
    assert_eq!(body["total"], 5);
    assert_eq!(body["pagination"]["currentPage"], u64::MAX);
}

#[tokio::test]
async fn sorts_by_title_ascending() {
    let base = start_server().await;
    let (_, body) = get(&base, "/api/articles?sort=title&order=asc").await;
    assert_eq!(ids(&body), ["1", "4", "2", "5", "3"]);
}

#[tokio::test]
async fn get_by_id_and_missing_id() {
    let base = start_server().await;
    let (status, body) = get(&base, "/api/articles/2").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["slug"], "ethereum-2-upgrade-timeline");
    assert_eq!(body["data"]["status"], "published");

    let (status, body) = get(&base, "/api/articles/xyz").await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Article with ID xyz not found");
}

#[tokio::test]
async fn create_derives_slug_and_defaults_to_draft() {
    let base = start_server().await;
    let (status, body) = send(
        Method::POST,
        &base,
        "/api/articles",
        &json!({
            "title": "Solana Hits New High!",
            "content": "Body",
            "category": "crypto-news",
            "author": "Ana",
            "tags": ["solana", " solana ", ""]
        }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Article created successfully");
    let data = &body["data"];
    assert_eq!(data["slug"], "solana-hits-new-high");
    assert_eq!(data["status"], "draft");
    assert_eq!(data["publishedAt"], serde_json::Value::Null);
    assert_eq!(data["tags"], json!(["solana"]));

    let id = data["id"].as_str().unwrap();
    let (status, _) = get(&base, &format!("/api/articles/{id}")).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn create_reports_every_missing_field() {
    let base = start_server().await;
    let (status, body) = send(
        Method::POST,
        &base,
        "/api/articles",
        &json!({ "title": "Only a title", "author": "  " }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(
        body["error"],
        "Missing required fields: content, category, author"
    );
}

#[tokio::test]
async fn duplicate_slug_conflicts_and_changes_nothing() {
    let base = start_server().await;
    let (status, body) = send(
        Method::POST,
        &base,
        "/api/articles",
        &json!({
            "title": "Copy",
            "slug": "bitcoin-surges-past-60000",
            "content": "Body",
            "category": "crypto-news",
            "author": "Ana"
        }),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["success"], false);

    let (_, body) = get(&base, "/api/articles").await;
    assert_eq!(body["total"], 5);
}

#[tokio::test]
async fn unknown_category_is_rejected() {
    let base = start_server().await;
    let (status, _) = send(
        Method::POST,
        &base,
        "/api/articles",
        &json!({ "title": "T", "content": "C", "category": "gossip", "author": "A" }),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn update_publishes_and_stamps_published_at() {
    let base = start_server().await;
    let (status, body) = send(
        Method::PUT,
        &base,
        "/api/articles/4",
        &json!({ "status": "published", "excerpt": null }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Article updated successfully");
    assert_eq!(body["data"]["status"], "published");
    assert!(body["data"]["publishedAt"].is_string());
    assert_eq!(body["data"]["excerpt"], serde_json::Value::Null);

    let (_, body) = get(&base, "/api/articles?status=draft").await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn update_rejects_mismatched_body_id() {
    let base = start_server().await;
    let (status, _) = send(Method::PUT, &base, "/api/articles/1", &json!({ "id": "2" })).await;
    assert_eq!(status, 400);

    let (status, _) = send(Method::PUT, &base, "/api/articles/nope", &json!({ "title": "x" })).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn delete_then_delete_again() {
    let base = start_server().await;
    let (status, body) = delete(&base, "/api/articles/5").await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Article with ID 5 deleted successfully");

    let (status, body) = delete(&base, "/api/articles/5").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Article with ID 5 not found");

    let (_, body) = get(&base, "/api/articles").await;
    assert_eq!(body["total"], 4);
}

#[tokio::test]
async fn blank_filters_impose_no_constraint() {
    let base = start_server().await;
    let (status, body) = get(&base, "/api/articles?category=&tag=&author=%20&q=").await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 5);
}
