use std::time::{Duration, Instant};

use reqwest::Method;
use serde_json::json;

use crate::support::{get, send, start_server, start_with};

#[tokio::test]
async fn draft_from_url_is_filed_as_draft_article() {
    let base = start_server().await;
    let (status, body) = send(
        Method::POST,
        &base,
        "/api/ai-article/drafts",
        &json!({
            "source": { "kind": "url", "url": "https://news.example/etf" },
            "customTitle": "Spot ETF Flows"
        }),
    )
    .await;
    assert_eq!(status, 201);
    let draft = &body["data"];
    assert_eq!(draft["article"]["title"], "Analysis: Spot ETF Flows");
    assert_eq!(draft["article"]["status"], "draft");
    assert_eq!(draft["article"]["category"], "market-analysis");
    assert_eq!(draft["inputType"], "url");
    assert!(draft["contentScore"].as_u64().unwrap() >= 80);

    let (_, body) = get(&base, "/api/articles?author=AI%20Assistant").await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn rss_draft_needs_feeds() {
    let base = start_server().await;
    let (status, _) = send(
        Method::POST,
        &base,
        "/api/ai-article/drafts",
        &json!({ "source": { "kind": "rss", "feeds": [] } }),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = send(
        Method::POST,
        &base,
        "/api/ai-article/drafts",
        &json!({ "source": { "kind": "fax" } }),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn draft_waits_for_configured_delay() {
    let base = start_with(|state| state.draft_delay(Duration::from_millis(150))).await;
    let started = Instant::now();
    let (status, _) = send(
        Method::POST,
        &base,
        "/api/ai-article/drafts",
        &json!({ "source": { "kind": "website", "url": "https://example.com", "topicFocus": "DeFi" } }),
    )
    .await;
    assert_eq!(status, 201);
    assert!(started.elapsed() >= Duration::from_millis(150));
}
