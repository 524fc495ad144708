use reqwest::Method;
use serde_json::json;

use crate::support::{get, ids, send, start_server};

#[tokio::test]
async fn ticker_defaults_to_rank_order() {
    let base = start_server().await;
    let (status, body) = get(&base, "/api/price-ticker").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body), ["bitcoin", "ethereum", "binancecoin", "cardano", "solana"]);
    assert_eq!(body["meta"]["vs_currency"], "usd");
    assert_eq!(body["meta"]["count"], 5);
    assert_eq!(body["meta"]["include_market_data"], true);
    assert!(body["data"][0]["market_cap"].is_number());
}

#[tokio::test]
async fn ticker_selects_ids_and_sorts() {
    let base = start_server().await;
    let (_, body) = get(
        &base,
        "/api/price-ticker?ids=solana,bitcoin&sort=current_price&order=asc",
    )
    .await;
    assert_eq!(ids(&body), ["solana", "bitcoin"]);

    let (_, body) = get(&base, "/api/price-ticker?sort=price_change_percentage_7d").await;
    assert_eq!(ids(&body)[0], "solana");
}

#[tokio::test]
async fn ticker_can_drop_market_data() {
    let base = start_server().await;
    let (_, body) = get(&base, "/api/price-ticker?ids=ethereum&include_market_data=false").await;
    let entry = &body["data"][0];
    assert_eq!(entry["id"], "ethereum");
    assert!(entry["current_price"].is_number());
    assert!(entry.get("market_cap").is_none());
    assert_eq!(body["meta"]["include_market_data"], false);
}

#[tokio::test]
async fn ticker_rejects_unknown_coin_and_currency() {
    let base = start_server().await;
    let (status, body) = get(&base, "/api/price-ticker?ids=bitcoin,dogecoin").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Price data for dogecoin not available");

    let (status, _) = get(&base, "/api/price-ticker?vs_currency=eur").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn history_has_one_point_per_day_plus_today() {
    let base = start_server().await;
    let (status, body) = send(
        Method::POST,
        &base,
        "/api/price-ticker",
        &json!({ "coin": "bitcoin", "days": 3 }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["coin"], "bitcoin");
    assert_eq!(body["days"], 3);
    let points = body["data"].as_array().unwrap();
    assert_eq!(points.len(), 4);
    for point in points {
        let price = point["price"].as_f64().unwrap();
        assert!((57832.45 * 0.95..=57832.45 * 1.05).contains(&price), "{price}");
    }
}

#[tokio::test]
async fn history_validates_request() {
    let base = start_server().await;
    let (status, body) = send(Method::POST, &base, "/api/price-ticker", &json!({})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Coin parameter is required");

    let (status, _) = send(
        Method::POST,
        &base,
        "/api/price-ticker",
        &json!({ "coin": "bitcoin", "days": 0 }),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = send(Method::POST, &base, "/api/price-ticker", &json!({ "coin": "dogecoin" })).await;
    assert_eq!(status, 404);
}
