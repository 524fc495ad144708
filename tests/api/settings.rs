use reqwest::Method;
use serde_json::json;

use crate::support::{get, send, start_server};

#[tokio::test]
async fn reads_whole_tree_and_single_section() {
    let base = start_server().await;
    let (status, body) = get(&base, "/api/settings").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["site"]["name"], "CoinDailyNews");
    assert_eq!(body["data"]["features"]["priceTicker"]["refreshInterval"], 60);

    let (status, body) = get(&base, "/api/settings?section=social").await;
    assert_eq!(status, 200);
    let data = body["data"].as_object().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data["social"]["telegram"], "https://t.me/coindailynews");

    let (status, _) = get(&base, "/api/settings?section=billing").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn update_merges_deeply() {
    let base = start_server().await;
    let (status, body) = send(
        Method::PUT,
        &base,
        "/api/settings",
        &json!({ "site": { "tagline": "Fresh" }, "features": { "priceTicker": { "coins": ["bitcoin"] } } }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Settings updated successfully");
    assert_eq!(body["data"]["site"]["tagline"], "Fresh");
    assert_eq!(body["data"]["site"]["name"], "CoinDailyNews");
    assert_eq!(body["data"]["features"]["priceTicker"]["coins"], json!(["bitcoin"]));
    assert_eq!(body["data"]["features"]["priceTicker"]["enabled"], true);

    let (_, body) = get(&base, "/api/settings?section=site").await;
    assert_eq!(body["data"]["site"]["tagline"], "Fresh");
}

#[tokio::test]
async fn update_rejects_bad_trees() {
    let base = start_server().await;
    for patch in [
        json!({}),
        json!([1, 2]),
        json!({ "site": { "name": " " } }),
        json!({ "site": { "unknownKey": 1 } }),
        json!({ "footer": { "showSocialLinks": "yes" } }),
    ] {
        let (status, body) = send(Method::PUT, &base, "/api/settings", &patch).await;
        assert_eq!(status, 400, "{patch}");
        assert_eq!(body["success"], false);
    }

    let (_, body) = get(&base, "/api/settings?section=site").await;
    assert_eq!(body["data"]["site"]["name"], "CoinDailyNews");
}
