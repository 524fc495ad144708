use std::sync::Arc;

use coindaily::http::{self, AppState};
use coindaily::{InMemoryModelStore, Service};
use serde_json::Value;

/// Bind to port 0 and return the base URL.
pub async fn start_server() -> String {
    start_with(|state| state).await
}

pub async fn start_with(
    configure: impl FnOnce(AppState<InMemoryModelStore>) -> AppState<InMemoryModelStore>,
) -> String {
    let service = Service::new(InMemoryModelStore::new());
    service.seed_if_empty().unwrap();
    let app = http::router(configure(AppState::new(Arc::new(service))));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn get(base: &str, path: &str) -> (u16, Value) {
    let resp = reqwest::get(format!("{base}{path}")).await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

pub async fn send(method: reqwest::Method, base: &str, path: &str, body: &Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .request(method, format!("{base}{path}"))
        .json(body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

pub async fn delete(base: &str, path: &str) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .delete(format!("{base}{path}"))
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

pub fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}
