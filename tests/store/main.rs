//! Service over the SQLite store: content written through one service
//! instance is visible after reopening the database file.

#![cfg(feature = "sqlite")]

use coindaily::content::{ArticleListParams, ArticlePatch, ArticleStatus, NewArticle, NewCategory};
use coindaily::{Service, SqliteModelStore};
use serde_json::json;

fn open(path: &std::path::Path) -> Service<SqliteModelStore> {
    Service::new(SqliteModelStore::open(path).unwrap())
}

#[test]
fn seeding_happens_once_per_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.sqlite3");

    assert!(open(&path).seed_if_empty().unwrap());
    assert!(!open(&path).seed_if_empty().unwrap());

    let service = open(&path);
    let page = service.list_articles(&ArticleListParams::default()).unwrap();
    assert_eq!(page.total(), 5);
}

#[test]
fn writes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.sqlite3");

    let created = {
        let service = open(&path);
        service.seed_if_empty().unwrap();
        service
            .create_category(NewCategory {
                name: Some("Mining".into()),
                slug: Some("mining".into()),
                description: Some("Hash rates".into()),
                ..Default::default()
            })
            .unwrap();
        let article = service
            .create_article(NewArticle {
                title: Some("Hash Rate Record".into()),
                content: Some("Body".into()),
                category: Some("mining".into()),
                author: Some("Ana".into()),
                ..Default::default()
            })
            .unwrap();
        service
            .update_article(
                &article.id,
                ArticlePatch {
                    status: Some(ArticleStatus::Published),
                    ..Default::default()
                },
            )
            .unwrap();
        service
            .update_settings(json!({ "site": { "tagline": "Persisted" } }))
            .unwrap();
        service.delete_article("5").unwrap();
        article
    };

    let service = open(&path);
    let article = service.get_article(&created.id).unwrap();
    assert_eq!(article.slug, "hash-rate-record");
    assert_eq!(article.status, ArticleStatus::Published);
    assert!(article.published_at.is_some());

    let settings = service.settings(None).unwrap();
    assert_eq!(settings["site"]["tagline"], "Persisted");
    assert_eq!(settings["site"]["name"], "CoinDailyNews");

    assert_eq!(service.get_article("5").unwrap_err().status_code(), 404);
    let page = service.list_articles(&ArticleListParams::default()).unwrap();
    assert_eq!(page.total(), 5);
}

#[test]
fn deleted_articles_stay_deleted_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.sqlite3");

    {
        let service = open(&path);
        service.seed_if_empty().unwrap();
        for id in ["1", "2", "3", "4", "5"] {
            service.delete_article(id).unwrap();
        }
    }

    let service = open(&path);
    assert!(!service.seed_if_empty().unwrap());
    let page = service.list_articles(&ArticleListParams::default()).unwrap();
    assert_eq!(page.total(), 0);
}
