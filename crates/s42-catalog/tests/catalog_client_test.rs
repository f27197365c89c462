//! Contract tests for CatalogClient and CachedCatalog against the PocketBase records API.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET | `/api/collections/studio42_game_list/records` | `games_*` |
//! | GET | `/api/collections/studio42_pagedata/records/{id}` | `main_page_*`, `landing_*` |

use std::time::Duration;

use s42_catalog::{CachedCatalog, CatalogClient, CatalogConfig, CatalogError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GAMES_PATH: &str = "/api/collections/studio42_game_list/records";
const PAGE_PATH: &str = "/api/collections/studio42_pagedata/records/hv124z72j9e48zb";

fn test_config(mock_server: &MockServer) -> CatalogConfig {
    let mut config = CatalogConfig::with_base_url(mock_server.uri().parse().unwrap());
    config.timeout_secs = 5;
    config
}

fn test_client(mock_server: &MockServer) -> CatalogClient {
    CatalogClient::new(test_config(mock_server)).unwrap()
}

// ── Game list ────────────────────────────────────────────────────────

#[tokio::test]
async fn games_returns_items() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "page": 1,
            "perPage": 30,
            "totalItems": 2,
            "items": [
                {
                    "id": "rec1",
                    "collectionId": "col1",
                    "name": "Pong",
                    "description": "Classic.",
                    "file_folder": "pong",
                    "img": "pong.png"
                },
                {
                    "id": "rec2",
                    "name": "Tetris"
                }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let games = test_client(&mock_server).games().await.unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].name, "Pong");
    assert_eq!(games[0].file_folder, "pong");
    assert_eq!(games[0].collection_id, "col1");
    assert!(games[1].file_folder.is_empty());
}

#[tokio::test]
async fn games_handles_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&mock_server)
        .await;

    match test_client(&mock_server).games().await.unwrap_err() {
        CatalogError::Api { status, body, .. } => {
            assert_eq!(status, 403);
            assert_eq!(body, "forbidden");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn games_rejects_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).games().await.unwrap_err();
    assert!(matches!(err, CatalogError::Deserialization { .. }), "got: {err:?}");
}

#[tokio::test]
async fn unreachable_catalog_is_http_error() {
    let mut config = CatalogConfig::with_base_url("http://127.0.0.1:1".parse().unwrap());
    config.timeout_secs = 1;
    let err = CatalogClient::new(config).unwrap().games().await.unwrap_err();
    assert!(matches!(err, CatalogError::Http { .. }), "got: {err:?}");
}

// ── Page data ────────────────────────────────────────────────────────

#[tokio::test]
async fn main_page_returns_markdown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "hv124z72j9e48zb",
            "main_text": "# Welcome\n\nHello."
        })))
        .mount(&mock_server)
        .await;

    let md = test_client(&mock_server).main_page_markdown().await.unwrap();
    assert_eq!(md, "# Welcome\n\nHello.");
}

#[tokio::test]
async fn main_page_not_found_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PAGE_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).main_page_markdown().await.unwrap_err();
    assert!(matches!(err, CatalogError::Api { status: 404, .. }));
}

// ── Cache ────────────────────────────────────────────────────────────

#[tokio::test]
async fn landing_html_is_rendered_and_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main_text": "# Welcome"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let catalog = CachedCatalog::new(test_client(&mock_server), Duration::from_secs(60));
    let first = catalog.landing_html().await.unwrap();
    let second = catalog.landing_html().await.unwrap();

    assert!(first.contains("<h1>Welcome</h1>"));
    assert_eq!(first, second);
    // `.expect(1)` is verified when the mock server drops.
}

#[tokio::test]
async fn games_are_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GAMES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"id": "rec1", "name": "Pong"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let catalog = CachedCatalog::new(test_client(&mock_server), Duration::from_secs(60));
    assert_eq!(catalog.games().await.unwrap().len(), 1);
    assert_eq!(catalog.games().await.unwrap().len(), 1);
}

#[tokio::test]
async fn errors_are_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PAGE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    let catalog = CachedCatalog::new(test_client(&mock_server), Duration::from_secs(60));
    assert!(catalog.landing_html().await.is_err());
    assert!(catalog.landing_html().await.is_err());
}

#[tokio::test]
async fn expired_entries_are_refetched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main_text": "hi"
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let catalog = CachedCatalog::new(test_client(&mock_server), Duration::ZERO);
    catalog.landing_html().await.unwrap();
    catalog.landing_html().await.unwrap();
}

#[tokio::test]
async fn from_config_uses_configured_ttl() {
    let mock_server = MockServer::start().await;
    let mut config = test_config(&mock_server);
    config.cache_ttl_secs = 0;
    let catalog = CachedCatalog::from_config(config).unwrap();
    assert_eq!(catalog.client().config().cache_ttl_secs, 0);
}
