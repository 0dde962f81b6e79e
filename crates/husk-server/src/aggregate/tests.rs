//! Unit tests for the fan-out aggregator

use super::*;

use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn detail_body(name: &str, favers: u64) -> serde_json::Value {
    serde_json::json!({
        "package": {
            "name": name,
            "description": "A test package",
            "time": "2023-04-12T09:33:28+00:00",
            "type": "library",
            "repository": format!("https://github.com/{name}"),
            "downloads": { "total": 100, "monthly": 10, "daily": 1 },
            "favers": favers
        }
    })
}

async fn mount_list(server: &MockServer, vendor: &str, names: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/packages/list.json"))
        .and(query_param("vendor", vendor))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "packageNames": names
        })))
        .mount(server)
        .await;
}

fn aggregator(server: &MockServer, config: AggregateConfig) -> Aggregator {
    let client = PackagistClient::with_base_url(server.uri()).unwrap();
    Aggregator::new(client, config)
}

#[tokio::test]
async fn test_every_enumerated_package_is_fetched() {
    let server = MockServer::start().await;
    mount_list(&server, "acme", &["acme/foo", "acme/bar"]).await;

    Mock::given(method("GET"))
        .and(path("/packages/acme/foo.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body("acme/foo", 1)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/packages/acme/bar.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body("acme/bar", 2)))
        .mount(&server)
        .await;

    let catalog = aggregator(&server, AggregateConfig::default())
        .fetch_vendor("acme")
        .await
        .unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog["acme/foo"].favers, 1);
    assert_eq!(catalog["acme/bar"].favers, 2);
    // BTreeMap iteration is sorted by package name
    let keys: Vec<_> = catalog.keys().cloned().collect();
    assert_eq!(keys, vec!["acme/bar", "acme/foo"]);
}

#[tokio::test]
async fn test_empty_vendor_yields_empty_catalog() {
    let server = MockServer::start().await;
    mount_list(&server, "ghost", &[]).await;

    let catalog = aggregator(&server, AggregateConfig::default())
        .fetch_vendor("ghost")
        .await
        .unwrap();

    assert!(catalog.is_empty());
}

#[tokio::test]
async fn test_enumeration_failure_fails_the_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/packages/list.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = aggregator(&server, AggregateConfig::default())
        .fetch_vendor("acme")
        .await;

    assert!(result.unwrap_err().is_upstream());
}

#[tokio::test]
async fn test_single_failed_detail_voids_the_whole_catalog() {
    let server = MockServer::start().await;
    mount_list(&server, "acme", &["acme/foo", "acme/bar", "acme/baz"]).await;

    Mock::given(method("GET"))
        .and(path("/packages/acme/foo.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body("acme/foo", 1)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/packages/acme/bar.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/packages/acme/baz.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body("acme/baz", 3)))
        .mount(&server)
        .await;

    let result = aggregator(&server, AggregateConfig::default())
        .fetch_vendor("acme")
        .await;

    // fail-fast: no N-1 partial catalog ever escapes
    assert!(result.unwrap_err().is_upstream());
}

#[tokio::test]
async fn test_missing_package_voids_the_whole_catalog() {
    let server = MockServer::start().await;
    mount_list(&server, "acme", &["acme/foo", "acme/gone"]).await;

    Mock::given(method("GET"))
        .and(path("/packages/acme/foo.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body("acme/foo", 1)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/packages/acme/gone.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = aggregator(&server, AggregateConfig::default())
        .fetch_vendor("acme")
        .await;

    assert!(matches!(
        result.unwrap_err(),
        HuskError::PackageNotFound { name } if name == "acme/gone"
    ));
}

#[tokio::test]
async fn test_deadline_expiry_returns_promptly() {
    let server = MockServer::start().await;
    mount_list(&server, "acme", &["acme/slow"]).await;

    Mock::given(method("GET"))
        .and(path("/packages/acme/slow.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(detail_body("acme/slow", 1))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = AggregateConfig {
        deadline: Duration::from_millis(250),
        ..AggregateConfig::default()
    };

    let started = std::time::Instant::now();
    let result = aggregator(&server, config).fetch_vendor("acme").await;
    let elapsed = started.elapsed();

    assert!(matches!(
        result.unwrap_err(),
        HuskError::DeadlineExceeded { vendor, .. } if vendor == "acme"
    ));
    // deadline plus scheduling slack, nowhere near the 5s upstream delay
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
}

#[tokio::test]
async fn test_bounded_pool_still_completes() {
    let server = MockServer::start().await;
    mount_list(&server, "acme", &["acme/a", "acme/b", "acme/c"]).await;

    for name in ["acme/a", "acme/b", "acme/c"] {
        Mock::given(method("GET"))
            .and(path(format!("/packages/{name}.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_body(name, 1)))
            .mount(&server)
            .await;
    }

    let config = AggregateConfig {
        max_in_flight: 1,
        ..AggregateConfig::default()
    };

    let catalog = aggregator(&server, config).fetch_vendor("acme").await.unwrap();
    assert_eq!(catalog.len(), 3);
}
