//! Integration tests for the catalog crawl
//!
//! These tests use wiremock to serve captured catalog pages and drive the real
//! blocking HTTP fetcher end-to-end. Blocking work runs on tokio's blocking
//! pool so the mock server keeps answering.

use handset_harvest::config::{FetcherConfig, DEFAULT_USER_AGENT};
use handset_harvest::{
    fetch_device_header, fetch_device_specs, list_brands_at, list_devices, CatalogError,
    DeviceSummary, HttpFetcher,
};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MAKERS: &str = include_str!("../fixtures/makers.html");
const BRAND_PAGE_1: &str = include_str!("../fixtures/brand_page_1.html");
const BRAND_PAGE_2: &str = include_str!("../fixtures/brand_page_2.html");
const DEVICE_PAGE: &str = include_str!("../fixtures/device_page.html");

/// Serves `body` as HTML at `route`
async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Runs `work` with a fresh HTTP fetcher on the blocking pool
async fn with_fetcher<T, W>(config: FetcherConfig, work: W) -> T
where
    T: Send + 'static,
    W: FnOnce(&HttpFetcher) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let fetcher = HttpFetcher::new(&config).expect("Failed to build fetcher");
        work(&fetcher)
    })
    .await
    .expect("Blocking task panicked")
}

#[tokio::test]
async fn test_two_page_device_listing() {
    let server = MockServer::start().await;
    mount_page(&server, "/samsung-phones-9.php", BRAND_PAGE_1).await;
    mount_page(&server, "/samsung-phones-f-9-0-p2.php", BRAND_PAGE_2).await;

    let start = format!("{}/samsung-phones-9.php", server.uri());
    let devices: Vec<DeviceSummary> = with_fetcher(FetcherConfig::default(), move |fetcher| {
        list_devices(fetcher, &start, 0).collect::<Result<Vec<_>, _>>()
    })
    .await
    .expect("Listing failed");

    assert_eq!(devices.len(), 4);
    assert_eq!(devices[0].title, "Galaxy S24 Ultra");
    assert_eq!(devices[3].title, "Galaxy S23 FE");
    for device in &devices {
        assert!(!device.title.is_empty());
        assert!(!device.extended_title.is_empty());
        assert!(!device.image_link.is_empty());
        assert!(device.detail_link.starts_with(&server.uri()));
    }

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_listing_with_jitter() {
    let server = MockServer::start().await;
    mount_page(&server, "/samsung-phones-9.php", BRAND_PAGE_1).await;
    mount_page(&server, "/samsung-phones-f-9-0-p2.php", BRAND_PAGE_2).await;

    let start = format!("{}/samsung-phones-9.php", server.uri());
    let count = with_fetcher(FetcherConfig::default(), move |fetcher| {
        list_devices(fetcher, &start, 5).filter(Result::is_ok).count()
    })
    .await;

    assert_eq!(count, 4);
}

#[tokio::test]
async fn test_brand_index() {
    let server = MockServer::start().await;
    mount_page(&server, "/makers.php3", MAKERS).await;

    let index = format!("{}/makers.php3", server.uri());
    let brands = with_fetcher(FetcherConfig::default(), move |fetcher| {
        list_brands_at(fetcher, &index).collect::<Result<Vec<_>, _>>()
    })
    .await
    .expect("Brand listing failed");

    assert_eq!(brands.len(), 4);
    assert_eq!(brands[0].id, "acer-phones-59");
    assert_eq!(brands[0].device_count, 100);
    assert_eq!(
        brands[3].catalog_link,
        format!("{}/samsung-phones-9.php", server.uri())
    );
}

#[tokio::test]
async fn test_index_to_device_detail() {
    let server = MockServer::start().await;
    mount_page(&server, "/makers.php3", MAKERS).await;
    mount_page(&server, "/samsung-phones-9.php", BRAND_PAGE_1).await;
    mount_page(&server, "/samsung-phones-f-9-0-p2.php", BRAND_PAGE_2).await;
    mount_page(&server, "/samsung_galaxy_s24_ultra-12771.php", DEVICE_PAGE).await;

    let index = format!("{}/makers.php3", server.uri());
    let (header, specs) = with_fetcher(FetcherConfig::default(), move |fetcher| {
        let samsung = list_brands_at(fetcher, &index)
            .filter_map(Result::ok)
            .find(|brand| brand.name == "Samsung")
            .expect("Samsung not listed");
        let first = list_devices(fetcher, &samsung.catalog_link, 0)
            .next()
            .expect("No devices")
            .expect("First device failed");
        (
            fetch_device_header(fetcher, &first.detail_link),
            fetch_device_specs(fetcher, &first.detail_link),
        )
    })
    .await;

    let header = header.expect("Header extraction failed");
    let specs = specs.expect("Specs extraction failed");
    assert_eq!(header.model_name, "Samsung Galaxy S24 Ultra");
    assert_eq!(header.released, "Released 2024, January 24");
    assert_eq!(specs.model_name, "Samsung Galaxy S24 Ultra");
    assert_eq!(specs.main_camera_type.as_deref(), Some("Quad"));
    assert_eq!(specs.selfie_camera_type.as_deref(), Some("Single"));
}

#[tokio::test]
async fn test_http_error_status_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken-1.php"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let base = server.uri();
    let (detail, listing) = with_fetcher(FetcherConfig::default(), move |fetcher| {
        let detail = fetch_device_header(fetcher, &format!("{}/broken-1.php", base));
        let listing: Vec<_> = list_devices(fetcher, &format!("{}/missing.php", base), 0).collect();
        (detail, listing)
    })
    .await;

    assert!(matches!(
        detail,
        Err(CatalogError::UpstreamHttp { status: 500, .. })
    ));
    assert_eq!(listing.len(), 1);
    assert!(matches!(
        listing[0],
        Err(CatalogError::UpstreamHttp { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_second_page_failure_keeps_first_page() {
    let server = MockServer::start().await;
    mount_page(&server, "/samsung-phones-9.php", BRAND_PAGE_1).await;
    Mock::given(method("GET"))
        .and(path("/samsung-phones-f-9-0-p2.php"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let start = format!("{}/samsung-phones-9.php", server.uri());
    let results = with_fetcher(FetcherConfig::default(), move |fetcher| {
        list_devices(fetcher, &start, 0).collect::<Vec<_>>()
    })
    .await;

    assert_eq!(results.len(), 4);
    assert!(results[..3].iter().all(Result::is_ok));
    assert!(matches!(
        results[3],
        Err(CatalogError::UpstreamHttp { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_browser_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/samsung_galaxy_s24_ultra-12771.php"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(DEVICE_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/samsung_galaxy_s24_ultra-12771.php", server.uri());
    let header = with_fetcher(FetcherConfig::default(), move |fetcher| {
        fetch_device_header(fetcher, &url)
    })
    .await;

    assert_eq!(header.unwrap().model_name, "Samsung Galaxy S24 Ultra");
}

#[tokio::test]
async fn test_preconfigured_client_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/samsung_galaxy_s24_ultra-12771.php"))
        .and(header("user-agent", "catalog-mirror/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DEVICE_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/samsung_galaxy_s24_ultra-12771.php", server.uri());
    let specs = tokio::task::spawn_blocking(move || {
        let client = reqwest::blocking::Client::builder()
            .user_agent("catalog-mirror/2.0")
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build client");
        fetch_device_specs(&HttpFetcher::with_client(client), &url)
    })
    .await
    .expect("Blocking task panicked");

    assert_eq!(specs.unwrap().model_name, "Samsung Galaxy S24 Ultra");
}

#[tokio::test]
async fn test_index_without_table_is_page_level() {
    let server = MockServer::start().await;
    mount_page(&server, "/makers.php3", "<html><body><p>Down for maintenance</p></body></html>").await;

    let index = format!("{}/makers.php3", server.uri());
    let results = with_fetcher(FetcherConfig::default(), move |fetcher| {
        list_brands_at(fetcher, &index).collect::<Vec<_>>()
    })
    .await;

    assert_eq!(results.len(), 1);
    let err = results[0].as_ref().unwrap_err();
    assert!(matches!(err, CatalogError::PageLayout { .. }));
    assert!(!err.is_entry_level());
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(DEVICE_PAGE)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let url = format!("{}/slow.php", server.uri());
    let config = FetcherConfig {
        timeout_secs: 1,
        ..FetcherConfig::default()
    };
    let result = with_fetcher(config, move |fetcher| fetch_device_specs(fetcher, &url)).await;

    let err = result.unwrap_err();
    assert!(matches!(err, CatalogError::Timeout { .. }));
    assert!(err.is_network());
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Nothing listens on the discard port
    let url = "http://127.0.0.1:9/makers.php3".to_string();

    let results = with_fetcher(FetcherConfig::default(), move |fetcher| {
        list_brands_at(fetcher, &url).collect::<Vec<_>>()
    })
    .await;

    assert_eq!(results.len(), 1);
    assert!(results[0].as_ref().unwrap_err().is_network());
}
