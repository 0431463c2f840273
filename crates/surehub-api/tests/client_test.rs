#![allow(clippy::unwrap_used)]
// Integration tests for `SureApiClient` using wiremock.

use reqwest::Method;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use surehub_api::transport::TransportConfig;
use surehub_api::{Credentials, Error, SureApiClient};

// ── Helpers ─────────────────────────────────────────────────────────

/// A token that passes the client-side shape check.
fn plausible_token() -> String {
    let mut token = String::from("eyJ");
    while token.len() < 360 {
        token.push('a');
    }
    token
}

async fn setup_with_token() -> (MockServer, SureApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = SureApiClient::with_base_url(
        base_url,
        Credentials::Token(plausible_token()),
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

async fn setup_with_credentials() -> (MockServer, SureApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = SureApiClient::with_base_url(
        base_url,
        Credentials::EmailPassword {
            email: "cats@example.com".into(),
            password: "hunter2".to_string().into(),
        },
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_stores_token() {
    let (server, mut client) = setup_with_credentials().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "token": "tok-123" } })),
        )
        .mount(&server)
        .await;

    client.login().await.unwrap();
    assert_eq!(client.auth_token(), Some("tok-123"));
}

#[tokio::test]
async fn test_login_failure() {
    let (server, mut client) = setup_with_credentials().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("wrong password"))
        .mount(&server)
        .await;

    let result = client.login().await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_call_logs_in_lazily() {
    let (server, mut client) = setup_with_credentials().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "token": "tok-lazy" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/timeline"))
        .and(header("Authorization", "Bearer tok-lazy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let body = client.call(Method::GET, "timeline", None).await.unwrap();

    assert_eq!(body, Some(json!({ "data": [] })));
    assert_eq!(client.auth_token(), Some("tok-lazy"));
}

#[tokio::test]
async fn test_token_only_client_cannot_renew() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    // Malformed token: discarded at construction, leaving no way to auth.
    let mut client = SureApiClient::with_base_url(
        base_url,
        Credentials::Token("not-a-real-token".into()),
        &TransportConfig::default(),
    )
    .unwrap();

    let result = client.call(Method::GET, "timeline", None).await;

    assert!(matches!(result, Err(Error::NoCredentials)));
}

#[tokio::test]
async fn test_401_discards_token() {
    let (server, mut client) = setup_with_token().await;

    Mock::given(method("GET"))
        .and(path("/me/start"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.call(Method::GET, "me/start", None).await;

    assert!(matches!(result, Err(Error::TokenExpired)));
    assert_eq!(client.auth_token(), None);
}

// ── Call mechanics ──────────────────────────────────────────────────

#[tokio::test]
async fn test_call_caches_response_by_resource() {
    let (server, mut client) = setup_with_token().await;

    let body = json!({ "data": { "devices": [], "pets": [] } });

    Mock::given(method("GET"))
        .and(path("/me/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let fetched = client.call(Method::GET, "me/start", None).await.unwrap();

    assert_eq!(fetched.as_ref(), Some(&body));
    assert_eq!(client.cached("me/start"), Some(&body));
    assert_eq!(client.resources().len(), 1);
}

#[tokio::test]
async fn test_call_soft_fails_on_server_error() {
    let (server, mut client) = setup_with_token().await;

    Mock::given(method("GET"))
        .and(path("/me/start"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.call(Method::GET, "me/start", None).await.unwrap();

    assert_eq!(result, None);
    assert_eq!(client.cached("me/start"), None);
}

#[tokio::test]
async fn test_etag_304_serves_cached_copy() {
    let (server, mut client) = setup_with_token().await;

    let body = json!({ "data": { "devices": [{ "id": 1 }], "pets": [] } });

    // First request: full response with an ETag. Expires after one use
    // so the conditional follow-up falls through to the 304 mock.
    Mock::given(method("GET"))
        .and(path("/me/start"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&body)
                .insert_header("ETag", "\"v1\""),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/me/start"))
        .and(header("If-None-Match", "\"v1\""))
        .respond_with(ResponseTemplate::new(304))
        .expect(1)
        .mount(&server)
        .await;

    let first = client.call(Method::GET, "me/start", None).await.unwrap();
    let second = client.call(Method::GET, "me/start", None).await.unwrap();

    assert_eq!(first.as_ref(), Some(&body));
    assert_eq!(second, Some(body));
}

// ── Endpoint wrappers ───────────────────────────────────────────────

#[tokio::test]
async fn test_sync_reuses_cached_payload() {
    let (server, mut client) = setup_with_token().await;

    Mock::given(method("GET"))
        .and(path("/me/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "devices": [{ "id": 7, "product_id": 1 }], "pets": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let first = client.sync(false).await.unwrap().unwrap();
    let second = client.sync(false).await.unwrap().unwrap();

    assert_eq!(first.devices.len(), 1);
    assert_eq!(second.devices.len(), 1);
}

#[tokio::test]
async fn test_sync_force_refresh_refetches() {
    let (server, mut client) = setup_with_token().await;

    Mock::given(method("GET"))
        .and(path("/me/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "devices": [], "pets": [] }
        })))
        .expect(2)
        .mount(&server)
        .await;

    client.sync(false).await.unwrap();
    client.sync(true).await.unwrap();
}

#[tokio::test]
async fn test_household_report_without_data_is_empty() {
    let (server, mut client) = setup_with_token().await;

    Mock::given(method("GET"))
        .and(path("/report/household/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let report = client.household_report(42, None).await.unwrap();

    assert!(report.data.is_empty());
}

#[tokio::test]
async fn test_pet_scoped_report_path() {
    let (server, mut client) = setup_with_token().await;

    Mock::given(method("GET"))
        .and(path("/report/household/42/pet/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "pet_id": 9, "device_id": 3 }]
        })))
        .mount(&server)
        .await;

    let report = client.household_report(42, Some(9)).await.unwrap();

    assert_eq!(report.data.len(), 1);
    assert_eq!(report.data[0].pet_id, 9);
    assert_eq!(report.data[0].device_id, 3);
    assert!(report.data[0].movement.datapoints.is_empty());
}

#[tokio::test]
async fn test_notifications_empty_on_absence() {
    let (server, mut client) = setup_with_token().await;

    Mock::given(method("GET"))
        .and(path("/notification"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let notifications = client.notifications().await.unwrap();

    assert_eq!(notifications, json!({}));
}
