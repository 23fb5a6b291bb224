//! HTTP-level tests for the intake backend: contact, estimate, pricing and content routes.

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
    Router,
};
use backend::{
    build_router,
    config::Config,
    utils::mailer::{ContactSink, DeliveryError},
    AppState,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use studio_shared::{ContactSubmission, PriceTable};
use tower::util::ServiceExt; // for `oneshot`

/// Records every delivered submission.
#[derive(Default)]
struct RecordingSink {
    delivered: Mutex<Vec<ContactSubmission>>,
}

#[async_trait]
impl ContactSink for RecordingSink {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<(), DeliveryError> {
        self.delivered.lock().unwrap().push(submission.clone());
        Ok(())
    }
}

/// Always fails the way an unreachable mail server would.
struct FailingSink;

#[async_trait]
impl ContactSink for FailingSink {
    async fn deliver(&self, _submission: &ContactSubmission) -> Result<(), DeliveryError> {
        Err(DeliveryError::Address("broken".parse::<lettre::Address>().unwrap_err()))
    }
}

fn setup_app(config: Config, sink: Arc<dyn ContactSink>) -> Router {
    build_router(Arc::new(AppState::new(config, PriceTable::default(), sink)))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn valid_contact() -> Value {
    json!({
        "name": "Jane",
        "email": "jane@x.com",
        "phone": "",
        "company": "Sukat Oy",
        "project_type": "webshop",
        "budget": "3000_6000",
        "timeline": null,
        "message": "We need a new shop."
    })
}

#[tokio::test]
async fn test_health() {
    let app = setup_app(Config::default(), Arc::new(RecordingSink::default()));
    let response = app.oneshot(get_request("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_contact_is_delivered() {
    let sink = Arc::new(RecordingSink::default());
    let app = setup_app(Config::default(), sink.clone());

    let response = app
        .oneshot(json_request("POST", "/api/contact", valid_contact()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert!(body["message"].is_string());

    let delivered = sink.delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].company, "Sukat Oy");
}

#[tokio::test]
async fn test_invalid_contact_lists_fields() {
    let sink = Arc::new(RecordingSink::default());
    let app = setup_app(Config::default(), sink.clone());

    let mut body = valid_contact();
    body["email"] = json!("jane");
    body["message"] = json!("   ");
    let response = app
        .oneshot(json_request("POST", "/api/contact", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["fields"], json!(["email", "message"]));
    assert!(sink.delivered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_delivery_failure_is_bad_gateway() {
    let app = setup_app(Config::default(), Arc::new(FailingSink));
    let response = app
        .oneshot(json_request("POST", "/api/contact", valid_contact()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Could not deliver your message right now");
}

#[tokio::test]
async fn test_contact_rate_limit_keys_on_peer_address() {
    let config = Config {
        contact_rate_per_minute: 1,
        ..Config::default()
    };
    let app = setup_app(config, Arc::new(RecordingSink::default()));

    // Without a trusted proxy a made-up forwarded header changes nothing.
    let from = |peer: &str, spoofed: &str| {
        let mut request = json_request("POST", "/api/contact", valid_contact());
        let addr: SocketAddr = peer.parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        request
            .headers_mut()
            .insert("x-forwarded-for", spoofed.parse().unwrap());
        request
    };

    let first = app.clone().oneshot(from("198.51.100.1:5000", "1.1.1.1")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.clone().oneshot(from("198.51.100.1:5001", "2.2.2.2")).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = extract_json(second.into_body()).await;
    assert!(body["error"].is_string());

    let other = app.oneshot(from("198.51.100.2:5000", "1.1.1.1")).await.unwrap();
    assert_eq!(other.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_contact_rate_limit_behind_trusted_proxy() {
    let config = Config {
        contact_rate_per_minute: 1,
        trust_forwarded_for: true,
        ..Config::default()
    };
    let app = setup_app(config, Arc::new(RecordingSink::default()));

    let from = |ip: &str| {
        let mut request = json_request("POST", "/api/contact", valid_contact());
        request
            .headers_mut()
            .insert("x-forwarded-for", ip.parse().unwrap());
        request
    };

    let first = app.clone().oneshot(from("203.0.113.1")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.clone().oneshot(from("203.0.113.1")).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    let other = app.oneshot(from("203.0.113.2")).await.unwrap();
    assert_eq!(other.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_estimate_matches_pricing_rules() {
    let app = setup_app(Config::default(), Arc::new(RecordingSink::default()));
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/estimate",
            json!({"site_type": "ecommerce", "page_count": 1, "features": ["checkout", "cms"], "urgency": "rush"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["subtotal"], 680);
    assert_eq!(body["multiplier_percent"], 150);
    assert_eq!(body["total"], 1020);
}

#[tokio::test]
async fn test_estimate_tolerates_out_of_range_input() {
    let app = setup_app(Config::default(), Arc::new(RecordingSink::default()));
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/estimate",
            json!({"site_type": "castle", "page_count": 40, "features": ["seo", "teleport"], "urgency": "asap"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    // business, 15 pages, seo only, normal
    assert_eq!(body["total"], 300 + 14 * 40 + 60);
}

#[tokio::test]
async fn test_estimate_clamps_negative_and_fractional_pages() {
    let app = setup_app(Config::default(), Arc::new(RecordingSink::default()));

    let negative = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/estimate",
            json!({"site_type": "business", "page_count": -3, "features": null, "urgency": "normal"}),
        ))
        .await
        .unwrap();
    assert_eq!(negative.status(), StatusCode::OK);
    let body = extract_json(negative.into_body()).await;
    // priced as a single page
    assert_eq!(body["extra_pages"], 0);
    assert_eq!(body["total"], 300);

    let fractional = app
        .oneshot(json_request(
            "POST",
            "/api/estimate",
            json!({"site_type": 3, "page_count": 2.5, "features": ["seo", 9], "urgency": false}),
        ))
        .await
        .unwrap();
    assert_eq!(fractional.status(), StatusCode::OK);
    let body = extract_json(fractional.into_body()).await;
    // business, 3 pages, seo, normal
    assert_eq!(body["total"], 300 + 2 * 40 + 60);
}

#[tokio::test]
async fn test_unparseable_body_gets_json_error() {
    let app = setup_app(Config::default(), Arc::new(RecordingSink::default()));
    let request = Request::builder()
        .method("POST")
        .uri("/api/estimate")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().starts_with("Malformed request"));
}

#[tokio::test]
async fn test_price_table_is_published() {
    let app = setup_app(Config::default(), Arc::new(RecordingSink::default()));
    let response = app.oneshot(get_request("/api/pricing")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["base"]["booking"], 450);
    assert_eq!(body["per_extra_page"], 40);
    assert_eq!(body["features"]["multilingual"], 100);
    assert_eq!(body["urgency"]["fast"], 120);
}

#[tokio::test]
async fn test_content_overrides_are_served_per_locale() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("en.json"), r#"{"hero.title": "Websites that work"}"#).unwrap();
    std::fs::write(dir.path().join("fi.json"), "{ not json").unwrap();

    let config = Config {
        content_dir: Some(dir.path().to_path_buf()),
        ..Config::default()
    };
    let app = setup_app(config, Arc::new(RecordingSink::default()));

    let en = app.clone().oneshot(get_request("/api/content/en-US")).await.unwrap();
    assert_eq!(en.status(), StatusCode::OK);
    assert_eq!(
        extract_json(en.into_body()).await,
        json!({"hero.title": "Websites that work"})
    );

    // malformed file degrades to no overrides
    let fi = app.oneshot(get_request("/api/content/fi")).await.unwrap();
    assert_eq!(fi.status(), StatusCode::OK);
    assert_eq!(extract_json(fi.into_body()).await, json!({}));
}

#[tokio::test]
async fn test_content_without_directory_is_empty() {
    let app = setup_app(Config::default(), Arc::new(RecordingSink::default()));
    let response = app.oneshot(get_request("/api/content/sv")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await, json!({}));
}
