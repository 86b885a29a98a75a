//! Integration tests for the API server.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use domain::RoomAvailability;
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

/// H1/R101 with quota 1 on June 1st to 3rd.
fn setup() -> axum::Router {
    let inventory = (1..=3)
        .map(|d| RoomAvailability::new("H1".into(), "R101".into(), day(d), 1))
        .collect();
    let state = api::create_default_state(inventory);
    api::create_app(state, get_metrics_handle())
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

fn order_body(email: &str, from: &str, to: &str) -> serde_json::Value {
    serde_json::json!({
        "hotel_id": "H1",
        "room_id": "R101",
        "email": email,
        "from": from,
        "to": to,
    })
}

async fn quotas(app: &axum::Router) -> Vec<u64> {
    let (status, json) = send(
        app,
        "GET",
        "/availability?hotel_id=H1&room_id=R101&from=2024-06-01&to=2024-06-03",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json.as_array()
        .unwrap()
        .iter()
        .map(|d| d["quota"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(
        json["participants"],
        serde_json::json!(["orders", "room_availability"])
    );
}

#[tokio::test]
async fn test_create_order() {
    let app = setup();

    let (status, json) = send(
        &app,
        "POST",
        "/orders",
        Some(order_body("guest@example.com", "2024-06-01", "2024-06-02")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["hotel_id"], "H1");
    assert_eq!(json["email"], "guest@example.com");
    assert_eq!(json["from"], "2024-06-01");
    assert_eq!(json["to"], "2024-06-02");
    assert_eq!(quotas(&app).await, vec![0, 0, 1]);
}

#[tokio::test]
async fn test_accepts_rfc3339_timestamps() {
    let app = setup();

    let (status, json) = send(
        &app,
        "POST",
        "/orders",
        Some(order_body(
            "guest@example.com",
            "2024-06-03T00:00:00Z",
            "2024-06-03T00:00:00Z",
        )),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["from"], "2024-06-03");
    assert_eq!(quotas(&app).await, vec![1, 1, 0]);
}

#[tokio::test]
async fn test_unavailable_room_lists_every_day_and_changes_nothing() {
    let app = setup();

    let (status, _) = send(
        &app,
        "POST",
        "/orders",
        Some(order_body("a@example.com", "2024-06-01", "2024-06-02")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(
        &app,
        "POST",
        "/orders",
        Some(order_body("b@example.com", "2024-06-01", "2024-06-03")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        json["unavailable_dates"],
        serde_json::json!(["2024-06-01", "2024-06-02"])
    );
    assert_eq!(quotas(&app).await, vec![0, 0, 1]);

    let (_, orders) = send(&app, "GET", "/orders", None).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["email"], "a@example.com");
}

#[tokio::test]
async fn test_from_after_to_is_rejected() {
    let app = setup();

    let (status, json) = send(
        &app,
        "POST",
        "/orders",
        Some(order_body("guest@example.com", "2024-06-03", "2024-06-01")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Cannot create order"));
    assert_eq!(quotas(&app).await, vec![1, 1, 1]);
}

#[tokio::test]
async fn test_missing_email_is_rejected() {
    let app = setup();

    let (status, json) = send(
        &app,
        "POST",
        "/orders",
        Some(serde_json::json!({
            "hotel_id": "H1",
            "room_id": "R101",
            "from": "2024-06-01",
            "to": "2024-06-01",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Email is required"));
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = setup();

    let request = Request::builder()
        .method("POST")
        .uri("/orders")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_date_is_rejected() {
    let app = setup();

    let (status, _) = send(
        &app,
        "POST",
        "/orders",
        Some(order_body("guest@example.com", "June 1st", "2024-06-01")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_overlong_stay_is_rejected_without_touching_stores() {
    let app = setup();

    let (status, json) = send(
        &app,
        "POST",
        "/orders",
        Some(order_body("guest@example.com", "2024-06-01", "+200000-01-01")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("exceeds the maximum"));
    assert!(json.get("unavailable_dates").is_none());
    assert_eq!(quotas(&app).await, vec![1, 1, 1]);
    let (_, orders) = send(&app, "GET", "/orders", None).await;
    assert_eq!(orders, serde_json::json!([]));
}

#[tokio::test]
async fn test_one_year_stay_reaches_allocation() {
    let app = setup();

    // 366 days is the longest stay; it fails on quota, not on length
    let (status, json) = send(
        &app,
        "POST",
        "/orders",
        Some(order_body("guest@example.com", "2024-01-01", "2024-12-31")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["unavailable_dates"].as_array().unwrap().len(), 363);
}

#[tokio::test]
async fn test_upsert_availability_then_book() {
    let app = setup();

    let (status, json) = send(
        &app,
        "PUT",
        "/availability",
        Some(serde_json::json!([
            {"hotel_id": "H2", "room_id": "suite", "date": "2024-07-01", "quota": 2},
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["updated"], 1);

    let body = serde_json::json!({
        "hotel_id": "H2",
        "room_id": "suite",
        "email": "guest@example.com",
        "from": "2024-07-01",
        "to": "2024-07-01",
    });
    let (status, _) = send(&app, "POST", "/orders", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, days) = send(
        &app,
        "GET",
        "/availability?hotel_id=H2&room_id=suite&from=2024-07-01&to=2024-07-02",
        None,
    )
    .await;
    assert_eq!(days[0]["quota"], 1);
    assert_eq!(days[1]["quota"], 0);
}

#[tokio::test]
async fn test_availability_query_rejects_inverted_range() {
    let app = setup();

    let (status, _) = send(
        &app,
        "GET",
        "/availability?hotel_id=H1&room_id=R101&from=2024-06-03&to=2024-06-01",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_availability_query_rejects_overlong_range() {
    let app = setup();

    let (status, json) = send(
        &app,
        "GET",
        "/availability?hotel_id=H1&room_id=R101&from=0001-01-01&to=9999-12-31",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("exceeds the maximum"));
}

#[tokio::test]
async fn test_upsert_rejects_blank_ids() {
    let app = setup();

    let (status, _) = send(
        &app,
        "PUT",
        "/availability",
        Some(serde_json::json!([
            {"hotel_id": "", "room_id": "suite", "date": "2024-07-01", "quota": 2},
        ])),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("text/plain"));
}
