//! HTTP-level tests over the assembled router: status codes, response
//! envelopes and CORS behavior, backed by an in-memory database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use booking_server::core::server::app;
use booking_server::{BookingService, Config, DbService, MediaService, SearchService};
use booking_server::core::ServerState;

async fn test_app() -> Router {
    let work_dir = tempfile::tempdir().unwrap().keep();

    let mut config = Config::with_overrides(work_dir.to_string_lossy().to_string(), 0);
    // No search index behind this port; keep its failure path fast
    config.meili_url = "http://127.0.0.1:59917".to_string();
    config.search_retry_attempts = 1;
    config.search_retry_base_ms = 10;

    let db = DbService::memory().await.unwrap();
    let search = SearchService::new(&config).unwrap();
    let media = MediaService::new(
        config.media_dir(),
        b"test-signing-key".to_vec(),
        config.media_url_ttl_secs,
    );
    let bookings = BookingService::new(db.db.clone());

    app(ServerState {
        config,
        db: db.db,
        bookings,
        search,
        media,
    })
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

const BOOKING_BODY: &str = r#"{
    "property_id": "prop_1",
    "user_id": "user_1",
    "check_in": "2025-06-01",
    "check_out": "2025-06-05",
    "guests": 2,
    "name": "Ada Lovelace",
    "email": "ada@example.com",
    "phone": "+44 20 7946 0000",
    "total_price": 1200
}"#;

#[tokio::test]
async fn create_booking_returns_201_with_generated_id() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request("POST", "/api/properties/booking", BOOKING_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["booking_id"].as_str().unwrap().starts_with("booking_"));
    assert_eq!(body["message"], "Booking confirmed successfully");
}

#[tokio::test]
async fn conflicting_booking_returns_409() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/properties/booking", BOOKING_BODY))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let overlapping = BOOKING_BODY.replace("user_1", "user_2").replace(
        "\"check_in\": \"2025-06-01\"",
        "\"check_in\": \"2025-06-04\"",
    );
    let response = app
        .oneshot(json_request("POST", "/api/properties/booking", &overlapping))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Property is already booked for these dates");
}

#[tokio::test]
async fn missing_required_fields_return_400() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request("POST", "/api/properties/booking", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn created_booking_is_retrievable_by_user_and_property() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/properties/booking", BOOKING_BODY))
        .await
        .unwrap();
    let created = body_json(response).await;
    let booking_id = created["booking_id"].as_str().unwrap().to_string();

    for uri in [
        "/api/properties/booking?user_id=user_1",
        "/api/properties/booking?property_id=prop_1",
        "/api/properties/booking?user_id=user_1&property_id=prop_1",
    ] {
        let response = app.clone().oneshot(get_request(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let bookings = body["bookings"].as_array().unwrap();
        assert_eq!(bookings.len(), 1, "uri {uri}");
        assert_eq!(bookings[0]["booking_id"], booking_id.as_str());
        // Whole price serializes as a JSON integer
        assert_eq!(bookings[0]["total_price"], 1200);
    }
}

#[tokio::test]
async fn listing_without_filters_returns_400() {
    let app = test_app().await;

    let response = app
        .oneshot(get_request("/api/properties/booking"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "user_id or property_id is required");
}

#[tokio::test]
async fn unknown_route_returns_api_not_supported() {
    let app = test_app().await;

    let response = app.oneshot(get_request("/api/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "api_not_supported");
}

#[tokio::test]
async fn wrong_method_returns_405() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/properties/booking")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn cors_headers_are_attached_even_on_failure() {
    let app = test_app().await;

    let response = app.oneshot(get_request("/api/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
}

#[tokio::test]
async fn unsigned_media_request_is_rejected() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(get_request(
            "/media/properties/prop_1/x.jpg?expires=9999999999&sig=deadbeef",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Missing query parameters fail validation outright
    let response = app
        .oneshot(get_request("/media/properties/prop_1/x.jpg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_with_unreachable_index_returns_503() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/properties/search",
            r#"{"query": "beach"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}
