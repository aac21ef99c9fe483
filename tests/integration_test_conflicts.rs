mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post(app: &TestApp, uri: String, payload: Value) -> Value {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert!(res.status().is_success(), "setup request failed: {}", res.status());
    parse_body(res).await
}

struct Shop {
    shop_id: String,
    location_id: String,
    staff_id: String,
    service_id: String,
}

async fn setup_shop(app: &TestApp, shop_id: &str) -> Shop {
    let location = post(app, format!("/api/v1/{}/locations", shop_id), json!({
        "name": "Main Street",
        "timezone": "UTC",
        "enforce_operating_hours": false
    })).await;
    let location_id = location["id"].as_str().unwrap().to_string();

    let staff = post(app, format!("/api/v1/{}/staff", shop_id), json!({"name": "Alex"})).await;
    let staff_id = staff["id"].as_str().unwrap().to_string();

    // Wednesday 09:00-18:00.
    post(app, format!("/api/v1/{}/staff/{}/availability", shop_id, staff_id), json!({
        "weekday": 3,
        "start_time": "09:00",
        "end_time": "18:00"
    })).await;

    let service = post(app, format!("/api/v1/{}/services", shop_id), json!({
        "title": "Haircut",
        "duration_min": 30
    })).await;
    let service_id = service["id"].as_str().unwrap().to_string();

    Shop {
        shop_id: shop_id.to_string(),
        location_id,
        staff_id,
        service_id,
    }
}

async fn book(app: &TestApp, shop: &Shop, date: &str, time: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/v1/{}/bookings", shop.shop_id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "service_id": shop.service_id,
                "staff_id": shop.staff_id,
                "location_id": shop.location_id,
                "date": date,
                "time": time,
                "customer_name": "Jo",
                "customer_email": "jo@example.com"
            }).to_string())).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_overlapping_booking_is_rejected() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-c1").await;

    // 2025-06-04 is a Wednesday.
    let res = book(&app, &shop, "2025-06-04", "12:00").await;
    assert_eq!(res.status(), StatusCode::OK);

    // 12:15 overlaps the 12:00-12:30 booking.
    let res = book(&app, &shop, "2025-06-04", "12:15").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Back-to-back at 12:30 is fine.
    let res = book(&app, &shop, "2025-06-04", "12:30").await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_double_booking_same_slot_conflicts() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-c2").await;

    let res = book(&app, &shop, "2025-06-04", "10:00").await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = book(&app, &shop, "2025-06-04", "10:00").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_cancelled_booking_frees_the_slot() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-c3").await;

    let res = book(&app, &shop, "2025-06-04", "10:00").await;
    assert_eq!(res.status(), StatusCode::OK);
    let booking_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/v1/{}/bookings/{}/cancel", shop.shop_id, booking_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "cancelled");

    // The slot is bookable again.
    let res = book(&app, &shop, "2025-06-04", "10:00").await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_booked_slot_disappears_from_listing() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-c4").await;

    let res = book(&app, &shop, "2025-06-04", "12:00").await;
    assert_eq!(res.status(), StatusCode::OK);

    let uri = format!(
        "/api/v1/{}/slots?service_id={}&staff_id={}&location_id={}&date=2025-06-04",
        shop.shop_id, shop.service_id, shop.staff_id, shop.location_id
    );
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    let slots: Vec<&str> = body["slots"].as_array().unwrap()
        .iter().map(|s| s.as_str().unwrap()).collect();

    assert!(!slots.iter().any(|s| s.starts_with("2025-06-04T12:00")));
    assert!(slots.iter().any(|s| s.starts_with("2025-06-04T12:30")));
}

#[tokio::test]
async fn test_booking_buffer_enforces_gap() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-c5").await;

    let res = book(&app, &shop, "2025-06-04", "12:00").await;
    assert_eq!(res.status(), StatusCode::OK);

    // With a 15 min buffer the back-to-back 12:30 start now collides.
    let policy = appointment_backend::domain::services::scheduler::SchedulingPolicy {
        slot_interval_min: 30,
        booking_buffer_min: 15,
        advance_booking_days: 365,
    };
    let request = appointment_backend::domain::services::scheduler::BookingRequest {
        shop_id: shop.shop_id.clone(),
        service_id: shop.service_id.clone(),
        staff_id: shop.staff_id.clone(),
        location_id: shop.location_id.clone(),
        date: "2025-06-04".parse().unwrap(),
        time: "12:30".to_string(),
        customer_name: "Sam".to_string(),
        customer_email: "sam@example.com".to_string(),
        customer_note: None,
        duration_min: None,
    };
    let err = app.state.scheduler.submit(request, &policy).await.unwrap_err();
    assert!(matches!(err, appointment_backend::error::AppError::Conflict(_)));

    // 13:00 leaves the required gap.
    let request = appointment_backend::domain::services::scheduler::BookingRequest {
        shop_id: shop.shop_id.clone(),
        service_id: shop.service_id.clone(),
        staff_id: shop.staff_id.clone(),
        location_id: shop.location_id.clone(),
        date: "2025-06-04".parse().unwrap(),
        time: "13:00".to_string(),
        customer_name: "Sam".to_string(),
        customer_email: "sam@example.com".to_string(),
        customer_note: None,
        duration_min: None,
    };
    app.state.scheduler.submit(request, &policy).await.unwrap();
}
