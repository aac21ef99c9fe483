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

/// Location open every weekday 09:00-18:00, staff working the same hours.
async fn setup_shop(app: &TestApp, shop_id: &str) -> Shop {
    let location = post(app, format!("/api/v1/{}/locations", shop_id), json!({
        "name": "Main Street",
        "timezone": "UTC",
        "enforce_operating_hours": true
    })).await;
    let location_id = location["id"].as_str().unwrap().to_string();

    let staff = post(app, format!("/api/v1/{}/staff", shop_id), json!({"name": "Alex"})).await;
    let staff_id = staff["id"].as_str().unwrap().to_string();

    for weekday in 1..=5 {
        post(app, format!("/api/v1/{}/locations/{}/hours", shop_id, location_id), json!({
            "weekday": weekday,
            "open_time": "09:00",
            "close_time": "18:00",
            "valid_from": "2025-01-01"
        })).await;
        post(app, format!("/api/v1/{}/staff/{}/availability", shop_id, staff_id), json!({
            "weekday": weekday,
            "start_time": "09:00",
            "end_time": "18:00"
        })).await;
    }

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

async fn get_slots(app: &TestApp, shop: &Shop, date: &str) -> Vec<String> {
    let uri = format!(
        "/api/v1/{}/slots?service_id={}&staff_id={}&location_id={}&date={}",
        shop.shop_id, shop.service_id, shop.staff_id, shop.location_id, date
    );
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    body["slots"].as_array().unwrap()
        .iter().map(|s| s.as_str().unwrap().to_string()).collect()
}

#[tokio::test]
async fn test_holiday_exception_closes_the_day() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-ov1").await;

    // Wednesday 2025-06-04 is normally open.
    assert!(!get_slots(&app, &shop, "2025-06-04").await.is_empty());

    post(&app, format!("/api/v1/{}/locations/{}/exceptions", shop.shop_id, shop.location_id), json!({
        "start_date": "2025-06-04",
        "end_date": "2025-06-04",
        "closed_all_day": true,
        "reason": "Public holiday"
    })).await;

    assert!(get_slots(&app, &shop, "2025-06-04").await.is_empty());
    // The surrounding days are untouched.
    assert!(!get_slots(&app, &shop, "2025-06-05").await.is_empty());
}

#[tokio::test]
async fn test_exception_can_shorten_hours_over_a_range() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-ov2").await;

    post(&app, format!("/api/v1/{}/locations/{}/exceptions", shop.shop_id, shop.location_id), json!({
        "start_date": "2025-06-03",
        "end_date": "2025-06-05",
        "closed_all_day": false,
        "open_time": "12:00",
        "close_time": "15:00",
        "reason": "Renovation"
    })).await;

    let slots = get_slots(&app, &shop, "2025-06-04").await;
    assert!(slots.first().unwrap().starts_with("2025-06-04T12:00"));
    assert!(slots.last().unwrap().starts_with("2025-06-04T14:30"));

    // Friday 2025-06-06 is outside the range and keeps full hours.
    let slots = get_slots(&app, &shop, "2025-06-06").await;
    assert!(slots.first().unwrap().starts_with("2025-06-06T09:00"));
}

#[tokio::test]
async fn test_unavailable_override_blanks_a_working_day() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-ov3").await;

    post(&app, format!("/api/v1/{}/staff/{}/overrides", shop.shop_id, shop.staff_id), json!({
        "date": "2025-06-04",
        "start_time": "00:00",
        "end_time": "23:59",
        "is_available": false,
        "notes": "Vacation day"
    })).await;

    assert!(get_slots(&app, &shop, "2025-06-04").await.is_empty());
    assert!(!get_slots(&app, &shop, "2025-06-05").await.is_empty());
}

#[tokio::test]
async fn test_override_replaces_recurring_hours_for_that_date() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-ov4").await;

    post(&app, format!("/api/v1/{}/staff/{}/overrides", shop.shop_id, shop.staff_id), json!({
        "date": "2025-06-04",
        "start_time": "14:00",
        "end_time": "16:00",
        "is_available": true
    })).await;

    let slots = get_slots(&app, &shop, "2025-06-04").await;
    assert_eq!(slots.len(), 4);
    assert!(slots.first().unwrap().starts_with("2025-06-04T14:00"));
    assert!(slots.last().unwrap().starts_with("2025-06-04T15:30"));
}

#[tokio::test]
async fn test_override_can_open_a_normally_off_day() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-ov5").await;

    // Staff never works Saturdays, but the location must also be open for
    // slots to exist, so the location gets a Saturday exception window.
    post(&app, format!("/api/v1/{}/locations/{}/exceptions", shop.shop_id, shop.location_id), json!({
        "start_date": "2025-06-07",
        "end_date": "2025-06-07",
        "closed_all_day": false,
        "open_time": "10:00",
        "close_time": "14:00"
    })).await;
    post(&app, format!("/api/v1/{}/staff/{}/overrides", shop.shop_id, shop.staff_id), json!({
        "date": "2025-06-07",
        "start_time": "10:00",
        "end_time": "14:00",
        "is_available": true
    })).await;

    let slots = get_slots(&app, &shop, "2025-06-07").await;
    assert!(!slots.is_empty());
    assert!(slots.first().unwrap().starts_with("2025-06-07T10:00"));
}

#[tokio::test]
async fn test_deleting_override_restores_recurring_hours() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-ov6").await;

    post(&app, format!("/api/v1/{}/staff/{}/overrides", shop.shop_id, shop.staff_id), json!({
        "date": "2025-06-04",
        "start_time": "00:00",
        "end_time": "23:59",
        "is_available": false
    })).await;
    assert!(get_slots(&app, &shop, "2025-06-04").await.is_empty());

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE")
            .uri(format!("/api/v1/{}/staff/{}/overrides/2025-06-04", shop.shop_id, shop.staff_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    assert!(!get_slots(&app, &shop, "2025-06-04").await.is_empty());
}
