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

/// Location open Mon-Fri 09:00-18:00 (UTC), one staff member, one 30 min
/// service. Staff hours are added per test.
async fn setup_shop(app: &TestApp, shop_id: &str, enforce_hours: bool) -> Shop {
    let location = post(app, format!("/api/v1/{}/locations", shop_id), json!({
        "name": "Main Street",
        "timezone": "UTC",
        "enforce_operating_hours": enforce_hours
    })).await;
    let location_id = location["id"].as_str().unwrap().to_string();

    // Weekdays 1-5 = Monday through Friday.
    for weekday in 1..=5 {
        post(app, format!("/api/v1/{}/locations/{}/hours", shop_id, location_id), json!({
            "weekday": weekday,
            "open_time": "09:00",
            "close_time": "18:00",
            "valid_from": "2025-01-01"
        })).await;
    }

    let staff = post(app, format!("/api/v1/{}/staff", shop_id), json!({"name": "Alex"})).await;
    let staff_id = staff["id"].as_str().unwrap().to_string();

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

async fn add_staff_hours(app: &TestApp, shop: &Shop, weekday: i32, start: &str, end: &str) {
    post(app, format!("/api/v1/{}/staff/{}/availability", shop.shop_id, shop.staff_id), json!({
        "weekday": weekday,
        "start_time": start,
        "end_time": end
    })).await;
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
async fn test_slots_are_intersection_of_location_and_staff_hours() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-av1", true).await;

    // Staff works Tue-Sat 10:00-18:00; Wednesday resolves to 10:00-18:00.
    for weekday in 2..=6 {
        add_staff_hours(&app, &shop, weekday, "10:00", "18:00").await;
    }

    // 2025-06-04 is a Wednesday.
    let slots = get_slots(&app, &shop, "2025-06-04").await;

    // 30 min service on a 30 min grid from 10:00 to 17:30.
    assert_eq!(slots.len(), 16);
    assert!(slots.first().unwrap().starts_with("2025-06-04T10:00"));
    assert!(slots.last().unwrap().starts_with("2025-06-04T17:30"));
}

#[tokio::test]
async fn test_closed_day_and_unconfigured_staff_yield_no_slots() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-av2", true).await;

    add_staff_hours(&app, &shop, 3, "09:00", "18:00").await;

    // 2025-06-08 is a Sunday: no location rule, closed.
    assert!(get_slots(&app, &shop, "2025-06-08").await.is_empty());

    // Wednesday is open but a second staff member with no hours gets nothing.
    let other = post(&app, format!("/api/v1/{}/staff", shop.shop_id), json!({"name": "Bo"})).await;
    let other_id = other["id"].as_str().unwrap().to_string();
    let uri = format!(
        "/api/v1/{}/slots?service_id={}&staff_id={}&location_id={}&date=2025-06-04",
        shop.shop_id, shop.service_id, other_id, shop.location_id
    );
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert!(body["slots"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_location_hours_ignored_when_not_enforced() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-av3", false).await;

    // Staff works Sunday 10:00-12:00 even though the location has no Sunday rule.
    add_staff_hours(&app, &shop, 0, "10:00", "12:00").await;

    let slots = get_slots(&app, &shop, "2025-06-08").await;
    // 10:00, 10:30, 11:00 and 11:30 all fit a 30 min service before noon.
    assert_eq!(slots.len(), 4);
    assert!(slots.first().unwrap().starts_with("2025-06-08T10:00"));
}

#[tokio::test]
async fn test_unknown_service_and_staff_are_not_found() {
    let app = TestApp::new().await;
    let shop = setup_shop(&app, "shop-av4", true).await;

    let uri = format!(
        "/api/v1/{}/slots?service_id=missing&staff_id={}&location_id={}&date=2025-06-04",
        shop.shop_id, shop.staff_id, shop.location_id
    );
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let uri = format!(
        "/api/v1/{}/slots?service_id={}&staff_id=missing&location_id={}&date=2025-06-04",
        shop.shop_id, shop.service_id, shop.location_id
    );
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
