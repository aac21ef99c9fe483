use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{booking, health, location, service, staff};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Locations & operating hours
        .route("/api/v1/{shop_id}/locations", post(location::create_location).get(location::list_locations))
        .route("/api/v1/{shop_id}/locations/{location_id}", get(location::get_location).put(location::update_location))
        .route("/api/v1/{shop_id}/locations/{location_id}/hours", get(location::list_weekly_rules).post(location::create_weekly_rule))
        .route("/api/v1/{shop_id}/locations/{location_id}/hours/{rule_id}", delete(location::delete_weekly_rule))
        .route("/api/v1/{shop_id}/locations/{location_id}/exceptions", get(location::list_exceptions).post(location::create_exception))
        .route("/api/v1/{shop_id}/locations/{location_id}/exceptions/{exception_id}", delete(location::delete_exception))

        // Staff & availability
        .route("/api/v1/{shop_id}/staff", post(staff::create_staff).get(staff::list_staff))
        .route("/api/v1/{shop_id}/staff/{staff_id}/availability", get(staff::list_availability).post(staff::create_availability))
        .route("/api/v1/{shop_id}/staff/{staff_id}/availability/{availability_id}", delete(staff::delete_availability))
        .route("/api/v1/{shop_id}/staff/{staff_id}/overrides", post(staff::create_date_override))
        .route("/api/v1/{shop_id}/staff/{staff_id}/overrides/{date}", get(staff::list_date_overrides).delete(staff::delete_date_overrides))

        // Services
        .route("/api/v1/{shop_id}/services", post(service::create_service).get(service::list_services))
        .route("/api/v1/{shop_id}/services/{service_id}", get(service::get_service))

        // Booking flow
        .route("/api/v1/{shop_id}/slots", get(booking::get_slots))
        .route("/api/v1/{shop_id}/bookings", post(booking::create_booking).get(booking::list_bookings))
        .route("/api/v1/{shop_id}/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/v1/{shop_id}/bookings/{booking_id}/arrived", post(booking::mark_arrived))
        .route("/api/v1/{shop_id}/bookings/{booking_id}/cancel", post(booking::cancel_booking))
        .route("/api/v1/{shop_id}/bookings/{booking_id}/complete", post(booking::complete_booking))
        .route("/api/v1/{shop_id}/bookings/{booking_id}/no-show", post(booking::mark_no_show))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        shop_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
