use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateBookingRequest, ListBookingsQuery, SlotsQuery};
use crate::api::dtos::responses::SlotsResponse;
use crate::domain::services::conflict::falls_on_date;
use crate::domain::services::scheduler::{BookingRequest, SlotQuery};
use crate::error::AppError;
use crate::state::AppState;

fn parse_date(date: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format, expected YYYY-MM-DD".into()))
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<String>,
    Query(params): Query<SlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&params.date)?;

    let query = SlotQuery {
        shop_id,
        service_id: params.service_id,
        staff_id: params.staff_id,
        location_id: params.location_id,
        date,
    };
    let policy = state.scheduling_policy();
    let slots = state.scheduler.available_slots(&query, &policy).await?;

    Ok(Json(SlotsResponse {
        date: params.date,
        slots: slots.iter().map(|s| s.to_rfc3339()).collect(),
    }))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<String>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;

    let request = BookingRequest {
        shop_id,
        service_id: payload.service_id,
        staff_id: payload.staff_id,
        location_id: payload.location_id,
        date,
        time: payload.time,
        customer_name: payload.customer_name,
        customer_email: payload.customer_email,
        customer_note: payload.notes,
        duration_min: payload.duration_min,
    };
    let policy = state.scheduling_policy();
    let created = state.scheduler.submit(request, &policy).await?;
    info!("Booking created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<String>,
    Query(params): Query<ListBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_shop(&shop_id).await?;

    // Day filtering uses each booking's snapshotted timezone, not the
    // caller's zone.
    let bookings = match &params.date {
        Some(date) => {
            let date = parse_date(date)?;
            bookings.into_iter().filter(|b| falls_on_date(b, date)).collect()
        }
        None => bookings,
    };

    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path((shop_id, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&shop_id, &booking_id).await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn mark_arrived(
    State(state): State<Arc<AppState>>,
    Path((shop_id, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.scheduler.mark_arrived(&shop_id, &booking_id).await?;
    Ok(Json(booking))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path((shop_id, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.scheduler.cancel(&shop_id, &booking_id).await?;
    Ok(Json(booking))
}

pub async fn complete_booking(
    State(state): State<Arc<AppState>>,
    Path((shop_id, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.scheduler.complete(&shop_id, &booking_id).await?;
    Ok(Json(booking))
}

pub async fn mark_no_show(
    State(state): State<Arc<AppState>>,
    Path((shop_id, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.scheduler.mark_no_show(&shop_id, &booking_id).await?;
    Ok(Json(booking))
}
