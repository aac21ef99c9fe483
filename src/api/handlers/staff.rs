use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::api::dtos::requests::{
    CreateStaffAvailabilityRequest, CreateStaffDateOverrideRequest, CreateStaffRequest,
};
use crate::domain::models::staff::{StaffAvailability, StaffDateAvailability, StaffMember};
use crate::domain::services::availability::minutes_of_day;
use crate::error::AppError;
use crate::state::AppState;

fn validate_window(start: &str, end: &str) -> Result<(), AppError> {
    let start_min = minutes_of_day(start)
        .ok_or_else(|| AppError::Validation(format!("Invalid start_time '{}', expected HH:MM", start)))?;
    let end_min = minutes_of_day(end)
        .ok_or_else(|| AppError::Validation(format!("Invalid end_time '{}', expected HH:MM", end)))?;
    if start_min >= end_min {
        return Err(AppError::Validation("end_time must be after start_time".into()));
    }
    Ok(())
}

pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<String>,
    Json(payload): Json<CreateStaffRequest>,
) -> Result<impl IntoResponse, AppError> {
    let staff = StaffMember::new(shop_id, payload.name, payload.email);
    let created = state.staff_repo.create(&staff).await?;
    info!("Staff member created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_staff(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let staff = state.staff_repo.list(&shop_id).await?;
    Ok(Json(staff))
}

pub async fn create_availability(
    State(state): State<Arc<AppState>>,
    Path((shop_id, staff_id)): Path<(String, String)>,
    Json(payload): Json<CreateStaffAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let staff = state.staff_repo.find_by_id(&shop_id, &staff_id).await?
        .ok_or_else(|| AppError::NotFound("Staff member not found".into()))?;

    if !(0..=6).contains(&payload.weekday) {
        return Err(AppError::Validation("weekday must be 0-6 (0 = Sunday)".into()));
    }
    validate_window(&payload.start_time, &payload.end_time)?;

    let window = StaffAvailability {
        id: Uuid::new_v4().to_string(),
        staff_id: staff.id,
        location_id: payload.location_id,
        weekday: payload.weekday,
        start_time: payload.start_time,
        end_time: payload.end_time,
        is_available: payload.is_available.unwrap_or(true),
        created_at: Utc::now(),
    };
    let created = state.staff_repo.create_recurring(&window).await?;
    Ok(Json(created))
}

pub async fn list_availability(
    State(state): State<Arc<AppState>>,
    Path((shop_id, staff_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let staff = state.staff_repo.find_by_id(&shop_id, &staff_id).await?
        .ok_or_else(|| AppError::NotFound("Staff member not found".into()))?;
    let windows = state.staff_repo.list_recurring(&staff.id).await?;
    Ok(Json(windows))
}

pub async fn delete_availability(
    State(state): State<Arc<AppState>>,
    Path((_, staff_id, availability_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.staff_repo.delete_recurring(&staff_id, &availability_id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn create_date_override(
    State(state): State<Arc<AppState>>,
    Path((shop_id, staff_id)): Path<(String, String)>,
    Json(payload): Json<CreateStaffDateOverrideRequest>,
) -> Result<impl IntoResponse, AppError> {
    let staff = state.staff_repo.find_by_id(&shop_id, &staff_id).await?
        .ok_or_else(|| AppError::NotFound("Staff member not found".into()))?;

    validate_window(&payload.start_time, &payload.end_time)?;

    let window = StaffDateAvailability {
        id: Uuid::new_v4().to_string(),
        staff_id: staff.id,
        location_id: payload.location_id,
        date: payload.date,
        start_time: payload.start_time,
        end_time: payload.end_time,
        is_available: payload.is_available,
        notes: payload.notes,
        created_at: Utc::now(),
    };
    let created = state.staff_repo.create_date_override(&window).await?;
    info!("Date override created for staff {} on {}", created.staff_id, created.date);
    Ok(Json(created))
}

pub async fn list_date_overrides(
    State(state): State<Arc<AppState>>,
    Path((shop_id, staff_id, date)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let staff = state.staff_repo.find_by_id(&shop_id, &staff_id).await?
        .ok_or_else(|| AppError::NotFound("Staff member not found".into()))?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;
    let overrides = state.staff_repo.list_date_overrides(&staff.id, date).await?;
    Ok(Json(overrides))
}

pub async fn delete_date_overrides(
    State(state): State<Arc<AppState>>,
    Path((_, staff_id, date)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;
    state.staff_repo.delete_date_overrides(&staff_id, date).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
