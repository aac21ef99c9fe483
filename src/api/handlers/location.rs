use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::api::dtos::requests::{
    CreateExceptionRequest, CreateLocationRequest, CreateWeeklyRuleRequest, UpdateLocationRequest,
};
use crate::domain::models::location::{HoursException, Location, WeeklyHoursRule};
use crate::domain::services::availability::minutes_of_day;
use crate::domain::services::timezone::parse_zone;
use crate::error::AppError;
use crate::state::AppState;

fn validate_time(label: &str, time: &str) -> Result<(), AppError> {
    minutes_of_day(time)
        .map(|_| ())
        .ok_or_else(|| AppError::Validation(format!("Invalid {} '{}', expected HH:MM", label, time)))
}

fn validate_weekday(weekday: i32) -> Result<(), AppError> {
    if !(0..=6).contains(&weekday) {
        return Err(AppError::Validation("weekday must be 0-6 (0 = Sunday)".into()));
    }
    Ok(())
}

pub async fn create_location(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<String>,
    Json(payload): Json<CreateLocationRequest>,
) -> Result<impl IntoResponse, AppError> {
    parse_zone(&payload.timezone)?;

    let location = Location::new(
        shop_id,
        payload.name,
        payload.timezone,
        payload.enforce_operating_hours.unwrap_or(true),
    );
    let created = state.location_repo.create(&location).await?;
    info!("Location created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_locations(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let locations = state.location_repo.list(&shop_id).await?;
    Ok(Json(locations))
}

pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Path((shop_id, location_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let location = state.location_repo.find_by_id(&shop_id, &location_id).await?
        .ok_or_else(|| AppError::NotFound("Location not found".into()))?;
    Ok(Json(location))
}

pub async fn update_location(
    State(state): State<Arc<AppState>>,
    Path((shop_id, location_id)): Path<(String, String)>,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut location = state.location_repo.find_by_id(&shop_id, &location_id).await?
        .ok_or_else(|| AppError::NotFound("Location not found".into()))?;

    if let Some(name) = payload.name { location.name = name; }
    if let Some(timezone) = payload.timezone {
        parse_zone(&timezone)?;
        location.timezone = timezone;
    }
    if let Some(enforce) = payload.enforce_operating_hours {
        location.enforce_operating_hours = enforce;
    }

    let updated = state.location_repo.update(&location).await?;
    info!("Location updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn create_weekly_rule(
    State(state): State<Arc<AppState>>,
    Path((shop_id, location_id)): Path<(String, String)>,
    Json(payload): Json<CreateWeeklyRuleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let location = state.location_repo.find_by_id(&shop_id, &location_id).await?
        .ok_or_else(|| AppError::NotFound("Location not found".into()))?;

    validate_weekday(payload.weekday)?;
    validate_time("open_time", &payload.open_time)?;
    validate_time("close_time", &payload.close_time)?;
    if let Some(valid_to) = payload.valid_to
        && valid_to <= payload.valid_from {
        return Err(AppError::Validation("valid_to must be after valid_from".into()));
    }

    let rule = WeeklyHoursRule {
        id: Uuid::new_v4().to_string(),
        location_id: location.id,
        weekday: payload.weekday,
        open_time: payload.open_time,
        close_time: payload.close_time,
        valid_from: payload.valid_from,
        valid_to: payload.valid_to,
        created_at: Utc::now(),
    };
    let created = state.schedule_repo.create_weekly_rule(&rule).await?;
    Ok(Json(created))
}

pub async fn list_weekly_rules(
    State(state): State<Arc<AppState>>,
    Path((shop_id, location_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let location = state.location_repo.find_by_id(&shop_id, &location_id).await?
        .ok_or_else(|| AppError::NotFound("Location not found".into()))?;
    let rules = state.schedule_repo.list_weekly_rules(&location.id).await?;
    Ok(Json(rules))
}

pub async fn delete_weekly_rule(
    State(state): State<Arc<AppState>>,
    Path((_, location_id, rule_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.schedule_repo.delete_weekly_rule(&location_id, &rule_id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn create_exception(
    State(state): State<Arc<AppState>>,
    Path((shop_id, location_id)): Path<(String, String)>,
    Json(payload): Json<CreateExceptionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let location = state.location_repo.find_by_id(&shop_id, &location_id).await?
        .ok_or_else(|| AppError::NotFound("Location not found".into()))?;

    if payload.end_date < payload.start_date {
        return Err(AppError::Validation("end_date must not precede start_date".into()));
    }

    let closed_all_day = payload.closed_all_day.unwrap_or(false);
    if !closed_all_day {
        match (&payload.open_time, &payload.close_time) {
            (Some(open), Some(close)) => {
                validate_time("open_time", open)?;
                validate_time("close_time", close)?;
            }
            _ => {
                return Err(AppError::Validation(
                    "open_time and close_time are required unless closed_all_day".into(),
                ))
            }
        }
    }

    let exception = HoursException {
        id: Uuid::new_v4().to_string(),
        location_id: location.id,
        start_date: payload.start_date,
        end_date: payload.end_date,
        closed_all_day,
        open_time: payload.open_time,
        close_time: payload.close_time,
        reason: payload.reason,
        created_at: Utc::now(),
    };
    let created = state.schedule_repo.create_exception(&exception).await?;
    Ok(Json(created))
}

pub async fn list_exceptions(
    State(state): State<Arc<AppState>>,
    Path((shop_id, location_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let location = state.location_repo.find_by_id(&shop_id, &location_id).await?
        .ok_or_else(|| AppError::NotFound("Location not found".into()))?;
    let exceptions = state.schedule_repo.list_exceptions(&location.id).await?;
    Ok(Json(exceptions))
}

pub async fn delete_exception(
    State(state): State<Arc<AppState>>,
    Path((_, location_id, exception_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.schedule_repo.delete_exception(&location_id, &exception_id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
