use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreateServiceRequest;
use crate::domain::models::service::Service;
use crate::domain::services::availability::MINUTES_PER_DAY;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<String>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.duration_min <= 0 || payload.duration_min > i32::from(MINUTES_PER_DAY) {
        return Err(AppError::Validation("duration_min must be between 1 and 1440".into()));
    }

    let service = Service::new(shop_id, payload.title, payload.duration_min);
    let created = state.service_repo.create(&service).await?;
    info!("Service created: {} ({} min)", created.id, created.duration_min);
    Ok(Json(created))
}

pub async fn list_services(
    State(state): State<Arc<AppState>>,
    Path(shop_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let services = state.service_repo.list(&shop_id).await?;
    Ok(Json(services))
}

pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path((shop_id, service_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.service_repo.find_by_id(&shop_id, &service_id).await?
        .ok_or_else(|| AppError::NotFound("Service not found".into()))?;
    Ok(Json(service))
}
