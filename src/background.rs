use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use serde_json::json;

use crate::domain::models::booking::is_active_status;
use crate::domain::models::job::{Job, JOB_COMPLETED, JOB_CONFIRMATION, JOB_FAILED, JOB_REMINDER};
use crate::domain::models::notification::{
    NotificationLog, NOTIFICATION_SENT, NOTIFICATION_SKIPPED_DUPLICATE,
};
use crate::domain::services::timezone;
use crate::error::AppError;
use crate::state::AppState;

pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background job worker...");

    loop {
        match state.job_repo.find_pending(state.clock.now(), 10).await {
            Ok(jobs) => {
                for job in jobs {
                    let span = info_span!(
                        "background_job",
                        job_id = %job.id,
                        job_type = %job.job_type,
                        shop_id = %job.payload.shop_id,
                    );

                    let state = state.clone();
                    async move {
                        match process_job(&state, &job).await {
                            Ok(_) => {
                                info!("Job completed");
                                if let Err(e) = state.job_repo.update_status(&job.id, JOB_COMPLETED, None).await {
                                    error!("Failed to mark job as completed: {:?}", e);
                                }
                            }
                            Err(e) => {
                                let err_msg = format!("{}", e);
                                error!("Job failed: {}", err_msg);
                                if let Err(up_err) = state.job_repo.update_status(&job.id, JOB_FAILED, Some(err_msg)).await {
                                    error!("Failed to mark job as failed: {:?}", up_err);
                                }
                            }
                        }
                    }
                        .instrument(span)
                        .await;
                }
            }
            Err(e) => error!("Failed to fetch pending jobs: {:?}", e),
        }
        sleep(Duration::from_secs(5)).await;
    }
}

/// Handles one confirmation/reminder job. Idempotent per
/// (booking, job type): a re-run records a skip instead of re-sending.
pub async fn process_job(state: &Arc<AppState>, job: &Job) -> Result<(), AppError> {
    let booking_id = &job.payload.booking_id;
    let shop_id = &job.payload.shop_id;

    let template_id = match job.job_type.as_str() {
        JOB_CONFIRMATION => "booking_confirmation",
        JOB_REMINDER => "booking_reminder",
        other => {
            return Err(AppError::InternalWithMsg(format!("Unknown job type {}", other)));
        }
    };

    let booking = state.booking_repo.find_by_id(shop_id, booking_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))?;

    if !is_active_status(&booking.status) {
        info!("Skipping {} for booking {}: status is {}", job.job_type, booking.id, booking.status);
        return Ok(());
    }

    if state.notification_repo.has_been_sent(&booking.id, &job.job_type).await? {
        info!("Email skipped (idempotency) for job {}. Recipient: {}", job.id, booking.customer_email);
        let log = NotificationLog::new(
            booking.id.clone(),
            job.job_type.clone(),
            booking.customer_email.clone(),
            NOTIFICATION_SKIPPED_DUPLICATE,
            state.clock.now(),
        );
        state.notification_repo.record(&log).await?;
        return Ok(());
    }

    let service = state.service_repo.find_by_id(shop_id, &booking.service_id).await?;
    let location = state.location_repo.find_by_id(shop_id, &booking.location_id).await?;

    // Render in the zone the booking was made under.
    let (local_date, local_time) = timezone::to_civil(booking.scheduled_at, &booking.location_timezone)?;

    let template_data = json!({
        "customer_name": booking.customer_name,
        "service_title": service.map(|s| s.title).unwrap_or_default(),
        "location_name": location.map(|l| l.name).unwrap_or_default(),
        "date": local_date.to_string(),
        "time": local_time,
        "timezone": booking.location_timezone,
        "duration_min": booking.duration_min,
    });

    info!("Sending {} email to {}", template_id, booking.customer_email);
    state.email_service.send(&booking.customer_email, template_id, &template_data).await?;

    let log = NotificationLog::new(
        booking.id.clone(),
        job.job_type.clone(),
        booking.customer_email.clone(),
        NOTIFICATION_SENT,
        state.clock.now(),
    );
    state.notification_repo.record(&log).await?;

    Ok(())
}
