use std::sync::Arc;
use crate::domain::ports::{
    BookingRepository, Clock, EmailService, JobRepository, LocationRepository,
    NotificationRepository, ScheduleRepository, ServiceRepository, StaffRepository,
};
use crate::domain::services::scheduler::{BookingScheduler, SchedulingPolicy};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub location_repo: Arc<dyn LocationRepository>,
    pub schedule_repo: Arc<dyn ScheduleRepository>,
    pub staff_repo: Arc<dyn StaffRepository>,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub notification_repo: Arc<dyn NotificationRepository>,
    pub scheduler: Arc<BookingScheduler>,
    pub email_service: Arc<dyn EmailService>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Scheduling knobs travel into the core as an explicit value per call.
    pub fn scheduling_policy(&self) -> SchedulingPolicy {
        SchedulingPolicy {
            slot_interval_min: self.config.slot_interval_min,
            booking_buffer_min: self.config.booking_buffer_min,
            advance_booking_days: self.config.advance_booking_days,
        }
    }
}
