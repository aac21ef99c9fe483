use crate::domain::models::{
    booking::Booking,
    job::Job,
    location::{HoursException, Location, WeeklyHoursRule},
    notification::NotificationLog,
    service::Service,
    staff::{StaffAvailability, StaffDateAvailability, StaffMember},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn create(&self, location: &Location) -> Result<Location, AppError>;
    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<Location>, AppError>;
    async fn list(&self, shop_id: &str) -> Result<Vec<Location>, AppError>;
    async fn update(&self, location: &Location) -> Result<Location, AppError>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn create_weekly_rule(&self, rule: &WeeklyHoursRule) -> Result<WeeklyHoursRule, AppError>;
    async fn list_weekly_rules(&self, location_id: &str) -> Result<Vec<WeeklyHoursRule>, AppError>;
    async fn delete_weekly_rule(&self, location_id: &str, id: &str) -> Result<(), AppError>;

    async fn create_exception(&self, exception: &HoursException) -> Result<HoursException, AppError>;
    async fn list_exceptions(&self, location_id: &str) -> Result<Vec<HoursException>, AppError>;
    async fn list_exceptions_covering(&self, location_id: &str, date: NaiveDate) -> Result<Vec<HoursException>, AppError>;
    async fn delete_exception(&self, location_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn create(&self, staff: &StaffMember) -> Result<StaffMember, AppError>;
    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<StaffMember>, AppError>;
    async fn list(&self, shop_id: &str) -> Result<Vec<StaffMember>, AppError>;

    async fn create_recurring(&self, window: &StaffAvailability) -> Result<StaffAvailability, AppError>;
    async fn list_recurring(&self, staff_id: &str) -> Result<Vec<StaffAvailability>, AppError>;
    async fn delete_recurring(&self, staff_id: &str, id: &str) -> Result<(), AppError>;

    async fn create_date_override(&self, window: &StaffDateAvailability) -> Result<StaffDateAvailability, AppError>;
    async fn list_date_overrides(&self, staff_id: &str, date: NaiveDate) -> Result<Vec<StaffDateAvailability>, AppError>;
    async fn delete_date_overrides(&self, staff_id: &str, date: NaiveDate) -> Result<(), AppError>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: &Service) -> Result<Service, AppError>;
    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<Service>, AppError>;
    async fn list(&self, shop_id: &str) -> Result<Vec<Service>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persists the booking and its follow-up jobs in one transaction.
    async fn create_with_jobs(&self, booking: &Booking, jobs: Vec<Job>) -> Result<Booking, AppError>;
    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_shop(&self, shop_id: &str) -> Result<Vec<Booking>, AppError>;
    /// Active bookings for the staff member whose start falls inside the
    /// (widened) window. Precise interval overlap is the conflict scan's job.
    async fn list_active_for_staff(&self, staff_id: &str, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> Result<Vec<Booking>, AppError>;
    async fn update_status(&self, shop_id: &str, id: &str, status: &str) -> Result<Booking, AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<Job, AppError>;
    async fn find_pending(&self, now: DateTime<Utc>, limit: i32) -> Result<Vec<Job>, AppError>;
    async fn update_status(&self, id: &str, status: &str, error_message: Option<String>) -> Result<(), AppError>;
    async fn cancel_jobs_for_booking(&self, booking_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn has_been_sent(&self, booking_id: &str, reminder_type: &str) -> Result<bool, AppError>;
    async fn record(&self, log: &NotificationLog) -> Result<(), AppError>;
    async fn list_for_booking(&self, booking_id: &str) -> Result<Vec<NotificationLog>, AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, template_id: &str, template_data: &serde_json::Value) -> Result<(), AppError>;
}

/// Current-instant source, injected so scheduling logic stays testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
