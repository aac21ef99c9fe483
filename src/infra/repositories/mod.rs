pub mod sqlite_booking_repo;
pub mod sqlite_job_repo;
pub mod sqlite_location_repo;
pub mod sqlite_notification_repo;
pub mod sqlite_schedule_repo;
pub mod sqlite_service_repo;
pub mod sqlite_staff_repo;
