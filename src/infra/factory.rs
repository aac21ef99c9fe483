use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::Config;
use crate::domain::services::scheduler::BookingScheduler;
use crate::infra::clock::SystemClock;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::repositories::{
    sqlite_booking_repo::SqliteBookingRepo, sqlite_job_repo::SqliteJobRepo,
    sqlite_location_repo::SqliteLocationRepo, sqlite_notification_repo::SqliteNotificationRepo,
    sqlite_schedule_repo::SqliteScheduleRepo, sqlite_service_repo::SqliteServiceRepo,
    sqlite_staff_repo::SqliteStaffRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_migrations(&pool).await;

    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));

    let location_repo = Arc::new(SqliteLocationRepo::new(pool.clone()));
    let schedule_repo = Arc::new(SqliteScheduleRepo::new(pool.clone()));
    let staff_repo = Arc::new(SqliteStaffRepo::new(pool.clone()));
    let service_repo = Arc::new(SqliteServiceRepo::new(pool.clone()));
    let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
    let job_repo = Arc::new(SqliteJobRepo::new(pool.clone()));
    let notification_repo = Arc::new(SqliteNotificationRepo::new(pool.clone()));
    let clock = Arc::new(SystemClock);

    let scheduler = Arc::new(BookingScheduler::new(
        location_repo.clone(),
        schedule_repo.clone(),
        staff_repo.clone(),
        service_repo.clone(),
        booking_repo.clone(),
        job_repo.clone(),
        clock.clone(),
    ));

    AppState {
        config: config.clone(),
        location_repo,
        schedule_repo,
        staff_repo,
        service_repo,
        booking_repo,
        job_repo,
        notification_repo,
        scheduler,
        email_service,
        clock,
    }
}

async fn run_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run migrations");
}
