use appointment_backend::{
    api::router::create_router,
    config::Config,
    domain::ports::{Clock, EmailService},
    domain::services::scheduler::BookingScheduler,
    error::AppError,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_job_repo::SqliteJobRepo,
        sqlite_location_repo::SqliteLocationRepo,
        sqlite_notification_repo::SqliteNotificationRepo,
        sqlite_schedule_repo::SqliteScheduleRepo,
        sqlite_service_repo::SqliteServiceRepo,
        sqlite_staff_repo::SqliteStaffRepo,
    },
    state::AppState,
};
use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub template_id: String,
    pub template_data: serde_json::Value,
}

/// Records every send instead of talking to the mail service.
pub struct MockEmailService {
    pub sent: Mutex<Vec<SentEmail>>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self { sent: Mutex::new(Vec::new()) }
    }

    #[allow(dead_code)]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(
        &self,
        recipient: &str,
        template_id: &str,
        template_data: &serde_json::Value,
    ) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(SentEmail {
            recipient: recipient.to_string(),
            template_id: template_id.to_string(),
            template_data: template_data.clone(),
        });
        Ok(())
    }
}

/// Pinned clock so availability and past-time checks are deterministic.
/// All test fixtures use dates after 2025-06-01.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn test_now() -> DateTime<Utc> {
    "2025-06-01T00:00:00Z".parse().unwrap()
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub email: Arc<MockEmailService>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            slot_interval_min: 30,
            booking_buffer_min: 0,
            advance_booking_days: 365,
        };

        let email = Arc::new(MockEmailService::new());
        let clock = Arc::new(FixedClock(test_now()));

        let location_repo = Arc::new(SqliteLocationRepo::new(pool.clone()));
        let schedule_repo = Arc::new(SqliteScheduleRepo::new(pool.clone()));
        let staff_repo = Arc::new(SqliteStaffRepo::new(pool.clone()));
        let service_repo = Arc::new(SqliteServiceRepo::new(pool.clone()));
        let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let job_repo = Arc::new(SqliteJobRepo::new(pool.clone()));
        let notification_repo = Arc::new(SqliteNotificationRepo::new(pool.clone()));

        let scheduler = Arc::new(BookingScheduler::new(
            location_repo.clone(),
            schedule_repo.clone(),
            staff_repo.clone(),
            service_repo.clone(),
            booking_repo.clone(),
            job_repo.clone(),
            clock.clone(),
        ));

        let state = Arc::new(AppState {
            config,
            location_repo,
            schedule_repo,
            staff_repo,
            service_repo,
            booking_repo,
            job_repo,
            notification_repo,
            scheduler,
            email_service: email.clone(),
            clock,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            email,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
