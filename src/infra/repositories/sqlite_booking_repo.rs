use crate::domain::{models::{booking::Booking, job::Job}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_with_jobs(&self, booking: &Booking, jobs: Vec<Job>) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, shop_id, location_id, staff_id, service_id, customer_name, customer_email, customer_note, scheduled_at, duration_min, location_timezone, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.shop_id).bind(&booking.location_id).bind(&booking.staff_id)
            .bind(&booking.service_id).bind(&booking.customer_name).bind(&booking.customer_email)
            .bind(&booking.customer_note).bind(booking.scheduled_at).bind(booking.duration_min)
            .bind(&booking.location_timezone).bind(&booking.status).bind(booking.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        for job in jobs {
            sqlx::query("INSERT INTO jobs (id, job_type, payload, execute_at, status, error_message, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)")
                .bind(&job.id).bind(&job.job_type).bind(&job.payload).bind(job.execute_at)
                .bind(&job.status).bind(&job.error_message).bind(job.created_at)
                .execute(&mut *tx).await.map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE shop_id = ? AND id = ?")
            .bind(shop_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_shop(&self, shop_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE shop_id = ? ORDER BY scheduled_at ASC")
            .bind(shop_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active_for_staff(&self, staff_id: &str, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> Result<Vec<Booking>, AppError> {
        // Appointments never span more than a day; widening the lower bound
        // catches long bookings that start before the window but reach into it.
        let widened_start = window_start - Duration::hours(24);
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE staff_id = ? AND scheduled_at < ? AND scheduled_at >= ? AND status NOT IN ('cancelled', 'no_show')"
        )
            .bind(staff_id).bind(window_end).bind(widened_start)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_status(&self, shop_id: &str, id: &str, status: &str) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = ? WHERE id = ? AND shop_id = ? RETURNING *"
        )
            .bind(status).bind(id).bind(shop_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
