use crate::domain::{models::notification::NotificationLog, ports::NotificationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

pub struct SqliteNotificationRepo {
    pool: SqlitePool,
}

impl SqliteNotificationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for SqliteNotificationRepo {
    async fn has_been_sent(&self, booking_id: &str, reminder_type: &str) -> Result<bool, AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM notification_log WHERE booking_id = ? AND reminder_type = ? AND status = 'sent'"
        )
            .bind(booking_id).bind(reminder_type)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count") > 0)
    }

    async fn record(&self, log: &NotificationLog) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO notification_log (id, booking_id, reminder_type, recipient, status, sent_at) VALUES (?, ?, ?, ?, ?, ?)"
        )
            .bind(&log.id).bind(&log.booking_id).bind(&log.reminder_type)
            .bind(&log.recipient).bind(&log.status).bind(log.sent_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn list_for_booking(&self, booking_id: &str) -> Result<Vec<NotificationLog>, AppError> {
        sqlx::query_as::<_, NotificationLog>("SELECT * FROM notification_log WHERE booking_id = ? ORDER BY sent_at ASC")
            .bind(booking_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
