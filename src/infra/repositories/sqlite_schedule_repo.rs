use crate::domain::{models::location::{HoursException, WeeklyHoursRule}, ports::ScheduleRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteScheduleRepo {
    pool: SqlitePool,
}

impl SqliteScheduleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepo {
    async fn create_weekly_rule(&self, rule: &WeeklyHoursRule) -> Result<WeeklyHoursRule, AppError> {
        sqlx::query_as::<_, WeeklyHoursRule>(
            "INSERT INTO weekly_hours_rules (id, location_id, weekday, open_time, close_time, valid_from, valid_to, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&rule.id).bind(&rule.location_id).bind(rule.weekday).bind(&rule.open_time)
            .bind(&rule.close_time).bind(rule.valid_from).bind(rule.valid_to).bind(rule.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_weekly_rules(&self, location_id: &str) -> Result<Vec<WeeklyHoursRule>, AppError> {
        sqlx::query_as::<_, WeeklyHoursRule>("SELECT * FROM weekly_hours_rules WHERE location_id = ? ORDER BY weekday, valid_from")
            .bind(location_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_weekly_rule(&self, location_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM weekly_hours_rules WHERE id = ? AND location_id = ?")
            .bind(id).bind(location_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Weekly hours rule not found".into()));
        }
        Ok(())
    }

    async fn create_exception(&self, exception: &HoursException) -> Result<HoursException, AppError> {
        sqlx::query_as::<_, HoursException>(
            "INSERT INTO hours_exceptions (id, location_id, start_date, end_date, closed_all_day, open_time, close_time, reason, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&exception.id).bind(&exception.location_id).bind(exception.start_date)
            .bind(exception.end_date).bind(exception.closed_all_day).bind(&exception.open_time)
            .bind(&exception.close_time).bind(&exception.reason).bind(exception.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_exceptions(&self, location_id: &str) -> Result<Vec<HoursException>, AppError> {
        sqlx::query_as::<_, HoursException>("SELECT * FROM hours_exceptions WHERE location_id = ? ORDER BY start_date")
            .bind(location_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_exceptions_covering(&self, location_id: &str, date: NaiveDate) -> Result<Vec<HoursException>, AppError> {
        sqlx::query_as::<_, HoursException>("SELECT * FROM hours_exceptions WHERE location_id = ? AND start_date <= ? AND end_date >= ?")
            .bind(location_id).bind(date).bind(date).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_exception(&self, location_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM hours_exceptions WHERE id = ? AND location_id = ?")
            .bind(id).bind(location_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Hours exception not found".into()));
        }
        Ok(())
    }
}
