use crate::domain::{
    models::staff::{StaffAvailability, StaffDateAvailability, StaffMember},
    ports::StaffRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteStaffRepo {
    pool: SqlitePool,
}

impl SqliteStaffRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffRepository for SqliteStaffRepo {
    async fn create(&self, staff: &StaffMember) -> Result<StaffMember, AppError> {
        sqlx::query_as::<_, StaffMember>(
            "INSERT INTO staff (id, shop_id, name, email, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&staff.id).bind(&staff.shop_id).bind(&staff.name).bind(&staff.email).bind(staff.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<StaffMember>, AppError> {
        sqlx::query_as::<_, StaffMember>("SELECT * FROM staff WHERE shop_id = ? AND id = ?")
            .bind(shop_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, shop_id: &str) -> Result<Vec<StaffMember>, AppError> {
        sqlx::query_as::<_, StaffMember>("SELECT * FROM staff WHERE shop_id = ? ORDER BY name")
            .bind(shop_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn create_recurring(&self, window: &StaffAvailability) -> Result<StaffAvailability, AppError> {
        sqlx::query_as::<_, StaffAvailability>(
            "INSERT INTO staff_availability (id, staff_id, location_id, weekday, start_time, end_time, is_available, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&window.id).bind(&window.staff_id).bind(&window.location_id).bind(window.weekday)
            .bind(&window.start_time).bind(&window.end_time).bind(window.is_available).bind(window.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_recurring(&self, staff_id: &str) -> Result<Vec<StaffAvailability>, AppError> {
        sqlx::query_as::<_, StaffAvailability>("SELECT * FROM staff_availability WHERE staff_id = ? ORDER BY weekday, start_time")
            .bind(staff_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_recurring(&self, staff_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM staff_availability WHERE id = ? AND staff_id = ?")
            .bind(id).bind(staff_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Availability window not found".into()));
        }
        Ok(())
    }

    async fn create_date_override(&self, window: &StaffDateAvailability) -> Result<StaffDateAvailability, AppError> {
        sqlx::query_as::<_, StaffDateAvailability>(
            "INSERT INTO staff_date_availability (id, staff_id, location_id, date, start_time, end_time, is_available, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&window.id).bind(&window.staff_id).bind(&window.location_id).bind(window.date)
            .bind(&window.start_time).bind(&window.end_time).bind(window.is_available)
            .bind(&window.notes).bind(window.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_date_overrides(&self, staff_id: &str, date: NaiveDate) -> Result<Vec<StaffDateAvailability>, AppError> {
        sqlx::query_as::<_, StaffDateAvailability>("SELECT * FROM staff_date_availability WHERE staff_id = ? AND date = ? ORDER BY start_time")
            .bind(staff_id).bind(date).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_date_overrides(&self, staff_id: &str, date: NaiveDate) -> Result<(), AppError> {
        sqlx::query("DELETE FROM staff_date_availability WHERE staff_id = ? AND date = ?")
            .bind(staff_id).bind(date).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
