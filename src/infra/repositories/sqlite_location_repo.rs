use crate::domain::{models::location::Location, ports::LocationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteLocationRepo {
    pool: SqlitePool,
}

impl SqliteLocationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for SqliteLocationRepo {
    async fn create(&self, location: &Location) -> Result<Location, AppError> {
        sqlx::query_as::<_, Location>(
            "INSERT INTO locations (id, shop_id, name, timezone, enforce_operating_hours, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&location.id).bind(&location.shop_id).bind(&location.name)
            .bind(&location.timezone).bind(location.enforce_operating_hours).bind(location.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<Location>, AppError> {
        sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE shop_id = ? AND id = ?")
            .bind(shop_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, shop_id: &str) -> Result<Vec<Location>, AppError> {
        sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE shop_id = ? ORDER BY created_at ASC")
            .bind(shop_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, location: &Location) -> Result<Location, AppError> {
        sqlx::query_as::<_, Location>(
            "UPDATE locations SET name = ?, timezone = ?, enforce_operating_hours = ?
             WHERE id = ? AND shop_id = ?
             RETURNING *"
        )
            .bind(&location.name).bind(&location.timezone).bind(location.enforce_operating_hours)
            .bind(&location.id).bind(&location.shop_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
