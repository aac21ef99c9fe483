use crate::domain::{models::service::Service, ports::ServiceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteServiceRepo {
    pool: SqlitePool,
}

impl SqliteServiceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for SqliteServiceRepo {
    async fn create(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "INSERT INTO services (id, shop_id, title, duration_min, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&service.id).bind(&service.shop_id).bind(&service.title)
            .bind(service.duration_min).bind(service.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, shop_id: &str, id: &str) -> Result<Option<Service>, AppError> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE shop_id = ? AND id = ?")
            .bind(shop_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, shop_id: &str) -> Result<Vec<Service>, AppError> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE shop_id = ? ORDER BY title")
            .bind(shop_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
