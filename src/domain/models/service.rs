use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A bookable service (Shopify variant). Duration is a typed field, never
/// parsed out of the title.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Service {
    pub id: String,
    pub shop_id: String,
    pub title: String,
    pub duration_min: i32,
    pub created_at: DateTime<Utc>,
}

impl Service {
    pub fn new(shop_id: String, title: String, duration_min: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            shop_id,
            title,
            duration_min,
            created_at: Utc::now(),
        }
    }
}
