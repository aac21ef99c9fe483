use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct StaffMember {
    pub id: String,
    pub shop_id: String,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StaffMember {
    pub fn new(shop_id: String, name: String, email: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            shop_id,
            name,
            email,
            created_at: Utc::now(),
        }
    }
}

/// Recurring weekly working window. A location_id of None means the window
/// applies at any location.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct StaffAvailability {
    pub id: String,
    pub staff_id: String,
    pub location_id: Option<String>,
    pub weekday: i32,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// Single-date override. When any override rows exist for a date they fully
/// replace the recurring windows for that date, including the ability to
/// blank an otherwise working day with is_available = false.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct StaffDateAvailability {
    pub id: String,
    pub staff_id: String,
    pub location_id: Option<String>,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
