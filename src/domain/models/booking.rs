use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_PAID: &str = "paid";
pub const STATUS_NOT_PAID: &str = "not_paid";
pub const STATUS_NO_SHOW: &str = "no_show";
pub const STATUS_CANCELLED: &str = "cancelled";
pub const STATUS_COMPLETED: &str = "completed";

/// Legacy rows created before duration became a required field carry no
/// duration; they occupy one hour.
pub const DEFAULT_DURATION_MIN: i64 = 60;

pub fn is_active_status(status: &str) -> bool {
    !matches!(status, STATUS_CANCELLED | STATUS_NO_SHOW)
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub shop_id: String,
    pub location_id: String,
    pub staff_id: String,
    pub service_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_note: Option<String>,
    /// Always an absolute UTC instant.
    pub scheduled_at: DateTime<Utc>,
    pub duration_min: Option<i32>,
    /// Zone of the location at creation time. Later timezone edits to the
    /// location must not reinterpret historical bookings.
    pub location_timezone: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub shop_id: String,
    pub location_id: String,
    pub staff_id: String,
    pub service_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_note: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_min: i32,
    pub location_timezone: String,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            shop_id: params.shop_id,
            location_id: params.location_id,
            staff_id: params.staff_id,
            service_id: params.service_id,
            customer_name: params.customer_name,
            customer_email: params.customer_email,
            customer_note: params.customer_note,
            scheduled_at: params.scheduled_at,
            duration_min: Some(params.duration_min),
            location_timezone: params.location_timezone,
            status: STATUS_NOT_PAID.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        let duration = self.duration_min.map(i64::from).unwrap_or(DEFAULT_DURATION_MIN);
        self.scheduled_at + Duration::minutes(duration)
    }
}
