use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const NOTIFICATION_SENT: &str = "sent";
pub const NOTIFICATION_SKIPPED_DUPLICATE: &str = "skipped_duplicate";

/// One row per attempted notification. The (booking_id, reminder_type) pair
/// is the idempotency key: a re-run of the worker over the same job must not
/// re-send.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct NotificationLog {
    pub id: String,
    pub booking_id: String,
    pub reminder_type: String,
    pub recipient: String,
    pub status: String,
    pub sent_at: DateTime<Utc>,
}

impl NotificationLog {
    pub fn new(booking_id: String, reminder_type: String, recipient: String, status: &str, sent_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            booking_id,
            reminder_type,
            recipient,
            status: status.to_string(),
            sent_at,
        }
    }
}
