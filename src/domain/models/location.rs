use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Location {
    pub id: String,
    pub shop_id: String,
    pub name: String,
    pub timezone: String,
    pub enforce_operating_hours: bool,
    pub created_at: DateTime<Utc>,
}

impl Location {
    pub fn new(shop_id: String, name: String, timezone: String, enforce_operating_hours: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            shop_id,
            name,
            timezone,
            enforce_operating_hours,
            created_at: Utc::now(),
        }
    }
}

/// Weekly opening rule for a location. Weekday is 0-6 with 0 = Sunday.
/// Several rules may exist for the same weekday across different validity
/// windows; the one whose [valid_from, valid_to) contains the target date
/// is the effective rule.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct WeeklyHoursRule {
    pub id: String,
    pub location_id: String,
    pub weekday: i32,
    pub open_time: String,
    pub close_time: String,
    pub valid_from: NaiveDate,
    pub valid_to: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl WeeklyHoursRule {
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && self.valid_to.is_none_or(|until| date < until)
    }
}

/// Date-range exception that overrides the weekly rules, either closing the
/// location outright or replacing the day window.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct HoursException {
    pub id: String,
    pub location_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub closed_all_day: bool,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl HoursException {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
