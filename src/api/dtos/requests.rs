use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
    pub timezone: String,
    pub enforce_operating_hours: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub timezone: Option<String>,
    pub enforce_operating_hours: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateWeeklyRuleRequest {
    pub weekday: i32,
    pub open_time: String,
    pub close_time: String,
    pub valid_from: NaiveDate,
    pub valid_to: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct CreateExceptionRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub closed_all_day: Option<bool>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateStaffRequest {
    pub name: String,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateStaffAvailabilityRequest {
    pub location_id: Option<String>,
    pub weekday: i32,
    pub start_time: String,
    pub end_time: String,
    pub is_available: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateStaffDateOverrideRequest {
    pub location_id: Option<String>,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub title: String,
    pub duration_min: i32,
}

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub service_id: String,
    pub staff_id: String,
    pub location_id: String,
    pub date: String,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub service_id: String,
    pub staff_id: String,
    pub location_id: String,
    pub date: String,
    pub time: String,
    pub customer_name: String,
    pub customer_email: String,
    pub notes: Option<String>,
    pub duration_min: Option<i32>,
}

#[derive(Deserialize)]
pub struct ListBookingsQuery {
    pub date: Option<String>,
}
