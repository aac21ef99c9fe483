use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub slot_interval_min: u16,
    pub booking_buffer_min: u16,
    pub advance_booking_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            slot_interval_min: env::var("SLOT_INTERVAL_MIN").unwrap_or_else(|_| "30".to_string()).parse().expect("SLOT_INTERVAL_MIN must be a number"),
            booking_buffer_min: env::var("BOOKING_BUFFER_MIN").unwrap_or_else(|_| "0".to_string()).parse().expect("BOOKING_BUFFER_MIN must be a number"),
            advance_booking_days: env::var("ADVANCE_BOOKING_DAYS").unwrap_or_else(|_| "90".to_string()).parse().expect("ADVANCE_BOOKING_DAYS must be a number"),
        }
    }
}
