pub mod availability;
pub mod conflict;
pub mod scheduler;
pub mod slots;
pub mod timezone;
