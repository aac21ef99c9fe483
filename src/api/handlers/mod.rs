pub mod booking;
pub mod health;
pub mod location;
pub mod service;
pub mod staff;
