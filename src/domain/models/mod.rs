pub mod booking;
pub mod job;
pub mod location;
pub mod notification;
pub mod service;
pub mod staff;
