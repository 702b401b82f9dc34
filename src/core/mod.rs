pub mod availability;
pub mod complete;
pub mod config;
pub mod dashboard;
pub mod day_boundary;
pub mod log;
pub mod reminder;
pub mod rotation;
pub mod status;
pub mod storage;
pub mod tracker;
