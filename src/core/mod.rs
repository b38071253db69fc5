pub mod auth;
pub mod config;
pub mod finance;
pub mod log;
pub mod reminders;
pub mod reports;
