//! Row models for the clinic records and report results.

pub mod animal;
pub mod history;
pub mod location;
pub mod period;
pub mod report;
pub mod role;
pub mod user;
pub mod visit;
