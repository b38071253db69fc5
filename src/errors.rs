//! Unified application error type.
//! Repository, core, export and cli code all return AppError so every failure
//! reaches the operator through the same path.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Cannot connect to the database: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: i64 },

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid period '{0}': use YYYY or YYYY-MM")]
    InvalidPeriod(String),

    #[error("Invalid role: {0} (expected admin, vet or receptionist)")]
    InvalidRole(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    // ---------------------------
    // Access
    // ---------------------------
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Access denied: role '{role}' cannot use {capability}")]
    Forbidden { role: String, capability: String },

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Output collaborators
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("E-mail error: {0}")]
    Email(String),
}

pub type AppResult<T> = Result<T, AppError>;
