use crate::models::role::Role;
use serde::Serialize;

/// A listed account; the password hash never leaves the repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub created_at: String,
}

/// Stored secret for one username, used by the login check.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: i64,
    pub password_hash: String,
    pub role: Role,
}
