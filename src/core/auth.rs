//! Login and the per-invocation session.

use crate::db::users::{create_user, find_credentials};
use crate::errors::{AppError, AppResult};
use crate::models::role::{Capability, Role};
use crate::utils::validate::require;
use rusqlite::Connection;

/// An authenticated operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl Session {
    /// Fails with `Forbidden` when the role's capability set lacks `cap`.
    pub fn require(&self, cap: Capability) -> AppResult<()> {
        if self.role.can(cap) {
            Ok(())
        } else {
            Err(AppError::Forbidden {
                role: self.role.to_string(),
                capability: cap.to_string(),
            })
        }
    }
}

pub struct AuthLogic;

impl AuthLogic {
    /// Check credentials. Unknown user and wrong password are reported the
    /// same way.
    pub fn login(conn: &Connection, username: &str, password: &str) -> AppResult<Session> {
        require("username", username)?;
        require("password", password)?;

        let creds = find_credentials(conn, username)?.ok_or(AppError::InvalidCredentials)?;

        if !bcrypt::verify(password, &creds.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(Session {
            user_id: creds.user_id,
            username: username.trim().to_string(),
            role: creds.role,
        })
    }

    pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
        require("password", password)?;
        Ok(bcrypt::hash(password, cost)?)
    }

    /// Hash `password` and store the account.
    pub fn register(
        conn: &Connection,
        username: &str,
        password: &str,
        role: Role,
        cost: u32,
    ) -> AppResult<i64> {
        require("username", username)?;
        let hash = Self::hash_password(password, cost)?;
        create_user(conn, username, &hash, role)
    }
}
