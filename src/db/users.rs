use crate::db::ensure_affected;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::{Credentials, User};
use crate::utils::validate::require;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Store a new account. `password_hash` must already be a bcrypt hash.
/// A taken username fails on the schema's UNIQUE constraint.
pub fn create_user(conn: &Connection, username: &str, password_hash: &str, role: Role) -> AppResult<i64> {
    require("username", username)?;
    require("password", password_hash)?;

    conn.execute(
        "INSERT INTO users (username, password_hash, role) VALUES (?1, ?2, ?3)",
        params![username.trim(), password_hash, role.to_db_str()],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn list_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt =
        conn.prepare("SELECT id, username, role, created_at FROM users ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_user(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
    ensure_affected(changed, "User", id)
}

pub fn find_credentials(conn: &Connection, username: &str) -> AppResult<Option<Credentials>> {
    let mut stmt =
        conn.prepare("SELECT id, password_hash, role FROM users WHERE username = ?1")?;

    Ok(stmt
        .query_row([username.trim()], |row| {
            Ok(Credentials {
                user_id: row.get(0)?,
                password_hash: row.get(1)?,
                role: role_from_row(row, 2)?,
            })
        })
        .optional()?)
}

fn role_from_row(row: &Row, idx: usize) -> Result<Role> {
    let raw: String = row.get(idx)?;
    Role::from_db_str(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidRole(raw.clone())),
        )
    })
}

fn map_row(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        role: role_from_row(row, 2)?,
        created_at: row.get(3)?,
    })
}
