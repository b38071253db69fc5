use crate::db::ensure_affected;
use crate::errors::AppResult;
use crate::models::location::{Location, NewLocation};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn add_location(conn: &Connection, l: &NewLocation) -> AppResult<i64> {
    l.validate()?;

    conn.execute(
        "INSERT INTO locations (name, address, phone, email) VALUES (?1, ?2, ?3, ?4)",
        params![l.name.trim(), l.address, l.phone, l.email],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn list_locations(conn: &Connection) -> AppResult<Vec<Location>> {
    let mut stmt =
        conn.prepare("SELECT id, name, address, phone, email FROM locations ORDER BY name ASC, id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_location(conn: &Connection, id: i64) -> AppResult<Option<Location>> {
    let mut stmt =
        conn.prepare("SELECT id, name, address, phone, email FROM locations WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn update_location(conn: &Connection, id: i64, l: &NewLocation) -> AppResult<()> {
    l.validate()?;

    let changed = conn.execute(
        "UPDATE locations SET name = ?1, address = ?2, phone = ?3, email = ?4 WHERE id = ?5",
        params![l.name.trim(), l.address, l.phone, l.email, id],
    )?;

    ensure_affected(changed, "Location", id)
}

pub fn delete_location(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM locations WHERE id = ?1", [id])?;
    ensure_affected(changed, "Location", id)
}

fn map_row(row: &Row) -> Result<Location> {
    Ok(Location {
        id: row.get("id")?,
        name: row.get("name")?,
        address: row.get("address")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
    })
}
