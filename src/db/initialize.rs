use crate::errors::AppResult;
use rusqlite::Connection;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS log (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        date      TEXT NOT NULL,
        operation TEXT NOT NULL,
        target    TEXT DEFAULT '',
        message   TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS locations (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        name    TEXT NOT NULL,
        address TEXT,
        phone   TEXT,
        email   TEXT
    );

    CREATE TABLE IF NOT EXISTS animals (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        name          TEXT NOT NULL,
        species       TEXT NOT NULL,
        breed         TEXT,
        age           INTEGER,
        owner_name    TEXT NOT NULL,
        owner_contact TEXT,
        owner_email   TEXT,
        info          TEXT
    );

    CREATE TABLE IF NOT EXISTS visits (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        animal_id        INTEGER NOT NULL REFERENCES animals(id),
        reservation_date TEXT NOT NULL,
        visit_date       TEXT NOT NULL,
        registered_by    TEXT NOT NULL,
        description      TEXT NOT NULL,
        location_id      INTEGER REFERENCES locations(id)
    );

    CREATE TABLE IF NOT EXISTS history (
        id                 INTEGER PRIMARY KEY AUTOINCREMENT,
        animal_id          INTEGER NOT NULL REFERENCES animals(id),
        visit_date         TEXT NOT NULL,
        registered_by      TEXT NOT NULL,
        description_reason TEXT,
        medication         TEXT,
        indications        TEXT,
        payment            REAL,
        location_id        INTEGER REFERENCES locations(id)
    );

    CREATE TABLE IF NOT EXISTS history_attachments (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        history_id INTEGER NOT NULL REFERENCES history(id) ON DELETE CASCADE,
        file_path  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS users (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        username      TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role          TEXT NOT NULL CHECK(role IN ('admin','vet','receptionist')),
        created_at    TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE INDEX IF NOT EXISTS idx_visits_date ON visits(visit_date);
    CREATE INDEX IF NOT EXISTS idx_history_date ON history(visit_date);
    CREATE INDEX IF NOT EXISTS idx_history_location ON history(location_id);
"#;

/// Create every table and index. Safe to run on an existing database.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "foreign_keys", true).unwrap();
    crate::db::filter::register_functions(&conn).unwrap();
    init_db(&conn).unwrap();
    conn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let conn = test_conn();
        init_db(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('animals','visits','history','history_attachments','locations','users','log')",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(tables, 7);
    }

    #[test]
    fn role_is_constrained() {
        let conn = test_conn();
        let res = conn.execute(
            "INSERT INTO users (username, password_hash, role) VALUES ('x', 'h', 'nurse')",
            [],
        );
        assert!(res.is_err());
    }
}
