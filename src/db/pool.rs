//! SQLite connection handling: one short-lived connection per operation.

use crate::config::Config;
use crate::db::filter::register_functions;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use rusqlite::{Connection, OpenFlags, Transaction};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open an existing database. A missing file is a connection error,
    /// never a silently created empty database.
    pub fn open_with_timeout(path: &Path, timeout: Duration) -> AppResult<Self> {
        let flags =
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(path, flags)
            .map_err(|e| AppError::Connection(format!("{}: {}", path.display(), e)))?;

        Self::configure(conn, timeout)
    }

    /// Open or create the database file (used by `init`).
    pub fn create(path: &Path, timeout: Duration) -> AppResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| AppError::Connection(format!("{}: {}", path.display(), e)))?;

        Self::configure(conn, timeout)
    }

    fn configure(conn: Connection, timeout: Duration) -> AppResult<Self> {
        conn.busy_timeout(timeout)
            .map_err(|e| AppError::Connection(e.to_string()))?;
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(|e| AppError::Connection(e.to_string()))?;
        register_functions(&conn).map_err(|e| AppError::Connection(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Helper to execute a closure with a mutable connection reference.
    pub fn with_conn<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        func(&mut self.conn)
    }
}

/// Source of database connections handed to every operation.
pub trait ConnectionProvider {
    fn open(&self) -> AppResult<DbPool>;

    /// Run `func` on a fresh connection; the connection is closed when this
    /// returns, on success and on error alike.
    fn with_conn<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        let mut pool = self.open()?;
        pool.with_conn(func)
    }
}

/// File-backed provider built from the loaded configuration.
#[derive(Debug, Clone)]
pub struct SqliteProvider {
    path: PathBuf,
    timeout: Duration,
}

impl SqliteProvider {
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.database, cfg.busy_timeout())
    }
}

impl ConnectionProvider for SqliteProvider {
    fn open(&self) -> AppResult<DbPool> {
        DbPool::open_with_timeout(&self.path, self.timeout)
    }
}

/// Run `func` inside one transaction: commit on `Ok`, roll back on `Err`.
pub fn in_transaction<F, T>(conn: &mut Connection, func: F) -> AppResult<T>
where
    F: FnOnce(&Transaction) -> AppResult<T>,
{
    let tx = conn.transaction()?;

    match func(&tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rb) = tx.rollback() {
                warning(format!("Rollback failed: {}", rb));
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_connection_error() {
        let path = std::env::temp_dir().join("vetclinic_pool_missing.sqlite");
        let _ = std::fs::remove_file(&path);

        let provider = SqliteProvider::new(&path, Duration::from_secs(1));
        assert!(matches!(provider.open(), Err(AppError::Connection(_))));
        assert!(!path.exists());
    }

    #[test]
    fn failed_closure_rolls_back() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (x INTEGER);").unwrap();

        let res: AppResult<()> = in_transaction(&mut conn, |tx| {
            tx.execute("INSERT INTO t (x) VALUES (1)", [])?;
            Err(AppError::MissingField("x"))
        });
        assert!(res.is_err());

        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 0);
    }
}
