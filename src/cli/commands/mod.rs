pub mod animal;
pub mod config;
pub mod finance;
pub mod history;
pub mod init;
pub mod location;
pub mod log;
pub mod reminder;
pub mod report;
pub mod user;
pub mod visit;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::auth::{AuthLogic, Session};
use crate::db::pool::{ConnectionProvider, SqliteProvider};
use crate::errors::{AppError, AppResult};
use crate::models::role::Capability;
use crate::ui::messages::ask;
use crate::utils::date::{parse_date, parse_timestamp};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;

/// Log in, check `cap`, then run `func` on the same connection.
///
/// No data is read or written unless both steps succeed.
pub(crate) fn with_session<F, T>(cli: &Cli, cfg: &Config, cap: Capability, func: F) -> AppResult<T>
where
    F: FnOnce(&mut Connection, &Session) -> AppResult<T>,
{
    let provider = SqliteProvider::from_config(cfg);

    provider.with_conn(|conn| {
        let session = open_session(cli, conn)?;
        session.require(cap)?;
        func(conn, &session)
    })
}

fn open_session(cli: &Cli, conn: &Connection) -> AppResult<Session> {
    let username = match &cli.user {
        Some(u) => u.clone(),
        None => ask("Username")?,
    };
    let password = match &cli.password {
        Some(p) => p.clone(),
        None => ask("Password")?,
    };

    AuthLogic::login(conn, &username, &password)
}

pub(crate) fn timestamp_arg(raw: &str) -> AppResult<NaiveDateTime> {
    parse_timestamp(raw)
}

pub(crate) fn date_arg(raw: &str) -> AppResult<NaiveDate> {
    parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.to_string()))
}

/// `Some(new)` replaces, `None` keeps `old`.
pub(crate) fn merge<T: Clone>(new: &Option<T>, old: T) -> T {
    new.clone().unwrap_or(old)
}

/// Same as [`merge`] for nullable columns.
pub(crate) fn merge_opt<T: Clone>(new: &Option<T>, old: Option<T>) -> Option<T> {
    new.clone().or(old)
}
