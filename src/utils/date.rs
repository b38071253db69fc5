use crate::errors::{AppError, AppResult};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Row;

/// Storage format of every timestamp column.
pub const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Parse an operator-supplied timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD HH:MM`, the same with a `T`
/// separator, or a bare `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    parse_date(s)
        .map(|d| d.and_time(NaiveTime::MIN))
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub fn format_ts(ts: &NaiveDateTime) -> String {
    ts.format(TS_FORMAT).to_string()
}

/// Read a timestamp column, mapping parse failures to a conversion error.
pub fn ts_from_row(row: &Row, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, TS_FORMAT)
        .or_else(|_| {
            NaiveDate::parse_from_str(&raw, DATE_FORMAT).map(|d| d.and_time(NaiveTime::MIN))
        })
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(raw.clone())),
            )
        })
}

/// Inclusive bounds of the window starting at `from` and spanning `days`
/// further calendar days: `[from 00:00:00, from+days 23:59:59]`.
pub fn window(from: NaiveDate, days: i64) -> (NaiveDateTime, NaiveDateTime) {
    let start = from.and_time(NaiveTime::MIN);
    let last_day = from
        .checked_add_days(Days::new(days.max(0) as u64))
        .unwrap_or(NaiveDate::MAX);
    let end = last_day.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN));
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_timestamp_shapes() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2025-03-14 09:30").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-03-14T09:30:00").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2025-03-14").unwrap(),
            expected.date().and_time(NaiveTime::MIN)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_timestamp("14/03/2025"),
            Err(AppError::InvalidDate(_))
        ));
    }

    #[test]
    fn window_covers_whole_last_day() {
        let from = NaiveDate::from_ymd_opt(2025, 12, 28).unwrap();
        let (start, end) = window(from, 7);
        assert_eq!(format_ts(&start), "2025-12-28 00:00:00");
        assert_eq!(format_ts(&end), "2026-01-04 23:59:59");
    }
}
