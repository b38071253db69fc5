use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Financial summary period: a whole year or a single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Year(i32),
    Month { year: i32, month: u32 },
}

impl Period {
    /// Accepts `YYYY` (length 4) or `YYYY-MM` (length 7); anything else is
    /// an invalid format.
    pub fn parse(s: &str) -> AppResult<Self> {
        let s = s.trim();
        let invalid = || AppError::InvalidPeriod(s.to_string());

        match s.len() {
            4 => {
                if !s.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                let year: i32 = s.parse().map_err(|_| invalid())?;
                Ok(Period::Year(year))
            }
            7 => {
                if !s.is_ascii() || s.as_bytes()[4] != b'-' {
                    return Err(invalid());
                }
                let date = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
                    .map_err(|_| invalid())?;
                Ok(Period::Month {
                    year: date.year(),
                    month: date.month(),
                })
            }
            _ => Err(invalid()),
        }
    }

    /// `strftime` pattern matching this period's granularity.
    pub fn sql_format(&self) -> &'static str {
        match self {
            Period::Year(_) => "%Y",
            Period::Month { .. } => "%Y-%m",
        }
    }

    /// Value compared against `strftime(sql_format(), visit_date)`.
    pub fn key(&self) -> String {
        match self {
            Period::Year(y) => format!("{y:04}"),
            Period::Month { year, month } => format!("{year:04}-{month:02}"),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_and_month_are_accepted() {
        assert_eq!(Period::parse("2024").unwrap(), Period::Year(2024));
        assert_eq!(
            Period::parse("2024-05").unwrap(),
            Period::Month {
                year: 2024,
                month: 5
            }
        );
    }

    #[test]
    fn other_lengths_are_rejected() {
        for bad in ["24", "2024-5", "2024-05-01", ""] {
            assert!(
                matches!(Period::parse(bad), Err(AppError::InvalidPeriod(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn right_length_but_not_a_date() {
        assert!(Period::parse("abcd").is_err());
        assert!(Period::parse("2024-13").is_err());
        assert!(Period::parse("2024/05").is_err());
    }

    #[test]
    fn key_matches_strftime_output() {
        let p = Period::parse("2024-05").unwrap();
        assert_eq!(p.sql_format(), "%Y-%m");
        assert_eq!(p.key(), "2024-05");
        assert_eq!(Period::Year(2024).sql_format(), "%Y");
    }
}
