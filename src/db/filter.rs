//! Typed WHERE-clause builder. Every user value travels as a bound
//! parameter; only column names and fixed patterns reach the SQL text.

use chrono::NaiveDate;
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Value;

/// SQL name of the Unicode-aware lowercase function.
pub const UNICODE_LOWER: &str = "unicode_lower";

/// Register `unicode_lower(text)` on `conn`. SQLite's own `lower()` and
/// `LIKE` fold ASCII letters only.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// `column = ?`
    Eq(&'static str, Value),
    /// Case-insensitive substring: `unicode_lower(column) LIKE ? ESCAPE '\'`
    Contains(&'static str, String),
    /// Calendar day of a timestamp column: `date(column) = ?`
    OnDate(&'static str, NaiveDate),
    /// `strftime(format, column) = ?`
    Formatted {
        column: &'static str,
        format: &'static str,
        value: String,
    },
}

impl Clause {
    fn render(&self) -> (String, Value) {
        match self {
            Clause::Eq(col, v) => (format!("{col} = ?"), v.clone()),
            Clause::Contains(col, needle) => (
                format!("{UNICODE_LOWER}({col}) LIKE ? ESCAPE '\\'"),
                Value::Text(contains_pattern(needle)),
            ),
            Clause::OnDate(col, d) => (
                format!("date({col}) = ?"),
                Value::Text(d.format("%Y-%m-%d").to_string()),
            ),
            Clause::Formatted {
                column,
                format,
                value,
            } => (
                format!("strftime('{format}', {column}) = ?"),
                Value::Text(value.clone()),
            ),
        }
    }
}

/// Conjunction of clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Add `clause` only when `value` is present.
    pub fn and_opt<T>(self, value: Option<T>, make: impl FnOnce(T) -> Clause) -> Self {
        match value {
            Some(v) => self.and(make(v)),
            None => self,
        }
    }

    /// SQL fragment for a WHERE clause and its parameters, in order.
    /// The empty predicate renders as `1 = 1`.
    pub fn render(&self) -> (String, Vec<Value>) {
        if self.clauses.is_empty() {
            return ("1 = 1".to_string(), Vec::new());
        }

        let (parts, params): (Vec<String>, Vec<Value>) =
            self.clauses.iter().map(Clause::render).unzip();

        (parts.join(" AND "), params)
    }
}

/// Escape LIKE wildcards so user input matches literally.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `%needle%` with wildcards escaped, lowercased to pair with `unicode_lower`.
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like(&input.trim().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_predicate_matches_everything() {
        let (sql, params) = Predicate::new().render();
        assert_eq!(sql, "1 = 1");
        assert!(params.is_empty());
    }

    #[test]
    fn clauses_are_joined_in_order() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let (sql, params) = Predicate::new()
            .and(Clause::OnDate("h.visit_date", day))
            .and(Clause::Contains("h.registered_by", "Kowal".into()))
            .and(Clause::Eq("h.location_id", Value::Integer(3)))
            .render();

        assert_eq!(
            sql,
            "date(h.visit_date) = ? AND unicode_lower(h.registered_by) LIKE ? ESCAPE '\\' AND h.location_id = ?"
        );
        assert_eq!(
            params,
            vec![
                Value::Text("2025-01-02".into()),
                Value::Text("%kowal%".into()),
                Value::Integer(3)
            ]
        );
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn optional_clauses_are_skipped() {
        let p = Predicate::new()
            .and_opt(None::<String>, |s| Clause::Contains("x", s))
            .and_opt(Some("y".to_string()), |s| Clause::Contains("y", s));
        let (sql, params) = p.render();
        assert_eq!(sql, "unicode_lower(y) LIKE ? ESCAPE '\\'");
        assert_eq!(params, vec![Value::Text("%y%".into())]);
    }

    #[test]
    fn lowercase_function_folds_polish_letters() {
        let conn = Connection::open_in_memory().unwrap();
        register_functions(&conn).unwrap();

        let lowered: String = conn
            .query_row("SELECT unicode_lower('ŁUKASZ Żel')", [], |r| r.get(0))
            .unwrap();
        assert_eq!(lowered, "łukasz żel");

        let hit: bool = conn
            .query_row(
                "SELECT unicode_lower('Łukasz Śliwa') LIKE ?1 ESCAPE '\\'",
                [contains_pattern("ŁUKASZ")],
                |r| r.get(0),
            )
            .unwrap();
        assert!(hit);
    }

    #[test]
    fn null_column_never_matches() {
        let conn = Connection::open_in_memory().unwrap();
        register_functions(&conn).unwrap();
        let v: Option<String> = conn
            .query_row("SELECT unicode_lower(NULL)", [], |r| r.get(0))
            .unwrap();
        assert_eq!(v, None);
    }
}
