//! Presence checks run before any database call.

use crate::errors::{AppError, AppResult};

/// Fails with `MissingField` when `value` is empty or only whitespace.
pub fn require(field: &'static str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::MissingField(field));
    }
    Ok(())
}

/// Fails with `InvalidNumber` for NaN or infinite amounts.
pub fn finite(field: &'static str, value: f64) -> AppResult<f64> {
    if !value.is_finite() {
        return Err(AppError::InvalidNumber(format!("{field}: {value}")));
    }
    Ok(value)
}

/// Turn a blank optional input into `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        assert!(matches!(
            require("name", "   "),
            Err(AppError::MissingField("name"))
        ));
        assert!(require("name", "Burek").is_ok());
    }

    #[test]
    fn amounts_must_be_finite() {
        assert_eq!(finite("payment", 12.5).unwrap(), 12.5);
        assert!(matches!(
            finite("payment", f64::NAN),
            Err(AppError::InvalidNumber(_))
        ));
        assert!(finite("payment", f64::INFINITY).is_err());
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(Some("  x ".into())), Some("x".into()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }
}
