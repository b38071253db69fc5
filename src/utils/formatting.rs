//! Formatting utilities used for CLI and export outputs.

/// Two-decimal rendering used for every payment amount.
pub fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Same as [`money`] with the currency suffix, e.g. `60.00 PLN`.
pub fn money_with_currency(amount: f64, currency: &str) -> String {
    format!("{} {}", money(amount), currency)
}

/// Render an optional text cell, `-` when empty.
pub fn or_dash<T: AsRef<str>>(value: &Option<T>) -> String {
    match value {
        Some(v) if !v.as_ref().trim().is_empty() => v.as_ref().to_string(),
        _ => "-".to_string(),
    }
}

/// Cut a long free-text value for table output.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_uses_two_decimals() {
        assert_eq!(money(60.0), "60.00");
        assert_eq!(money(10.0 / 3.0), "3.33");
        assert_eq!(money_with_currency(5.5, "PLN"), "5.50 PLN");
    }

    #[test]
    fn blank_values_render_as_dash() {
        assert_eq!(or_dash(&None::<String>), "-");
        assert_eq!(or_dash(&Some("  ")), "-");
        assert_eq!(or_dash(&Some("Labrador")), "Labrador");
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long description", 10), "a very ...");
    }
}
