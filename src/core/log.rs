use crate::db::log::{LogEntry, load_log};
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;
use rusqlite::Connection;

const OP_TARGET_MAX: usize = 60;

fn strip_ansi(s: &str) -> String {
    match Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "delete" => Colour::Red,
        "edit" => Colour::Yellow,
        "complete" => Colour::Cyan,
        "reminder" => Colour::Blue,
        "export" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn op_target(e: &LogEntry) -> String {
    if e.target.is_empty() {
        e.operation.clone()
    } else {
        format!("{} ({})", e.operation, e.target)
    }
}

/// One printable line: id, timestamp, colored operation, message.
fn render_line(e: &LogEntry, id_w: usize, date_w: usize, op_w: usize) -> String {
    let date = chrono::DateTime::parse_from_rfc3339(&e.date)
        .map(|dt| dt.format("%F %T").to_string())
        .unwrap_or_else(|_| e.date.clone());

    let visible = op_target(e);
    let visible = if visible.chars().count() > OP_TARGET_MAX {
        let mut s: String = visible.chars().take(OP_TARGET_MAX - 3).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    // only the operation word is colored
    let color = color_for_operation(&e.operation);
    let colored = match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    };

    let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

    format!(
        "{:>id_w$}: {:<date_w$} | {}{} => {}",
        e.id, date, colored, padding, e.message
    )
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_log(conn)?;

        if entries.is_empty() {
            info("The audit log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| op_target(e).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_TARGET_MAX);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = "YYYY-MM-DD HH:MM:SS".len();

        println!("📜 Audit log:\n");
        for e in &entries {
            println!("{}", render_line(e, id_w, date_w, op_w));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(op: &str, target: &str) -> LogEntry {
        LogEntry {
            id: 7,
            date: "2025-03-01T10:00:00+01:00".into(),
            operation: op.into(),
            target: target.into(),
            message: "ok".into(),
        }
    }

    #[test]
    fn padding_ignores_color_codes() {
        let line = render_line(&entry("add", "animal #1"), 1, 19, 20);
        let plain = strip_ansi(&line);
        assert_eq!(plain, "7: 2025-03-01 10:00:00 | add (animal #1)      => ok");
    }

    #[test]
    fn long_targets_are_truncated() {
        let target = "x".repeat(80);
        let plain = strip_ansi(&render_line(&entry("edit", &target), 1, 19, 60));
        assert!(plain.contains("..."));
        assert!(!plain.contains(&target));
    }
}
