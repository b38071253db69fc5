use crate::cli::commands::with_session;
use crate::cli::parser::{Cli, ReminderAction};
use crate::config::Config;
use crate::core::reminders::{ReminderOutcome, send_reminder, upcoming_reminders};
use crate::errors::AppResult;
use crate::mail::SmtpMailer;
use crate::models::role::Capability;
use crate::ui::messages::{header, success, warning};
use crate::utils::date::{format_ts, today};
use crate::utils::table::Table;

pub fn handle(cli: &Cli, action: &ReminderAction, cfg: &Config) -> AppResult<()> {
    with_session(cli, cfg, Capability::Notifications, |conn, _| {
        match action {
            ReminderAction::List { days } => {
                let days = days.unwrap_or(cfg.reminder_days);
                header(format!("Visits in the next {days} days"));

                let rows = upcoming_reminders(conn, today(), days)?;
                if rows.is_empty() {
                    warning("No upcoming visits.");
                    return Ok(());
                }
                let mut table = Table::new(&["Visit", "Animal", "Date", "Owner"]);
                for v in rows {
                    table.add_row(vec![
                        v.visit_id.to_string(),
                        v.animal_name,
                        format_ts(&v.visit_date),
                        v.owner_name,
                    ]);
                }
                table.print();
            }
            ReminderAction::Send { visit_id } => {
                let mailer = SmtpMailer::new(cfg.smtp.clone());
                match send_reminder(conn, &mailer, *visit_id)? {
                    ReminderOutcome::Sent { to, owner } => {
                        success(format!("Reminder sent to {owner} <{to}>."));
                    }
                    ReminderOutcome::MissingEmail { owner } => {
                        warning(format!("{owner} has no e-mail address, reminder not sent."));
                    }
                }
            }
        }
        Ok(())
    })
}
