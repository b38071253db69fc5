//! Upcoming-visit reminders, sent one at a time on operator request.

use crate::db::animals::{get_animal, owner_email};
use crate::db::log::audit;
use crate::db::visits::{get_visit, upcoming_visits};
use crate::errors::{AppError, AppResult};
use crate::mail::Mailer;
use crate::models::visit::UpcomingVisit;
use crate::utils::date::{format_ts, window};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;

/// Default look-ahead, in days.
pub const REMINDER_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq)]
pub enum ReminderOutcome {
    Sent { to: String, owner: String },
    /// The owner has no e-mail address; nothing was sent.
    MissingEmail { owner: String },
}

pub fn reminder_subject(animal: &str) -> String {
    format!("Visit reminder - {animal}")
}

pub fn reminder_body(animal: &str, visit_date: &NaiveDateTime) -> String {
    format!(
        "Reminder: the visit for {animal} is scheduled on {}. \
         If the visit is no longer needed, please contact us.",
        format_ts(visit_date)
    )
}

/// Visits from `today` 00:00:00 through `today + days` 23:59:59.
pub fn upcoming_reminders(conn: &Connection, today: NaiveDate, days: i64) -> AppResult<Vec<UpcomingVisit>> {
    let (from, to) = window(today, days);
    upcoming_visits(conn, from, to)
}

pub fn send_reminder(conn: &Connection, mailer: &dyn Mailer, visit_id: i64) -> AppResult<ReminderOutcome> {
    let visit = get_visit(conn, visit_id)?.ok_or(AppError::NotFound {
        entity: "Visit",
        id: visit_id,
    })?;
    let animal = get_animal(conn, visit.animal_id)?.ok_or(AppError::NotFound {
        entity: "Animal",
        id: visit.animal_id,
    })?;
    let target = format!("visit #{visit_id}");

    let Some(to) = owner_email(conn, animal.id)? else {
        audit(
            conn,
            "reminder",
            &target,
            &format!("skipped, no e-mail for {}", animal.owner_name),
        );
        return Ok(ReminderOutcome::MissingEmail {
            owner: animal.owner_name,
        });
    };

    let subject = reminder_subject(&animal.name);
    let body = reminder_body(&animal.name, &visit.visit_date);

    if let Err(e) = mailer.send(&to, &subject, &body) {
        audit(conn, "reminder", &target, &format!("failed for {to}: {e}"));
        return Err(e);
    }

    audit(conn, "reminder", &target, &format!("sent to {to}"));
    Ok(ReminderOutcome::Sent {
        to,
        owner: animal.owner_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::animals::add_animal;
    use crate::db::initialize::test_conn;
    use crate::db::log::load_log;
    use crate::db::visits::add_visit;
    use crate::models::animal::NewAnimal;
    use crate::models::visit::NewVisit;
    use crate::utils::date::parse_timestamp;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        sent: RefCell<Vec<(String, String, String)>>,
    }

    impl Mailer for Recorder {
        fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
            self.sent
                .borrow_mut()
                .push((to.into(), subject.into(), body.into()));
            Ok(())
        }
    }

    struct Broken;

    impl Mailer for Broken {
        fn send(&self, _: &str, _: &str, _: &str) -> AppResult<()> {
            Err(AppError::Email("relay refused".into()))
        }
    }

    fn seed(conn: &Connection, email: Option<&str>) -> i64 {
        let animal = add_animal(
            conn,
            &NewAnimal {
                name: "Fafik".into(),
                species: "dog".into(),
                owner_name: "Piotr".into(),
                owner_email: email.map(str::to_string),
                ..Default::default()
            },
        )
        .unwrap();
        add_visit(
            conn,
            &NewVisit {
                animal_id: animal,
                reservation_date: parse_timestamp("2025-06-01 09:00").unwrap(),
                visit_date: parse_timestamp("2025-06-05 10:30").unwrap(),
                registered_by: "desk".into(),
                description: "check-up".into(),
                location_id: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn missing_email_never_calls_mailer() {
        let conn = test_conn();
        let visit = seed(&conn, None);
        let mailer = Recorder::default();

        let out = send_reminder(&conn, &mailer, visit).unwrap();
        assert_eq!(
            out,
            ReminderOutcome::MissingEmail {
                owner: "Piotr".into()
            }
        );
        assert!(mailer.sent.borrow().is_empty());
    }

    #[test]
    fn sends_fixed_template_and_audits() {
        let conn = test_conn();
        let visit = seed(&conn, Some("piotr@example.com"));
        let mailer = Recorder::default();

        let out = send_reminder(&conn, &mailer, visit).unwrap();
        assert!(matches!(out, ReminderOutcome::Sent { ref to, .. } if to == "piotr@example.com"));

        let sent = mailer.sent.borrow();
        assert_eq!(sent[0].1, "Visit reminder - Fafik");
        assert!(sent[0].2.contains("scheduled on 2025-06-05 10:30:00"));

        let log = load_log(&conn).unwrap();
        assert_eq!(log.last().unwrap().operation, "reminder");
    }

    #[test]
    fn mailer_failure_propagates() {
        let conn = test_conn();
        let visit = seed(&conn, Some("piotr@example.com"));
        assert!(matches!(
            send_reminder(&conn, &Broken, visit),
            Err(AppError::Email(_))
        ));
    }

    #[test]
    fn unknown_visit_is_not_found() {
        let conn = test_conn();
        assert!(matches!(
            send_reminder(&conn, &Recorder::default(), 404),
            Err(AppError::NotFound { entity: "Visit", .. })
        ));
    }

    #[test]
    fn window_is_seven_days_ahead() {
        let conn = test_conn();
        seed(&conn, None);

        let june_1 = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(upcoming_reminders(&conn, june_1, REMINDER_DAYS).unwrap().len(), 1);

        let june_6 = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
        assert!(upcoming_reminders(&conn, june_6, REMINDER_DAYS).unwrap().is_empty());
    }
}
