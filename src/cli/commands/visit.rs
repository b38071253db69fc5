use crate::cli::commands::{date_arg, merge, merge_opt, timestamp_arg, with_session};
use crate::cli::parser::{Cli, VisitAction};
use crate::config::Config;
use crate::db::log::audit;
use crate::db::visits::{add_visit, complete_visit, delete_visit, get_visit, list_visits, update_visit, visits_for_date};
use crate::errors::{AppError, AppResult};
use crate::models::history::Completion;
use crate::models::role::Capability;
use crate::models::visit::NewVisit;
use crate::ui::messages::{header, success, warning};
use crate::utils::date::{format_ts, now, today};
use crate::utils::formatting::truncate;
use crate::utils::table::Table;
use crate::utils::validate::non_blank;

pub fn handle(cli: &Cli, action: &VisitAction, cfg: &Config) -> AppResult<()> {
    let cap = match action {
        VisitAction::Schedule { .. } => Capability::Schedule,
        _ => Capability::Visits,
    };

    with_session(cli, cfg, cap, |conn, session| {
        match action {
            VisitAction::Add(fields) => {
                let animal_id = fields.animal_id.ok_or(AppError::MissingField("animal"))?;
                let raw_date = fields.visit_date.as_deref().ok_or(AppError::MissingField("date"))?;

                let v = NewVisit {
                    animal_id,
                    reservation_date: now(),
                    visit_date: timestamp_arg(raw_date)?,
                    registered_by: session.username.clone(),
                    description: fields.description.clone().unwrap_or_default(),
                    location_id: fields.location_id,
                };
                let id = add_visit(conn, &v)?;
                audit(conn, "add", &format!("visit #{id}"), &format!("animal #{animal_id} by {}", session.username));
                success(format!("Visit #{id} booked for {}.", format_ts(&v.visit_date)));
            }
            VisitAction::List => {
                let rows = list_visits(conn)?;
                if rows.is_empty() {
                    warning("No scheduled visits.");
                    return Ok(());
                }
                let mut table = Table::new(&["ID", "Animal", "Visit date", "Booked", "By", "Description", "Location"]);
                for v in rows {
                    table.add_row(vec![
                        v.id.to_string(),
                        v.animal_name,
                        format_ts(&v.visit_date),
                        format_ts(&v.reservation_date),
                        v.registered_by,
                        truncate(&v.description, 40),
                        v.location_id.map(|l| l.to_string()).unwrap_or_else(|| "-".into()),
                    ]);
                }
                table.print();
            }
            VisitAction::Edit { id, fields } => {
                let current = get_visit(conn, *id)?.ok_or(AppError::NotFound { entity: "Visit", id: *id })?;
                let visit_date = match &fields.visit_date {
                    Some(raw) => timestamp_arg(raw)?,
                    None => current.visit_date,
                };
                let v = NewVisit {
                    animal_id: merge(&fields.animal_id, current.animal_id),
                    reservation_date: current.reservation_date,
                    visit_date,
                    registered_by: current.registered_by,
                    description: merge(&non_blank(fields.description.clone()), current.description),
                    location_id: merge_opt(&fields.location_id, current.location_id),
                };
                update_visit(conn, *id, &v)?;
                audit(conn, "edit", &format!("visit #{id}"), &format!("by {}", session.username));
                success(format!("Visit #{id} updated."));
            }
            VisitAction::Delete { id } => {
                delete_visit(conn, *id)?;
                audit(conn, "delete", &format!("visit #{id}"), &format!("by {}", session.username));
                success(format!("Visit #{id} cancelled."));
            }
            VisitAction::Complete {
                id,
                medication,
                indications,
                payment,
                location_id,
                attachments,
            } => {
                let c = Completion {
                    registered_by: session.username.clone(),
                    medication: non_blank(medication.clone()),
                    indications: indications.clone(),
                    payment: Some(*payment),
                    location_id: *location_id,
                    attachments: attachments.clone(),
                };
                let history_id = complete_visit(conn, *id, &c)?;
                audit(
                    conn,
                    "complete",
                    &format!("visit #{id}"),
                    &format!("history #{history_id} by {}", session.username),
                );
                success(format!("Visit #{id} completed, history record #{history_id}."));
            }
            VisitAction::Schedule { date } => {
                let day = match date {
                    Some(raw) => date_arg(raw)?,
                    None => today(),
                };
                header(format!("Schedule for {}", day.format("%A %Y-%m-%d")));

                let rows = visits_for_date(conn, day)?;
                if rows.is_empty() {
                    warning("No visits on this day.");
                    return Ok(());
                }
                let mut table = Table::new(&["Time", "ID", "Animal", "Description"]);
                for v in rows {
                    table.add_row(vec![
                        v.time.format("%H:%M").to_string(),
                        v.visit_id.to_string(),
                        v.animal_name,
                        truncate(&v.description, 50),
                    ]);
                }
                table.print();
            }
        }
        Ok(())
    })
}
