use crate::cli::commands::{date_arg, timestamp_arg, with_session};
use crate::cli::parser::{Cli, HistoryAction};
use crate::config::Config;
use crate::db::history::{add_history, get_filtered_history, list_attachments, search_history};
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::models::history::{HistoryFilter, HistoryRecord, HistorySearch, NewHistory};
use crate::models::role::Capability;
use crate::ui::messages::{success, warning};
use crate::utils::date::{format_ts, now};
use crate::utils::formatting::{money, or_dash, truncate};
use crate::utils::table::Table;
use crate::utils::validate::non_blank;

fn print_history(rows: &[HistoryRecord]) {
    if rows.is_empty() {
        warning("No history records found.");
        return;
    }

    let mut table = Table::new(&[
        "ID", "Animal", "Visit date", "Doctor", "Reason", "Medication", "Indications", "Payment",
    ]);
    for h in rows {
        table.add_row(vec![
            h.id.to_string(),
            h.animal_name.clone(),
            format_ts(&h.visit_date),
            h.registered_by.clone(),
            truncate(&or_dash(&h.description_reason), 30),
            or_dash(&h.medication),
            truncate(&or_dash(&h.indications), 30),
            h.payment.map(money).unwrap_or_else(|| "-".into()),
        ]);
    }
    table.print();
}

pub fn handle(cli: &Cli, action: &HistoryAction, cfg: &Config) -> AppResult<()> {
    with_session(cli, cfg, Capability::History, |conn, session| {
        match action {
            HistoryAction::Add {
                animal_id,
                visit_date,
                reason,
                medication,
                indications,
                payment,
                location_id,
                attachments,
            } => {
                let h = NewHistory {
                    animal_id: *animal_id,
                    visit_date: match visit_date {
                        Some(raw) => timestamp_arg(raw)?,
                        None => now(),
                    },
                    registered_by: session.username.clone(),
                    description_reason: non_blank(reason.clone()),
                    medication: non_blank(medication.clone()),
                    indications: non_blank(Some(indications.clone())),
                    payment: Some(*payment),
                    location_id: *location_id,
                    attachments: attachments.clone(),
                };
                let id = add_history(conn, &h)?;
                audit(conn, "add", &format!("history #{id}"), &format!("animal #{animal_id} by {}", session.username));
                success(format!("History record #{id} added."));
            }
            HistoryAction::List {
                date,
                doctor,
                medication,
            } => {
                let filter = HistoryFilter {
                    date: date.as_deref().map(date_arg).transpose()?,
                    doctor: non_blank(doctor.clone()),
                    medication: non_blank(medication.clone()),
                };
                print_history(&get_filtered_history(conn, &filter)?);
            }
            HistoryAction::Search {
                name,
                breed,
                owner,
                date,
                reason,
            } => {
                let search = HistorySearch {
                    name: name.clone(),
                    breed: breed.clone(),
                    owner: owner.clone(),
                    visit_date: date.clone(),
                    reason: reason.clone(),
                };
                let hits = search_history(conn, &search)?;
                if hits.is_empty() {
                    warning("No matching records.");
                    return Ok(());
                }
                let mut table = Table::new(&["History", "Animal", "Species", "Breed", "Owner", "Visit date", "Reason"]);
                for h in hits {
                    table.add_row(vec![
                        h.history_id.to_string(),
                        format!("{} (#{})", h.name, h.animal_id),
                        h.species,
                        or_dash(&h.breed),
                        h.owner_name,
                        format_ts(&h.visit_date),
                        truncate(&or_dash(&h.description_reason), 40),
                    ]);
                }
                table.print();
            }
            HistoryAction::Attachments { id } => {
                let files = list_attachments(conn, *id)?;
                if files.is_empty() {
                    warning(format!("History record #{id} has no attachments."));
                    return Ok(());
                }
                for f in files {
                    println!("📎 {}", f.file_path);
                }
            }
        }
        Ok(())
    })
}
