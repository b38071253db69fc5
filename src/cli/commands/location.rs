use crate::cli::commands::{merge, merge_opt, with_session};
use crate::cli::parser::{Cli, LocationAction, LocationFields};
use crate::config::Config;
use crate::db::locations::{add_location, delete_location, get_location, list_locations, update_location};
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::location::NewLocation;
use crate::models::role::Capability;
use crate::ui::messages::{success, warning};
use crate::utils::formatting::or_dash;
use crate::utils::table::Table;
use crate::utils::validate::non_blank;

fn apply(fields: &LocationFields, base: NewLocation) -> NewLocation {
    NewLocation {
        name: merge(&fields.name, base.name),
        address: merge_opt(&non_blank(fields.address.clone()), base.address),
        phone: merge_opt(&non_blank(fields.phone.clone()), base.phone),
        email: merge_opt(&non_blank(fields.email.clone()), base.email),
    }
}

pub fn handle(cli: &Cli, action: &LocationAction, cfg: &Config) -> AppResult<()> {
    with_session(cli, cfg, Capability::Locations, |conn, session| {
        match action {
            LocationAction::Add(fields) => {
                let l = apply(fields, NewLocation::default());
                let id = add_location(conn, &l)?;
                audit(conn, "add", &format!("location #{id}"), &format!("{} by {}", l.name, session.username));
                success(format!("Location #{id} '{}' added.", l.name));
            }
            LocationAction::List => {
                let rows = list_locations(conn)?;
                if rows.is_empty() {
                    warning("No locations defined.");
                    return Ok(());
                }
                let mut table = Table::new(&["ID", "Name", "Address", "Phone", "E-mail"]);
                for l in rows {
                    table.add_row(vec![
                        l.id.to_string(),
                        l.name,
                        or_dash(&l.address),
                        or_dash(&l.phone),
                        or_dash(&l.email),
                    ]);
                }
                table.print();
            }
            LocationAction::Edit { id, fields } => {
                let current = get_location(conn, *id)?.ok_or(AppError::NotFound { entity: "Location", id: *id })?;
                update_location(conn, *id, &apply(fields, current.into()))?;
                audit(conn, "edit", &format!("location #{id}"), &format!("by {}", session.username));
                success(format!("Location #{id} updated."));
            }
            LocationAction::Delete { id } => {
                delete_location(conn, *id)?;
                audit(conn, "delete", &format!("location #{id}"), &format!("by {}", session.username));
                success(format!("Location #{id} deleted."));
            }
        }
        Ok(())
    })
}
