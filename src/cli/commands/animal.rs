use crate::cli::commands::{merge, merge_opt, with_session};
use crate::cli::parser::{AnimalAction, AnimalFields, Cli};
use crate::config::Config;
use crate::db::animals::{add_animal, delete_animal, get_animal, list_animals, search_animals, update_animal};
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::animal::{Animal, NewAnimal};
use crate::models::role::Capability;
use crate::ui::messages::{success, warning};
use crate::utils::formatting::or_dash;
use crate::utils::table::Table;
use crate::utils::validate::non_blank;

fn print_animals(rows: &[Animal]) {
    if rows.is_empty() {
        warning("No animals found.");
        return;
    }

    let mut table = Table::new(&["ID", "Name", "Species", "Breed", "Age", "Owner", "Contact", "E-mail"]);
    for a in rows {
        table.add_row(vec![
            a.id.to_string(),
            a.name.clone(),
            a.species.clone(),
            or_dash(&a.breed),
            a.age.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
            a.owner_name.clone(),
            or_dash(&a.owner_contact),
            or_dash(&a.owner_email),
        ]);
    }
    table.print();
}

fn apply(fields: &AnimalFields, base: NewAnimal) -> NewAnimal {
    NewAnimal {
        name: merge(&fields.name, base.name),
        species: merge(&fields.species, base.species),
        breed: merge_opt(&non_blank(fields.breed.clone()), base.breed),
        age: merge_opt(&fields.age, base.age),
        owner_name: merge(&fields.owner_name, base.owner_name),
        owner_contact: merge_opt(&non_blank(fields.owner_contact.clone()), base.owner_contact),
        owner_email: merge_opt(&non_blank(fields.owner_email.clone()), base.owner_email),
        info: merge_opt(&non_blank(fields.info.clone()), base.info),
    }
}

pub fn handle(cli: &Cli, action: &AnimalAction, cfg: &Config) -> AppResult<()> {
    // the visit-booking picker searches animals, so receptionists may too
    let cap = match action {
        AnimalAction::Search { .. } => Capability::Visits,
        _ => Capability::Animals,
    };

    with_session(cli, cfg, cap, |conn, session| {
        match action {
            AnimalAction::Add(fields) => {
                let a = apply(fields, NewAnimal::default());
                let id = add_animal(conn, &a)?;
                audit(conn, "add", &format!("animal #{id}"), &format!("{} by {}", a.name, session.username));
                success(format!("Animal #{id} '{}' added.", a.name));
            }
            AnimalAction::List => print_animals(&list_animals(conn)?),
            AnimalAction::Show { id } => {
                let a = get_animal(conn, *id)?.ok_or(AppError::NotFound { entity: "Animal", id: *id })?;
                print_animals(std::slice::from_ref(&a));
                if let Some(info) = &a.info {
                    println!("\nInfo: {info}");
                }
            }
            AnimalAction::Edit { id, fields } => {
                let current = get_animal(conn, *id)?.ok_or(AppError::NotFound { entity: "Animal", id: *id })?;
                let a = apply(fields, current.into());
                update_animal(conn, *id, &a)?;
                audit(conn, "edit", &format!("animal #{id}"), &format!("by {}", session.username));
                success(format!("Animal #{id} updated."));
            }
            AnimalAction::Delete { id } => {
                delete_animal(conn, *id)?;
                audit(conn, "delete", &format!("animal #{id}"), &format!("by {}", session.username));
                success(format!("Animal #{id} deleted."));
            }
            AnimalAction::Search { term } => print_animals(&search_animals(conn, term)?),
        }
        Ok(())
    })
}
