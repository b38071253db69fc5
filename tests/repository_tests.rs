use vetclinic::core::auth::AuthLogic;
use vetclinic::core::reports::ReportLogic;
use vetclinic::db::animals::{add_animal, list_animals};
use vetclinic::db::history::list_history;
use vetclinic::db::pool::ConnectionProvider;
use vetclinic::db::visits::{add_visit, complete_visit, list_visits};
use vetclinic::errors::AppError;
use vetclinic::export::{ExportFormat, ExportLogic};
use vetclinic::models::animal::NewAnimal;
use vetclinic::models::history::Completion;
use vetclinic::models::role::{Capability, Role};
use vetclinic::models::visit::NewVisit;
use vetclinic::utils::date::parse_timestamp;

mod common;
use common::{provider, temp_out};

fn luna() -> NewAnimal {
    NewAnimal {
        name: "Luna".into(),
        species: "cat".into(),
        owner_name: "Marta".into(),
        ..Default::default()
    }
}

fn booking(animal_id: i64) -> NewVisit {
    NewVisit {
        animal_id,
        reservation_date: parse_timestamp("2025-01-10 12:00").unwrap(),
        visit_date: parse_timestamp("2025-01-20 09:00").unwrap(),
        registered_by: "desk".into(),
        description: "dental check".into(),
        location_id: None,
    }
}

#[test]
fn added_animal_is_listed() {
    let p = provider("repo_added_animal");

    let id = p.with_conn(|conn| add_animal(conn, &luna())).unwrap();
    let all = p.with_conn(|conn| list_animals(conn)).unwrap();

    assert!(all.iter().any(|a| a.id == id && a.name == "Luna"));
}

#[test]
fn completion_copies_visit_fields() {
    let p = provider("repo_completion_fields");

    let history_id = p
        .with_conn(|conn| {
            let a = add_animal(conn, &luna())?;
            let v = add_visit(conn, &booking(a))?;
            complete_visit(
                conn,
                v,
                &Completion {
                    registered_by: "dr Nowak".into(),
                    indications: "soft food".into(),
                    payment: Some(200.0),
                    ..Default::default()
                },
            )
        })
        .unwrap();

    let history = p.with_conn(|conn| list_history(conn)).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, history_id);
    assert_eq!(history[0].description_reason.as_deref(), Some("dental check"));
    assert_eq!(
        history[0].visit_date,
        parse_timestamp("2025-01-20 09:00").unwrap()
    );
    assert!(p.with_conn(|conn| list_visits(conn)).unwrap().is_empty());
}

#[test]
fn completion_rolls_back_when_delete_fails() {
    let p = provider("repo_completion_rollback");

    let visit = p
        .with_conn(|conn| {
            let a = add_animal(conn, &luna())?;
            let v = add_visit(conn, &booking(a))?;
            conn.execute_batch(
                "CREATE TRIGGER lock_visits BEFORE DELETE ON visits
                 BEGIN SELECT RAISE(ABORT, 'locked'); END;",
            )?;
            Ok(v)
        })
        .unwrap();

    let res = p.with_conn(|conn| {
        complete_visit(
            conn,
            visit,
            &Completion {
                registered_by: "dr Nowak".into(),
                indications: "none".into(),
                payment: Some(1.0),
                ..Default::default()
            },
        )
    });
    assert!(matches!(res, Err(AppError::Db(_))));

    assert!(p.with_conn(|conn| list_history(conn)).unwrap().is_empty());
    assert_eq!(p.with_conn(|conn| list_visits(conn)).unwrap().len(), 1);
}

#[test]
fn completion_without_payment_is_rejected() {
    let p = provider("repo_completion_payment");

    let res = p.with_conn(|conn| {
        let a = add_animal(conn, &luna())?;
        let v = add_visit(conn, &booking(a))?;
        complete_visit(
            conn,
            v,
            &Completion {
                registered_by: "dr Nowak".into(),
                indications: "none".into(),
                payment: None,
                ..Default::default()
            },
        )
    });
    assert!(matches!(res, Err(AppError::MissingField("payment"))));
}

#[test]
fn receptionist_session_is_limited() {
    let p = provider("repo_receptionist_session");

    let session = p
        .with_conn(|conn| {
            AuthLogic::register(conn, "desk", "pw", Role::Receptionist, 4)?;
            AuthLogic::login(conn, "desk", "pw")
        })
        .unwrap();

    assert!(session.require(Capability::Visits).is_ok());
    assert!(matches!(
        session.require(Capability::Reports),
        Err(AppError::Forbidden { .. })
    ));
}

#[test]
fn json_export_contains_bundle() {
    let p = provider("repo_json_export");
    let bundle = p.with_conn(|conn| ReportLogic::build(conn, None)).unwrap();

    let out = temp_out("repo_json_export", "json");
    ExportLogic::export_report(&bundle, ExportFormat::Json, out.as_ref(), false).unwrap();

    let json = std::fs::read_to_string(&out).unwrap();
    assert!(json.contains("\"medications\""));
}

#[test]
fn xlsx_export_writes_a_workbook() {
    let p = provider("repo_xlsx_export");
    let bundle = p.with_conn(|conn| ReportLogic::build(conn, None)).unwrap();

    let out = temp_out("repo_xlsx_export", "xlsx");
    ExportLogic::export_report(&bundle, ExportFormat::Xlsx, out.as_ref(), false).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    // xlsx is a zip container
    assert!(bytes.starts_with(b"PK"));
}
