use crate::db::ensure_affected;
use crate::db::history::insert_history;
use crate::db::pool::in_transaction;
use crate::errors::{AppError, AppResult};
use crate::models::history::{Completion, NewHistory};
use crate::models::visit::{NewVisit, ScheduledVisit, UpcomingVisit, Visit};
use crate::utils::date::{DATE_FORMAT, format_ts, ts_from_row};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_VISIT: &str = "
    SELECT v.id, v.animal_id, a.name, v.reservation_date, v.visit_date,
           v.registered_by, v.description, v.location_id
    FROM visits v
    JOIN animals a ON a.id = v.animal_id";

fn require_animal(conn: &Connection, animal_id: i64) -> AppResult<()> {
    let exists: Option<i64> = conn
        .query_row("SELECT id FROM animals WHERE id = ?1", [animal_id], |r| {
            r.get(0)
        })
        .optional()?;

    exists.map(|_| ()).ok_or(AppError::NotFound {
        entity: "Animal",
        id: animal_id,
    })
}

pub fn add_visit(conn: &Connection, v: &NewVisit) -> AppResult<i64> {
    v.validate()?;
    require_animal(conn, v.animal_id)?;

    conn.execute(
        "INSERT INTO visits (animal_id, reservation_date, visit_date, registered_by, description, location_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            v.animal_id,
            format_ts(&v.reservation_date),
            format_ts(&v.visit_date),
            v.registered_by.trim(),
            v.description.trim(),
            v.location_id
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// All scheduled visits with the animal name, earliest first.
pub fn list_visits(conn: &Connection) -> AppResult<Vec<Visit>> {
    let mut stmt = conn.prepare(&format!("{SELECT_VISIT} ORDER BY v.visit_date ASC, v.id ASC"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_visit(conn: &Connection, id: i64) -> AppResult<Option<Visit>> {
    let mut stmt = conn.prepare(&format!("{SELECT_VISIT} WHERE v.id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn update_visit(conn: &Connection, id: i64, v: &NewVisit) -> AppResult<()> {
    v.validate()?;
    require_animal(conn, v.animal_id)?;

    let changed = conn.execute(
        "UPDATE visits
         SET animal_id = ?1, reservation_date = ?2, visit_date = ?3,
             registered_by = ?4, description = ?5, location_id = ?6
         WHERE id = ?7",
        params![
            v.animal_id,
            format_ts(&v.reservation_date),
            format_ts(&v.visit_date),
            v.registered_by.trim(),
            v.description.trim(),
            v.location_id,
            id
        ],
    )?;

    ensure_affected(changed, "Visit", id)
}

pub fn delete_visit(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM visits WHERE id = ?1", [id])?;
    ensure_affected(changed, "Visit", id)
}

/// Day view of the calendar: visits on `day`, ordered by time.
pub fn visits_for_date(conn: &Connection, day: NaiveDate) -> AppResult<Vec<ScheduledVisit>> {
    let mut stmt = conn.prepare(
        "SELECT v.id, a.name, v.visit_date, v.description
         FROM visits v
         JOIN animals a ON a.id = v.animal_id
         WHERE date(v.visit_date) = ?1
         ORDER BY v.visit_date ASC, v.id ASC",
    )?;

    let rows = stmt.query_map([day.format(DATE_FORMAT).to_string()], |row| {
        Ok(ScheduledVisit {
            visit_id: row.get(0)?,
            animal_name: row.get(1)?,
            time: ts_from_row(row, 2)?.time(),
            description: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Visits with `from <= visit_date <= to`, both bounds inclusive.
pub fn upcoming_visits(
    conn: &Connection,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> AppResult<Vec<UpcomingVisit>> {
    let mut stmt = conn.prepare(
        "SELECT v.id, a.name, v.visit_date, a.owner_name
         FROM visits v
         JOIN animals a ON a.id = v.animal_id
         WHERE v.visit_date BETWEEN ?1 AND ?2
         ORDER BY v.visit_date ASC, v.id ASC",
    )?;

    let rows = stmt.query_map(params![format_ts(&from), format_ts(&to)], |row| {
        Ok(UpcomingVisit {
            visit_id: row.get(0)?,
            animal_name: row.get(1)?,
            visit_date: ts_from_row(row, 2)?,
            owner_name: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Close a visit: write its history record (with attachments) and remove
/// the visit, atomically. Returns the new history id.
pub fn complete_visit(conn: &mut Connection, visit_id: i64, c: &Completion) -> AppResult<i64> {
    c.validate()?;

    in_transaction(conn, |tx| {
        let visit = get_visit(tx, visit_id)?.ok_or(AppError::NotFound {
            entity: "Visit",
            id: visit_id,
        })?;

        let record = NewHistory {
            animal_id: visit.animal_id,
            visit_date: visit.visit_date,
            registered_by: c.registered_by.trim().to_string(),
            description_reason: Some(visit.description),
            medication: c.medication.clone(),
            indications: Some(c.indications.trim().to_string()),
            payment: c.payment,
            location_id: c.location_id.or(visit.location_id),
            attachments: c.attachments.clone(),
        };

        let history_id = insert_history(tx, &record)?;

        let changed = tx.execute("DELETE FROM visits WHERE id = ?1", [visit_id])?;
        ensure_affected(changed, "Visit", visit_id)?;

        Ok(history_id)
    })
}

fn map_row(row: &Row) -> Result<Visit> {
    Ok(Visit {
        id: row.get(0)?,
        animal_id: row.get(1)?,
        animal_name: row.get(2)?,
        reservation_date: ts_from_row(row, 3)?,
        visit_date: ts_from_row(row, 4)?,
        registered_by: row.get(5)?,
        description: row.get(6)?,
        location_id: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::animals::add_animal;
    use crate::db::initialize::test_conn;
    use crate::models::animal::NewAnimal;
    use crate::utils::date::parse_timestamp;

    fn seed(conn: &Connection) -> i64 {
        add_animal(
            conn,
            &NewAnimal {
                name: "Mruczek".into(),
                species: "cat".into(),
                owner_name: "Jan".into(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn visit(animal_id: i64, at: &str) -> NewVisit {
        NewVisit {
            animal_id,
            reservation_date: parse_timestamp("2025-01-01 08:00").unwrap(),
            visit_date: parse_timestamp(at).unwrap(),
            registered_by: "reception".into(),
            description: "vaccination".into(),
            location_id: None,
        }
    }

    #[test]
    fn visit_requires_existing_animal() {
        let conn = test_conn();
        assert!(matches!(
            add_visit(&conn, &visit(42, "2025-02-01 10:00")),
            Err(AppError::NotFound {
                entity: "Animal",
                id: 42
            })
        ));
    }

    #[test]
    fn schedule_is_ordered_by_time() {
        let conn = test_conn();
        let a = seed(&conn);
        add_visit(&conn, &visit(a, "2025-02-01 14:00")).unwrap();
        add_visit(&conn, &visit(a, "2025-02-01 09:15")).unwrap();
        add_visit(&conn, &visit(a, "2025-02-02 09:00")).unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let rows = visits_for_date(&conn, day).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time.format("%H:%M").to_string(), "09:15");
        assert_eq!(rows[0].animal_name, "Mruczek");
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let conn = test_conn();
        let a = seed(&conn);
        add_visit(&conn, &visit(a, "2025-02-01 00:00:00")).unwrap();
        add_visit(&conn, &visit(a, "2025-02-08 23:59:59")).unwrap();
        add_visit(&conn, &visit(a, "2025-02-09 00:00:00")).unwrap();

        let from = parse_timestamp("2025-02-01").unwrap();
        let to = parse_timestamp("2025-02-08 23:59:59").unwrap();
        assert_eq!(upcoming_visits(&conn, from, to).unwrap().len(), 2);
    }

    #[test]
    fn completion_moves_visit_to_history() {
        let mut conn = test_conn();
        let a = seed(&conn);
        let v = add_visit(&conn, &visit(a, "2025-02-01 10:00")).unwrap();

        let c = Completion {
            registered_by: "dr Kowalski".into(),
            medication: Some("Amoxicillin".into()),
            indications: "twice a day".into(),
            payment: Some(120.0),
            attachments: vec!["/scans/xray.png".into()],
            ..Default::default()
        };
        complete_visit(&mut conn, v, &c).unwrap();

        assert!(list_visits(&conn).unwrap().is_empty());
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM history", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn non_finite_payment_is_rejected() {
        let mut conn = test_conn();
        let a = seed(&conn);
        let v = add_visit(&conn, &visit(a, "2025-02-01 10:00")).unwrap();

        let c = Completion {
            registered_by: "dr Kowalski".into(),
            indications: "rest".into(),
            payment: Some("NaN".parse().unwrap()),
            ..Default::default()
        };
        assert!(matches!(
            complete_visit(&mut conn, v, &c),
            Err(AppError::InvalidNumber(_))
        ));

        assert_eq!(list_visits(&conn).unwrap().len(), 1);
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM history", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn failed_completion_changes_nothing() {
        let mut conn = test_conn();
        let a = seed(&conn);
        let v = add_visit(&conn, &visit(a, "2025-02-01 10:00")).unwrap();

        let c = Completion {
            registered_by: "dr Kowalski".into(),
            indications: "rest".into(),
            payment: Some(50.0),
            location_id: Some(999),
            ..Default::default()
        };
        assert!(complete_visit(&mut conn, v, &c).is_err());

        assert_eq!(list_visits(&conn).unwrap().len(), 1);
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM history", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 0);
    }
}
