use crate::db::filter::{Clause, Predicate};
use crate::db::pool::in_transaction;
use crate::errors::AppResult;
use crate::models::history::{
    Attachment, HistoryFilter, HistoryRecord, HistorySearch, NewHistory, SearchHit,
};
use crate::utils::date::{format_ts, ts_from_row};
use rusqlite::{Connection, Result, Row, params, params_from_iter};

const SELECT_HISTORY: &str = "
    SELECT h.id, h.animal_id, a.name, h.visit_date, h.registered_by,
           h.description_reason, h.medication, h.indications, h.payment, h.location_id
    FROM history h
    JOIN animals a ON a.id = h.animal_id";

const ORDER: &str = "ORDER BY h.visit_date DESC, h.id DESC";

/// Insert a history row and its attachments on the given connection.
/// Callers provide the surrounding transaction.
pub(crate) fn insert_history(conn: &Connection, h: &NewHistory) -> AppResult<i64> {
    h.validate()?;

    conn.execute(
        "INSERT INTO history (animal_id, visit_date, registered_by, description_reason,
                              medication, indications, payment, location_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            h.animal_id,
            format_ts(&h.visit_date),
            h.registered_by.trim(),
            h.description_reason,
            h.medication,
            h.indications,
            h.payment,
            h.location_id
        ],
    )?;
    let history_id = conn.last_insert_rowid();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO history_attachments (history_id, file_path) VALUES (?1, ?2)",
    )?;
    for path in &h.attachments {
        stmt.execute(params![history_id, path.trim()])?;
    }

    Ok(history_id)
}

/// Record a treatment directly (without a prior visit).
pub fn add_history(conn: &mut Connection, h: &NewHistory) -> AppResult<i64> {
    in_transaction(conn, |tx| insert_history(tx, h))
}

pub fn list_history(conn: &Connection) -> AppResult<Vec<HistoryRecord>> {
    let mut stmt = conn.prepare(&format!("{SELECT_HISTORY} {ORDER}"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_filtered_history(conn: &Connection, f: &HistoryFilter) -> AppResult<Vec<HistoryRecord>> {
    let predicate = Predicate::new()
        .and_opt(f.date, |d| Clause::OnDate("h.visit_date", d))
        .and_opt(non_empty(&f.doctor), |s| Clause::Contains("h.registered_by", s))
        .and_opt(non_empty(&f.medication), |s| Clause::Contains("h.medication", s));

    let (where_sql, values) = predicate.render();
    let mut stmt = conn.prepare(&format!("{SELECT_HISTORY} WHERE {where_sql} {ORDER}"))?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every given field must match as a case-insensitive substring.
pub fn search_history(conn: &Connection, s: &HistorySearch) -> AppResult<Vec<SearchHit>> {
    let predicate = Predicate::new()
        .and_opt(non_empty(&s.name), |v| Clause::Contains("a.name", v))
        .and_opt(non_empty(&s.breed), |v| Clause::Contains("a.breed", v))
        .and_opt(non_empty(&s.owner), |v| Clause::Contains("a.owner_name", v))
        .and_opt(non_empty(&s.visit_date), |v| Clause::Contains("h.visit_date", v))
        .and_opt(non_empty(&s.reason), |v| {
            Clause::Contains("h.description_reason", v)
        });

    let (where_sql, values) = predicate.render();
    let mut stmt = conn.prepare(&format!(
        "SELECT h.id, a.id, a.name, a.species, a.breed, a.owner_name,
                h.visit_date, h.description_reason
         FROM history h
         JOIN animals a ON a.id = h.animal_id
         WHERE {where_sql}
         {ORDER}"
    ))?;

    let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
        Ok(SearchHit {
            history_id: row.get(0)?,
            animal_id: row.get(1)?,
            name: row.get(2)?,
            species: row.get(3)?,
            breed: row.get(4)?,
            owner_name: row.get(5)?,
            visit_date: ts_from_row(row, 6)?,
            description_reason: row.get(7)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_attachments(conn: &Connection, history_id: i64) -> AppResult<Vec<Attachment>> {
    let mut stmt = conn.prepare(
        "SELECT id, history_id, file_path
         FROM history_attachments
         WHERE history_id = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([history_id], |row| {
        Ok(Attachment {
            id: row.get(0)?,
            history_id: row.get(1)?,
            file_path: row.get(2)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn non_empty(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn map_row(row: &Row) -> Result<HistoryRecord> {
    Ok(HistoryRecord {
        id: row.get(0)?,
        animal_id: row.get(1)?,
        animal_name: row.get(2)?,
        visit_date: ts_from_row(row, 3)?,
        registered_by: row.get(4)?,
        description_reason: row.get(5)?,
        medication: row.get(6)?,
        indications: row.get(7)?,
        payment: row.get(8)?,
        location_id: row.get(9)?,
    })
}
