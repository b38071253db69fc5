//! Grouped aggregations over the history table.

use crate::db::filter::{Clause, Predicate};
use crate::errors::AppResult;
use crate::models::period::Period;
use crate::models::report::{MedicationUsage, MonthlyPayments, MonthlyVisits, PeriodTotal};
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

/// Medications shown in the treatment ranking.
pub const TOP_MEDICATIONS: usize = 10;

fn scope(location: Option<i64>) -> Predicate {
    Predicate::new().and_opt(location, |id| Clause::Eq("h.location_id", Value::Integer(id)))
}

pub fn monthly_visits(conn: &Connection, location: Option<i64>) -> AppResult<Vec<MonthlyVisits>> {
    let (where_sql, values) = scope(location).render();

    let mut stmt = conn.prepare(&format!(
        "SELECT strftime('%Y-%m', h.visit_date) AS month,
                COUNT(*) AS visit_count,
                COUNT(DISTINCT h.animal_id) AS animal_count
         FROM history h
         WHERE {where_sql}
         GROUP BY month
         ORDER BY month ASC"
    ))?;

    let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
        Ok(MonthlyVisits {
            month: row.get(0)?,
            visit_count: row.get(1)?,
            animal_count: row.get(2)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Medications ranked by average visits per treated animal, best first.
pub fn top_medications(conn: &Connection, location: Option<i64>) -> AppResult<Vec<MedicationUsage>> {
    let (where_sql, mut values) = scope(location).render();
    values.push(Value::Integer(TOP_MEDICATIONS as i64));

    let mut stmt = conn.prepare(&format!(
        "SELECT h.medication,
                ROUND(CAST(COUNT(*) AS REAL) / NULLIF(COUNT(DISTINCT h.animal_id), 0), 2) AS avg_visits
         FROM history h
         WHERE {where_sql}
         GROUP BY h.medication
         ORDER BY avg_visits DESC NULLS FIRST, h.medication ASC
         LIMIT ?"
    ))?;

    let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
        Ok(MedicationUsage {
            medication: row.get(0)?,
            avg_visits_per_animal: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn monthly_payments(conn: &Connection, location: Option<i64>) -> AppResult<Vec<MonthlyPayments>> {
    let (where_sql, values) = scope(location).render();

    let mut stmt = conn.prepare(&format!(
        "SELECT strftime('%Y-%m', h.visit_date) AS month,
                COUNT(*) AS visit_count,
                IFNULL(SUM(h.payment), 0.0) AS total_payment
         FROM history h
         WHERE {where_sql}
         GROUP BY month
         ORDER BY month ASC"
    ))?;

    let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
        Ok(MonthlyPayments {
            month: row.get(0)?,
            visit_count: row.get(1)?,
            total_payment: row.get(2)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Payment sums per month, limited to `period` and `location` when given.
pub fn payment_totals(
    conn: &Connection,
    period: Option<&Period>,
    location: Option<i64>,
) -> AppResult<Vec<PeriodTotal>> {
    let predicate = scope(location).and_opt(period, |p| Clause::Formatted {
        column: "h.visit_date",
        format: p.sql_format(),
        value: p.key(),
    });
    let (where_sql, values) = predicate.render();

    let mut stmt = conn.prepare(&format!(
        "SELECT strftime('%Y-%m', h.visit_date) AS month,
                IFNULL(SUM(h.payment), 0.0) AS total
         FROM history h
         WHERE {where_sql}
         GROUP BY month
         ORDER BY month ASC"
    ))?;

    let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
        Ok(PeriodTotal {
            period: row.get(0)?,
            total: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
