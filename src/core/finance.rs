//! Payment totals per month for a chosen year or month.

use crate::db::reports::payment_totals;
use crate::errors::AppResult;
use crate::models::period::Period;
use crate::models::report::FinancialSummary;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{RESET, color_for_amount};
use crate::utils::formatting::money_with_currency;
use crate::utils::table::Table;
use rusqlite::Connection;

pub struct FinanceLogic;

impl FinanceLogic {
    /// `period` is validated before the database is touched.
    pub fn summary(conn: &Connection, period: Option<&str>, location: Option<i64>) -> AppResult<FinancialSummary> {
        let period = period.map(Period::parse).transpose()?;
        let rows = payment_totals(conn, period.as_ref(), location)?;
        let total: f64 = rows.iter().map(|r| r.total).sum();
        Ok(FinancialSummary { rows, total })
    }

    pub fn print(summary: &FinancialSummary, currency: &str) {
        header("Financial summary");

        if summary.rows.is_empty() {
            warning("No payments in the selected period.");
            return;
        }

        let mut table = Table::new(&["Period", "Total"]);
        for r in &summary.rows {
            table.add_row(vec![r.period.clone(), money_with_currency(r.total, currency)]);
        }
        table.print();

        println!(
            "\nTotal: {}{}{}",
            color_for_amount(summary.total),
            money_with_currency(summary.total, currency),
            RESET
        );
    }
}
