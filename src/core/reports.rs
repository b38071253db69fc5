use crate::db::reports::{monthly_payments, monthly_visits, top_medications};
use crate::errors::AppResult;
use crate::export::model::sections;
use crate::models::report::ReportBundle;
use crate::ui::messages::{header, warning};
use crate::utils::table::Table;
use rusqlite::Connection;

pub struct ReportLogic;

impl ReportLogic {
    /// Run the three aggregations, scoped to `location` when given.
    pub fn build(conn: &Connection, location: Option<i64>) -> AppResult<ReportBundle> {
        Ok(ReportBundle {
            location_id: location,
            visits: monthly_visits(conn, location)?,
            medications: top_medications(conn, location)?,
            payments: monthly_payments(conn, location)?,
        })
    }

    pub fn print(bundle: &ReportBundle) {
        for section in sections(bundle) {
            header(section.title);

            if section.rows.is_empty() {
                warning("No data.");
                println!();
                continue;
            }

            let mut table = Table::new(&section.headers);
            for row in section.rows {
                table.add_row(row);
            }
            table.print();
            println!();
        }
    }
}
