use crate::errors::{AppError, AppResult};
use crate::export::model::Section;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use std::path::Path;

fn csv_err(e: csv::Error) -> AppError {
    AppError::Export(format!("CSV write error: {e}"))
}

/// Sections one after another: a label row, the header row, the data rows.
pub(crate) fn export_csv(sections: &[Section], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    for s in sections {
        wtr.write_record([s.title]).map_err(csv_err)?;
        wtr.write_record(&s.headers).map_err(csv_err)?;
        for row in &s.rows {
            wtr.write_record(row).map_err(csv_err)?;
        }
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
