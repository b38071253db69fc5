use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::chart::export_bar_chart;
use crate::export::csv::export_csv;
use crate::export::fs_utils::{ensure_absolute, ensure_writable};
use crate::export::json::export_json;
use crate::export::model::sections;
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::export::xlsx::export_xlsx;
use crate::models::report::{PeriodTotal, ReportBundle};
use crate::ui::messages::info;
use std::path::Path;

/// File output for reports and charts.
pub struct ExportLogic;

impl ExportLogic {
    /// Write the statistics bundle to `path` in the chosen format.
    ///
    /// The path must be absolute; an existing file is replaced only with
    /// `force` or after the operator confirms.
    pub fn export_report(bundle: &ReportBundle, format: ExportFormat, path: &Path, force: bool) -> AppResult<()> {
        ensure_absolute(path)?;
        ensure_writable(path, force)?;

        let tables = sections(bundle);

        match format {
            ExportFormat::Csv => export_csv(&tables, path),
            ExportFormat::Json => export_json(bundle, path),
            ExportFormat::Xlsx => export_xlsx(&tables, path),
            ExportFormat::Pdf => {
                info(format!("Exporting to PDF: {}", path.display()));
                let title = match bundle.location_id {
                    Some(id) => format!("Clinic statistics - location #{id}"),
                    None => "Clinic statistics - all locations".to_string(),
                };

                let mut pdf = PdfManager::new();
                pdf.write_sections(&title, &tables);
                pdf.save(path)
                    .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

                notify_export_success("PDF", path);
                Ok(())
            }
        }
    }

    /// Render the financial summary bar chart to an SVG file.
    pub fn export_chart(rows: &[PeriodTotal], title: &str, path: &Path, force: bool) -> AppResult<()> {
        ensure_absolute(path)?;
        ensure_writable(path, force)?;
        export_bar_chart(rows, title, path)
    }
}
