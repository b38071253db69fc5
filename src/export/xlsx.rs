use crate::errors::{AppError, AppResult};
use crate::export::model::Section;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// One styled worksheet per section, columns sized to their content.
pub(crate) fn export_xlsx(sections: &[Section], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for section in sections {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(section.title).map_err(to_app_error)?;
        write_section(worksheet, section, &header_format)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn write_section(worksheet: &mut Worksheet, section: &Section, header_format: &Format) -> AppResult<()> {
    for (col, header) in section.headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, header_format)
            .map_err(to_app_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(to_app_error)?;

    let mut col_widths: Vec<usize> = section
        .headers
        .iter()
        .map(|h| UnicodeWidthStr::width(*h))
        .collect();

    if section.rows.is_empty() {
        worksheet.write(1, 0, "No data available").map_err(to_app_error)?;
    }

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, values) in section.rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in values.iter().enumerate() {
            write_cell(worksheet, row, col as u16, value, band)?;
            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(UnicodeWidthStr::width(value.as_str()));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    Ok(())
}

/// Numbers are written as numbers (right-aligned), everything else as text.
fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, s: &str, bg: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    match s.parse::<f64>() {
        Ok(num) => {
            let fmt = base.set_align(FormatAlign::Right);
            worksheet
                .write_with_format(row, col, num, &fmt)
                .map_err(to_app_error)?;
        }
        Err(_) => {
            worksheet
                .write_with_format(row, col, s, &base)
                .map_err(to_app_error)?;
        }
    }

    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
