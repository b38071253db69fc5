use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::models::report::PeriodTotal;
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (900, 520);

fn chart_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(format!("chart error: {e}"))
}

/// Bar chart of period vs. total payment, written as SVG.
pub(crate) fn export_bar_chart(rows: &[PeriodTotal], title: &str, path: &Path) -> AppResult<()> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    if rows.is_empty() {
        root.draw(&Text::new(
            "No data",
            (SIZE.0 as i32 / 2 - 50, SIZE.1 as i32 / 2),
            ("sans-serif", 30).into_font(),
        ))
        .map_err(chart_err)?;
        root.present().map_err(chart_err)?;
        notify_export_success("Chart (empty dataset)", path);
        return Ok(());
    }

    let max = rows.iter().map(|r| r.total).fold(0.0_f64, f64::max);
    let y_max = if max > 0.0 { max * 1.1 } else { 1.0 };
    let labels: Vec<&str> = rows.iter().map(|r| r.period.as_str()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d((0u32..rows.len() as u32).into_segmented(), 0.0..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Period")
        .y_desc("Total")
        .x_labels(rows.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).map(|s| s.to_string()).unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|v| format!("{:.0}", v))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(RGBColor(0x2F, 0x75, 0xB5).filled())
                .margin(8)
                .data(rows.iter().enumerate().map(|(i, r)| (i as u32, r.total))),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;

    notify_export_success("Chart", path);
    Ok(())
}
