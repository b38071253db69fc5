//! Minimal multi-page PDF tables on A4 (Helvetica, hand-managed object ids).

use crate::export::model::Section;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Page being filled: its content stream, cursor and number.
struct Cursor {
    content: Content,
    y: f32,
    page: usize,
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w: 595.0,
            page_h: 842.0,
            margin: 50.0,
            row_h: 20.0,

            next_id: 4,
            font_id,

            font_size: 10.0,
            header_font_size: 11.0,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self, title: &str, page: usize) -> Cursor {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut p = self.pdf.page(page_id);
        p.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);
        p.resources().fonts().pair(Name(b"F1"), self.font_id);
        drop(p);

        self.current_content_id = Some(content_id);

        let mut content = Content::new();
        self.draw_page_header_footer(&mut content, title, page);

        Cursor {
            content,
            y: self.page_h - self.margin - 30.0,
            page,
        }
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    /// Finish the current page and open the next one.
    fn break_page(&mut self, cur: Cursor, title: &str) -> Cursor {
        let next = cur.page + 1;
        self.finalize_page(cur.content);
        self.new_page(title, next)
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        let bytes = latin1(text);
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn fill_band(&self, content: &mut Content, y: f32, width: f32, gray: (f32, f32, f32)) {
        content.save_state();
        content.set_fill_rgb(gray.0, gray.1, gray.2);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(&self, content: &mut Content, y: f32, col_widths: &[f32], row: &[String], font_size: f32) {
        let mut x = self.margin;

        for (text, w) in row.iter().zip(col_widths) {
            self.draw_text(content, x + 4.0, y + 5.0, font_size, text);
            self.draw_cell_borders(content, x, y, *w, self.row_h);
            x += w;
        }
    }

    /// Column widths from header and content lengths, scaled to fit the page.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.5).collect();

        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (cell.chars().count() as f32 * 6.2).max(*w);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_page_header_footer(&self, content: &mut Content, title: &str, page: usize) {
        self.draw_text(
            content,
            self.margin,
            self.page_h - self.margin + 15.0,
            self.title_font_size,
            title,
        );

        let pg = format!("Page {}", page);
        self.draw_text(
            content,
            self.page_w - self.margin - 60.0,
            self.margin - 35.0,
            self.font_size,
            &pg,
        );
    }

    /// Space left above the bottom margin.
    fn fits(&self, y: f32, rows: usize) -> bool {
        y - self.row_h * rows as f32 >= self.margin
    }

    fn write_section(&mut self, mut cur: Cursor, title: &str, section: &Section) -> Cursor {
        let col_widths = self.compute_col_widths(&section.headers, &section.rows);
        let table_w: f32 = col_widths.iter().sum();
        let header_row: Vec<String> = section.headers.iter().map(|s| s.to_string()).collect();

        // heading + header row + at least one data row
        if !self.fits(cur.y, 3) {
            cur = self.break_page(cur, title);
        }

        self.draw_text(&mut cur.content, self.margin, cur.y + 5.0, self.header_font_size + 1.0, section.title);
        cur.y -= self.row_h;

        self.fill_band(&mut cur.content, cur.y, table_w, (0.85, 0.87, 0.90));
        self.draw_row(&mut cur.content, cur.y, &col_widths, &header_row, self.header_font_size);
        cur.y -= self.row_h;

        if section.rows.is_empty() {
            self.draw_text(&mut cur.content, self.margin + 4.0, cur.y + 5.0, self.font_size, "No data");
            cur.y -= self.row_h;
        }

        for (i, row) in section.rows.iter().enumerate() {
            if !self.fits(cur.y, 1) {
                cur = self.break_page(cur, title);
                // repeat the column header on the continuation page
                self.fill_band(&mut cur.content, cur.y, table_w, (0.85, 0.87, 0.90));
                self.draw_row(&mut cur.content, cur.y, &col_widths, &header_row, self.header_font_size);
                cur.y -= self.row_h;
            }

            if i % 2 == 0 {
                self.fill_band(&mut cur.content, cur.y, table_w, (0.96, 0.96, 0.96));
            }
            self.draw_row(&mut cur.content, cur.y, &col_widths, row, self.font_size);
            cur.y -= self.row_h;
        }

        // gap before the next section
        cur.y -= self.row_h;
        cur
    }

    /// Lay the sections out one after another, breaking pages as needed.
    pub fn write_sections(&mut self, title: &str, sections: &[Section]) {
        let mut cur = self.new_page(title, 1);
        for section in sections {
            cur = self.write_section(cur, title, section);
        }
        self.finalize_page(cur.content);
    }

    #[cfg(test)]
    fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);

        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.iter().copied());
        drop(pages);

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

/// Helvetica is a single-byte font: keep Latin-1, replace the rest.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(rows: usize) -> Section {
        Section {
            title: "Payment statistics",
            headers: vec!["Month", "Visits", "Total payment"],
            rows: (0..rows)
                .map(|i| vec![format!("2025-{:02}", i % 12 + 1), i.to_string(), "10.00".into()])
                .collect(),
        }
    }

    #[test]
    fn long_tables_continue_on_new_pages() {
        let mut pdf = PdfManager::new();
        pdf.write_sections("Report", &[section(100)]);
        assert!(pdf.page_count() >= 3);
    }

    #[test]
    fn short_report_fits_one_page() {
        let mut pdf = PdfManager::new();
        pdf.write_sections("Report", &[section(3), section(0)]);
        assert_eq!(pdf.page_count(), 1);
    }

    #[test]
    fn non_latin_text_is_replaced() {
        assert_eq!(latin1("Łatka é"), b"?atka \xe9".to_vec());
    }
}
