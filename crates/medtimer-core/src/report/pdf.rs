//! PDF report serializer built on `pdf-writer`.
//!
//! Object ids are assigned by hand: catalog, pages tree and the shared
//! Helvetica font get fixed refs, every page and content stream gets a
//! fresh one. The first page carries the title, the generation line and
//! the adherence score above the table; continuation pages restart the
//! table at the top margin.

use std::io::Write;

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use super::{ReportFormat, ReportSerializer, WeeklyReport};
use crate::error::ReportError;

// A4 in points.
const PAGE_W: f32 = 595.0;
const PAGE_H: f32 = 842.0;
const MARGIN: f32 = 56.0;
const ROW_H: f32 = 18.0;

const COL_X: [f32; 4] = [56.0, 170.0, 380.0, 470.0];
const HEADERS: [&str; 4] = ["Date", "Medicine", "Time", "Status"];

pub struct PdfSerializer;

struct PdfBuilder {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_refs: Vec<Ref>,
    next_id: i32,
}

impl PdfBuilder {
    fn new() -> Self {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            page_refs: Vec::new(),
            next_id: 4,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Register a new page and return the content ref its stream must use.
    fn new_page(&mut self) -> Ref {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
            .contents(content_id);
        page.resources().fonts().pair(Name(b"F1"), self.font_id);
        drop(page);

        content_id
    }

    fn finalize_page(&mut self, content_id: Ref, content: Content) {
        self.pdf.stream(content_id, &content.finish());
    }

    fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
        drop(pages);
        self.pdf.finish()
    }
}

fn draw_text(content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
    content.begin_text();
    content.set_font(Name(b"F1"), size);
    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
    content.show(Str(text.as_bytes()));
    content.end_text();
}

fn draw_table_header(content: &mut Content, y: f32) {
    for (x, header) in COL_X.iter().zip(HEADERS) {
        draw_text(content, *x, y, 12.0, header);
    }
}

fn title_case(status: &str) -> String {
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl ReportSerializer for PdfSerializer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Pdf
    }

    fn write(&self, report: &WeeklyReport, out: &mut dyn Write) -> Result<(), ReportError> {
        let mut builder = PdfBuilder::new();

        let mut content_id = builder.new_page();
        let mut content = Content::new();

        let mut y = PAGE_H - MARGIN;
        draw_text(
            &mut content,
            MARGIN,
            y,
            18.0,
            "MedTimer - Weekly Adherence Report",
        );
        y -= 28.0;
        draw_text(
            &mut content,
            MARGIN,
            y,
            12.0,
            &format!(
                "Generated: {}",
                report.generated_at.format("%Y-%m-%d %H:%M")
            ),
        );
        y -= 22.0;
        draw_text(
            &mut content,
            MARGIN,
            y,
            12.0,
            &format!(
                "Adherence Score (last 7 days): {:.1}%",
                report.adherence_pct
            ),
        );
        y -= 30.0;
        draw_table_header(&mut content, y);
        y -= ROW_H;

        for row in &report.rows {
            if y < MARGIN {
                builder.finalize_page(content_id, content);
                content_id = builder.new_page();
                content = Content::new();
                y = PAGE_H - MARGIN;
                draw_table_header(&mut content, y);
                y -= ROW_H;
            }

            let cells = [
                row.date.to_string(),
                row.name.clone(),
                row.scheduled_time.format("%H:%M").to_string(),
                title_case(&row.status.to_string()),
            ];
            for (x, cell) in COL_X.iter().zip(&cells) {
                draw_text(&mut content, *x, y, 11.0, cell);
            }
            y -= ROW_H;
        }

        builder.finalize_page(content_id, content);
        out.write_all(&builder.finish())?;
        Ok(())
    }
}
