//! # PDF Rendering
//!
//! Lays a [`ReportDocument`] out on A4 portrait pages with lopdf.
//!
//! ## Page Layout
//! ```text
//! ┌──────────────────────────────────────────┐  842pt
//! │ Sales Recap Report          (running)    │
//! │──────────────────────────────────────────│
//! │ SALES RECAP REPORT          (page 1 only)│
//! │ Printed: ...   Period: ...               │
//! │ Summary lines                            │
//! │                                          │
//! │ Table title                              │
//! │ ▓▓ header row ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓ │ ◄── repeated after a
//! │ row                                      │     page break
//! │ row                                      │
//! │ ...                          BODY_BOTTOM │
//! │──────────────────────────────────────────│
//! │ Page i of N - Sales Recap Report         │  FOOTER_Y
//! └──────────────────────────────────────────┘  0pt
//! ```
//!
//! Pages are laid out first and footers stamped afterwards, once the page
//! count is known. Content streams are left uncompressed.
//!
//! Text uses the standard Helvetica faces, so widths are estimated rather
//! than measured and anything outside printable ASCII is replaced by `?`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::debug;

use crate::document::{fit, Align, ReportDocument, Table};
use crate::error::{ExportError, ExportResult};

// =============================================================================
// Geometry
// =============================================================================

/// A4 width in points.
pub const PAGE_WIDTH: f32 = 595.0;
/// A4 height in points.
pub const PAGE_HEIGHT: f32 = 842.0;

const MARGIN: f32 = 40.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const RUNNING_HEADER_SIZE: f32 = 8.0;
const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 8.0;

const LINE_HEIGHT: f32 = 14.0;
const ROW_HEIGHT: f32 = 13.0;
const CELL_PADDING: f32 = 3.0;

/// Average Helvetica glyph width as a share of the font size.
const GLYPH_WIDTH_EM: f32 = 0.55;

const BODY_TOP: f32 = PAGE_HEIGHT - MARGIN - 18.0;
const BODY_BOTTOM: f32 = 50.0;
const FOOTER_Y: f32 = 24.0;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

/// A rendered PDF file.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders the document to PDF bytes.
pub fn render_pdf(doc: &ReportDocument) -> ExportResult<RenderedPdf> {
    let mut layout = Layout::new(&doc.title);

    layout.title_block(doc);
    for table in &doc.tables {
        layout.table(table);
    }

    let mut pages = layout.finish();
    let page_count = pages.len();
    for (i, ops) in pages.iter_mut().enumerate() {
        footer(ops, i + 1, page_count, &doc.title);
    }

    let bytes = assemble(&doc.title, pages)?;
    debug!(pages = page_count, bytes = bytes.len(), "PDF rendered");

    Ok(RenderedPdf { bytes, page_count })
}

/// Builds the page tree and serializes the file.
fn assemble(title: &str, pages: Vec<Vec<Operation>>) -> ExportResult<Vec<u8>> {
    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let regular = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR => regular,
            BOLD => bold,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let stream = Stream::new(dictionary! {}, content.encode()?);
        let content_id = pdf.add_object(stream);
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
            "Resources" => resources,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                PAGE_WIDTH.into(),
                PAGE_HEIGHT.into(),
            ],
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = pdf.add_object(dictionary! {
        "Title" => Object::string_literal(sanitize(title)),
        "Producer" => Object::string_literal("rekap"),
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)
        .map_err(|e| ExportError::Render(e.to_string()))?;
    Ok(bytes)
}

// =============================================================================
// Layout
// =============================================================================

/// Flows content top to bottom, opening pages as needed.
struct Layout {
    running_title: String,
    pages: Vec<Vec<Operation>>,
    y: f32,
}

impl Layout {
    fn new(running_title: &str) -> Self {
        let mut layout = Layout {
            running_title: running_title.to_string(),
            pages: Vec::new(),
            y: BODY_TOP,
        };
        layout.new_page();
        layout
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self) {
        let mut ops = Vec::new();
        let header_y = PAGE_HEIGHT - MARGIN;
        text(&mut ops, REGULAR, RUNNING_HEADER_SIZE, MARGIN, header_y, &self.running_title);
        rule(&mut ops, header_y - 5.0, 0.5, 0.6);
        self.pages.push(ops);
        self.y = BODY_TOP;
    }

    /// Starts a new page unless `height` still fits.
    fn reserve(&mut self, height: f32) -> bool {
        if self.y - height < BODY_BOTTOM {
            self.new_page();
            true
        } else {
            false
        }
    }

    fn title_block(&mut self, doc: &ReportDocument) {
        self.y -= TITLE_SIZE;
        let y = self.y;
        let title = doc.title.to_uppercase();
        text(self.ops(), BOLD, TITLE_SIZE, MARGIN, y, &title);
        self.y -= LINE_HEIGHT + 4.0;

        let printed = format!("Printed: {}", doc.printed_label());
        let period = format!("Period: {}", doc.period);
        for line in [printed, period] {
            let y = self.y;
            text(self.ops(), REGULAR, BODY_SIZE + 1.0, MARGIN, y, &line);
            self.y -= LINE_HEIGHT;
        }

        self.y -= LINE_HEIGHT / 2.0;
        let label_width = 130.0;
        for line in &doc.summary {
            self.reserve(LINE_HEIGHT);
            let y = self.y;
            let ops = self.ops();
            text(ops, BOLD, BODY_SIZE + 1.0, MARGIN, y, &line.label);
            text(ops, REGULAR, BODY_SIZE + 1.0, MARGIN + label_width, y, &line.value);
            self.y -= LINE_HEIGHT;
        }
    }

    fn table(&mut self, table: &Table) {
        // Title, header row and at least one body row stay together.
        self.y -= LINE_HEIGHT;
        self.reserve(HEADING_SIZE + 6.0 + 2.0 * ROW_HEIGHT);

        self.y -= HEADING_SIZE;
        let y = self.y;
        text(self.ops(), BOLD, HEADING_SIZE, MARGIN, y, &table.title);
        self.y -= 6.0;

        let widths = column_widths(table);
        self.header_row(table, &widths);

        if table.is_empty() {
            let y = self.y - ROW_HEIGHT + 4.0;
            text(self.ops(), REGULAR, BODY_SIZE, MARGIN + CELL_PADDING, y, &table.empty_message);
            self.y -= ROW_HEIGHT;
            return;
        }

        for row in &table.rows {
            if self.reserve(ROW_HEIGHT) {
                self.header_row(table, &widths);
            }
            let cells: Vec<&str> = (0..table.columns.len())
                .map(|i| row.get(i).map(String::as_str).unwrap_or(""))
                .collect();
            self.row(table, &widths, &cells, REGULAR);
            let y = self.y;
            rule(self.ops(), y, 0.3, 0.85);
        }
    }

    fn header_row(&mut self, table: &Table, widths: &[f32]) {
        let y = self.y;
        let ops = self.ops();
        ops.push(Operation::new("g", vec![0.9_f32.into()]));
        ops.push(Operation::new(
            "re",
            vec![MARGIN.into(), (y - ROW_HEIGHT).into(), CONTENT_WIDTH.into(), ROW_HEIGHT.into()],
        ));
        ops.push(Operation::new("f", vec![]));
        ops.push(Operation::new("g", vec![0.0_f32.into()]));

        let headings: Vec<&str> = table.columns.iter().map(|c| c.heading.as_str()).collect();
        self.row(table, widths, &headings, BOLD);
    }

    fn row(&mut self, table: &Table, widths: &[f32], cells: &[&str], font: &str) {
        let baseline = self.y - ROW_HEIGHT + 4.0;
        let mut x = MARGIN;
        let ops = self.ops();

        for ((column, width), cell) in table.columns.iter().zip(widths).zip(cells) {
            let max_chars = ((width - 2.0 * CELL_PADDING) / (BODY_SIZE * GLYPH_WIDTH_EM)).max(1.0) as usize;
            let shown = fit(cell, max_chars);
            let text_x = match column.align {
                Align::Left => x + CELL_PADDING,
                Align::Right => x + width - CELL_PADDING - text_width(&shown, BODY_SIZE),
            };
            text(ops, font, BODY_SIZE, text_x, baseline, &shown);
            x += width;
        }

        self.y -= ROW_HEIGHT;
    }

    fn finish(self) -> Vec<Vec<Operation>> {
        self.pages
    }
}

fn column_widths(table: &Table) -> Vec<f32> {
    let total: f32 = table.columns.iter().map(|c| c.weight.max(0.0)).sum();
    if total <= 0.0 {
        let even = CONTENT_WIDTH / table.columns.len().max(1) as f32;
        return vec![even; table.columns.len()];
    }
    table
        .columns
        .iter()
        .map(|c| CONTENT_WIDTH * c.weight.max(0.0) / total)
        .collect()
}

fn footer(ops: &mut Vec<Operation>, page: usize, pages: usize, title: &str) {
    rule(ops, FOOTER_Y + 12.0, 0.5, 0.6);
    let label = format!("Page {} of {} - {}", page, pages, title);
    text(ops, REGULAR, RUNNING_HEADER_SIZE, MARGIN, FOOTER_Y, &label);
}

// =============================================================================
// Drawing Primitives
// =============================================================================

fn text(ops: &mut Vec<Operation>, font: &str, size: f32, x: f32, y: f32, content: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(sanitize(content))]));
    ops.push(Operation::new("ET", vec![]));
}

/// Horizontal line across the content width.
fn rule(ops: &mut Vec<Operation>, y: f32, width: f32, gray: f32) {
    ops.push(Operation::new("w", vec![width.into()]));
    ops.push(Operation::new("G", vec![gray.into()]));
    ops.push(Operation::new("m", vec![MARGIN.into(), y.into()]));
    ops.push(Operation::new("l", vec![(PAGE_WIDTH - MARGIN).into(), y.into()]));
    ops.push(Operation::new("S", vec![]));
}

fn text_width(content: &str, size: f32) -> f32 {
    content.chars().count() as f32 * size * GLYPH_WIDTH_EM
}

/// Keeps printable ASCII, replacing everything else with `?`.
fn sanitize(content: &str) -> String {
    content
        .chars()
        .map(|c| if c == ' ' || c.is_ascii_graphic() { c } else { '?' })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ReportOptions, NO_DATA_FOR_PERIOD};
    use crate::test_support::{many_sales, march_snapshot, now};
    use rekap_core::aggregate::{filter_and_aggregate, SalesQuery};
    use rekap_core::types::Snapshot;
    use rekap_core::window::{resolve_window, Preset};

    fn document(snapshot: &Snapshot, preset: Preset, custom_from: Option<&str>) -> ReportDocument {
        let window = resolve_window(preset, now(), custom_from, None);
        let aggregation = filter_and_aggregate(&snapshot.sales, &SalesQuery::new(window));
        ReportDocument::build(&aggregation, snapshot, &ReportOptions::default(), now())
    }

    fn occurrences(haystack: &[u8], needle: &str) -> usize {
        haystack
            .windows(needle.len())
            .filter(|w| *w == needle.as_bytes())
            .count()
    }

    #[test]
    fn test_small_report_is_one_page() {
        let doc = document(&march_snapshot(), Preset::Monthly, None);
        let pdf = render_pdf(&doc).unwrap();

        assert!(pdf.bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(pdf.page_count, 1);
        let parsed = Document::load_mem(&pdf.bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
        assert_eq!(occurrences(&pdf.bytes, "(Page 1 of 1 - Sales Recap Report)"), 1);
    }

    #[test]
    fn test_long_report_paginates() {
        let doc = document(&many_sales(200), Preset::Monthly, None);
        let pdf = render_pdf(&doc).unwrap();

        assert!(pdf.page_count > 1);
        let parsed = Document::load_mem(&pdf.bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), pdf.page_count);

        let n = pdf.page_count;
        for page in 1..=n {
            let footer = format!("(Page {} of {} - Sales Recap Report)", page, n);
            assert_eq!(occurrences(&pdf.bytes, &footer), 1, "{}", footer);
        }
        // transaction header repeated after each break
        assert!(occurrences(&pdf.bytes, "(Customer)") > 1);
        // running header on every page
        assert!(occurrences(&pdf.bytes, "(Sales Recap Report)") >= n);
    }

    #[test]
    fn test_empty_period_prints_message() {
        let doc = document(&march_snapshot(), Preset::Custom, Some("2030-01-01"));
        let pdf = render_pdf(&doc).unwrap();

        let message = format!("({})", NO_DATA_FOR_PERIOD);
        // transactions plus one table per standard dimension
        assert_eq!(occurrences(&pdf.bytes, &message), 4);
        assert_eq!(pdf.page_count, 1);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Kopi Tubruk"), "Kopi Tubruk");
        assert_eq!(sanitize("Café\n"), "Caf??");
    }

    #[test]
    fn test_column_widths_fill_content() {
        let doc = document(&march_snapshot(), Preset::Monthly, None);
        for table in &doc.tables {
            let sum: f32 = column_widths(table).iter().sum();
            assert!((sum - CONTENT_WIDTH).abs() < 0.01, "{}", table.title);
        }
    }
}
