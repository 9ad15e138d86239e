// ==========================================
// 库存管理系统 - PDF 报表导出
// ==========================================
// 职责: 记录集 → A4 表格报表（标题 + 表头 + 明细 + 合计行）
// 约束: 行将越过下边距时换页，新页重复表头
// 坐标: printpdf 原点在左下角，单位 mm
// ==========================================

use crate::domain::record::Record;
use crate::domain::types::Field;
use crate::exporter::ensure_serializable;
use crate::exporter::error::ExportResult;
use crate::exporter::format::{format_currency, truncate_text, REPORT_TEXT_MAX_CHARS};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};
use tracing::debug;

// ==========================================
// 版面常量
// ==========================================
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const USABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

/// 各列占可用宽度的比例（与 Field::ALL 顺序一致）
const COLUMN_FRACTIONS: [f32; 6] = [0.15, 0.25, 0.15, 0.1, 0.15, 0.2];

const TITLE_HEIGHT: f32 = 12.0;
const HEADER_HEIGHT: f32 = 10.0;
const ROW_HEIGHT: f32 = 8.0;

const TITLE_FONT_SIZE: f32 = 16.0;
const BODY_FONT_SIZE: f32 = 9.0;
const BORDER_THICKNESS: f32 = 0.3;
const CELL_PADDING: f32 = 2.0;

// pt → mm
const PT_TO_MM: f32 = 0.3528;
// Helvetica 平均字宽约为字号的一半
const AVG_GLYPH_RATIO: f32 = 0.5;

const SUMMARY_LABEL: &str = "Total Valor Inventario:";

/// PDF 报表选项
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    pub currency_symbol: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Reporte de Inventario".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

/// 导出为 PDF 字节
pub fn export_pdf(records: &[Record], options: &ReportOptions) -> ExportResult<Vec<u8>> {
    render(records, options).map(|(bytes, _)| bytes)
}

/// 渲染报表，返回 (字节, 页数)
fn render(records: &[Record], options: &ReportOptions) -> ExportResult<(Vec<u8>, usize)> {
    ensure_serializable(records)?;

    let mut canvas = ReportCanvas::new(&options.title)?;
    canvas.draw_title(&options.title);
    canvas.draw_header();

    for record in records {
        if canvas.needs_page(ROW_HEIGHT) {
            canvas.next_page();
            canvas.draw_header();
        }
        let cells: Vec<Cell> = Field::ALL
            .iter()
            .zip(column_widths())
            .map(|(field, width)| Cell::left(width, record_cell_text(record, *field, options)))
            .collect();
        canvas.draw_row(&cells, ROW_HEIGHT, false);
    }

    // === 合计行 ===
    let total_units: i64 = records.iter().map(|r| r.quantity).sum();
    let total_value: f64 = records.iter().map(Record::line_value).sum();
    let widths = column_widths();
    let summary = [
        Cell::left(widths[0] + widths[1] + widths[2], SUMMARY_LABEL.to_string()),
        Cell::left(widths[3], total_units.to_string()),
        Cell::left(widths[4], format_currency(total_value, &options.currency_symbol)),
        Cell::left(widths[5], String::new()),
    ];
    if canvas.needs_page(ROW_HEIGHT) {
        canvas.next_page();
        canvas.draw_header();
    }
    canvas.draw_row(&summary, ROW_HEIGHT, true);

    let pages = canvas.pages;
    let bytes = canvas.doc.save_to_bytes()?;
    debug!(rows = records.len(), pages = pages, size = bytes.len(), "PDF 导出完成");
    Ok((bytes, pages))
}

fn column_widths() -> [f32; 6] {
    COLUMN_FRACTIONS.map(|f| f * USABLE_WIDTH)
}

fn record_cell_text(record: &Record, field: Field, options: &ReportOptions) -> String {
    match field {
        Field::Price => format_currency(record.price, &options.currency_symbol),
        Field::Quantity => record.quantity.to_string(),
        _ => truncate_text(&record.text_of(field), REPORT_TEXT_MAX_CHARS),
    }
}

fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVG_GLYPH_RATIO * PT_TO_MM
}

// ==========================================
// Cell - 单元格
// ==========================================
struct Cell {
    width: f32,
    text: String,
    centered: bool,
}

impl Cell {
    fn left(width: f32, text: String) -> Self {
        Self {
            width,
            text,
            centered: false,
        }
    }

    fn centered(width: f32, text: String) -> Self {
        Self {
            width,
            text,
            centered: true,
        }
    }
}

// ==========================================
// ReportCanvas - 绘制状态（当前页 + 纵向游标）
// ==========================================
struct ReportCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor_y: f32,
    pages: usize,
}

impl ReportCanvas {
    fn new(title: &str) -> ExportResult<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);
        layer.set_outline_thickness(BORDER_THICKNESS);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor_y: PAGE_HEIGHT - MARGIN,
            pages: 1,
        })
    }

    fn needs_page(&self, height: f32) -> bool {
        self.cursor_y - height < MARGIN
    }

    fn next_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Layer {}", self.pages + 1),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.layer.set_outline_thickness(BORDER_THICKNESS);
        self.cursor_y = PAGE_HEIGHT - MARGIN;
        self.pages += 1;
    }

    fn draw_title(&mut self, title: &str) {
        let width = estimate_text_width(title, TITLE_FONT_SIZE);
        let x = ((PAGE_WIDTH - width) / 2.0).max(MARGIN);
        let baseline = self.cursor_y - TITLE_HEIGHT + 4.0;
        self.layer
            .use_text(title, TITLE_FONT_SIZE, Mm(x), Mm(baseline), &self.bold);
        self.cursor_y -= TITLE_HEIGHT;
    }

    fn draw_header(&mut self) {
        let cells: Vec<Cell> = Field::ALL
            .iter()
            .zip(column_widths())
            .map(|(field, width)| Cell::centered(width, field.header().to_string()))
            .collect();
        self.draw_row(&cells, HEADER_HEIGHT, true);
    }

    fn draw_row(&mut self, cells: &[Cell], height: f32, bold: bool) {
        let top = self.cursor_y;
        let bottom = top - height;
        let baseline = bottom + height / 2.0 - BODY_FONT_SIZE * PT_TO_MM / 3.0;
        let font = if bold { &self.bold } else { &self.regular };

        let mut x = MARGIN;
        for cell in cells {
            self.layer.add_line(rectangle(x, bottom, cell.width, height));

            if !cell.text.is_empty() {
                let text_x = if cell.centered {
                    let w = estimate_text_width(&cell.text, BODY_FONT_SIZE);
                    x + ((cell.width - w) / 2.0).max(CELL_PADDING)
                } else {
                    x + CELL_PADDING
                };
                self.layer
                    .use_text(cell.text.as_str(), BODY_FONT_SIZE, Mm(text_x), Mm(baseline), font);
            }
            x += cell.width;
        }

        self.cursor_y = bottom;
    }
}

fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + width), Mm(y)), false),
            (Point::new(Mm(x + width), Mm(y + height)), false),
            (Point::new(Mm(x), Mm(y + height)), false),
        ],
        is_closed: true,
    }
}
