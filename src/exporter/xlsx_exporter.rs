// ==========================================
// 库存管理系统 - Excel 导出
// ==========================================
// 职责: 记录集 → 单工作表 .xlsx 字节
// 约束: 纯函数；同输入同输出（文档创建时间固定）
// ==========================================

use crate::domain::record::Record;
use crate::domain::types::Field;
use crate::exporter::error::ExportResult;
use crate::exporter::ensure_serializable;
use crate::exporter::format::excel_currency_format;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, Worksheet};
use tracing::debug;

/// 规范列宽（与 Field::ALL 顺序一致）
const COLUMN_WIDTHS: [f64; 6] = [15.0, 30.0, 20.0, 10.0, 12.0, 15.0];

/// Excel 导出选项
#[derive(Debug, Clone)]
pub struct XlsxOptions {
    pub sheet_name: String,
    pub currency_symbol: String,
}

impl Default for XlsxOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Inventario".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

/// 导出为 .xlsx 字节
pub fn export_xlsx(records: &[Record], options: &XlsxOptions) -> ExportResult<Vec<u8>> {
    ensure_serializable(records)?;

    let mut workbook = Workbook::new();

    // 固定创建时间，保证输出可复现
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    let properties = DocProperties::new().set_creation_datetime(&created);
    workbook.set_properties(&properties);

    let money = Format::new().set_num_format(excel_currency_format(&options.currency_symbol));
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&options.sheet_name)?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    for (col, field) in Field::ALL.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, field.header(), &header)?;
    }

    for (idx, record) in records.iter().enumerate() {
        write_record(worksheet, (idx + 1) as u32, record, &money)?;
    }

    let bytes = workbook.save_to_buffer()?;
    debug!(rows = records.len(), size = bytes.len(), "Excel 导出完成");
    Ok(bytes)
}

fn write_record(ws: &mut Worksheet, row: u32, record: &Record, money: &Format) -> ExportResult<()> {
    for (col, field) in Field::ALL.iter().enumerate() {
        let col = col as u16;
        match field {
            Field::Quantity => {
                ws.write_number(row, col, record.quantity as f64)?;
            }
            Field::Price => {
                ws.write_number_with_format(row, col, record.price, money)?;
            }
            _ => {
                let text = record.text_of(*field);
                // 空串不写，读取时同样为空
                if !text.is_empty() {
                    ws.write_string(row, col, &text)?;
                }
            }
        }
    }
    Ok(())
}
