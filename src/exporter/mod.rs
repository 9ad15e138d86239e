// ==========================================
// 库存管理系统 - 导出层
// ==========================================
// 职责: 记录集 → 下载文件字节（.xlsx / .pdf）
// 约束: 纯函数，不访问数据库；失败时不产生任何字节
// ==========================================

pub mod error;
pub mod format;
pub mod pdf_report;
pub mod xlsx_exporter;

pub use error::{ExportError, ExportResult};
pub use format::{format_currency, truncate_text};
pub use pdf_report::{export_pdf, ReportOptions};
pub use xlsx_exporter::{export_xlsx, XlsxOptions};

use crate::domain::record::Record;
use crate::domain::types::Field;

/// 导出前检查：单价必须为有限数
pub(crate) fn ensure_serializable(records: &[Record]) -> ExportResult<()> {
    match records.iter().position(|r| !r.price.is_finite()) {
        Some(idx) => Err(ExportError::MalformedNumber {
            row: idx + 1,
            field: Field::Price.header().to_string(),
            value: records[idx].price.to_string(),
        }),
        None => Ok(()),
    }
}
