// ==========================================
// 库存管理系统 - 导出模块错误类型
// ==========================================

use thiserror::Error;

/// 导出模块错误类型（任何失败都不产生部分文件）
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("数值字段非法 (第 {row} 条, 字段 {field}): {value}")]
    MalformedNumber {
        row: usize,
        field: String,
        value: String,
    },

    #[error("序列化失败: {0}")]
    Serialization(String),
}

// 实现 From<rust_xlsxwriter::XlsxError>
impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Serialization(format!("Excel: {}", err))
    }
}

// 实现 From<printpdf::Error>
impl From<printpdf::Error> for ExportError {
    fn from(err: printpdf::Error) -> Self {
        ExportError::Serialization(format!("PDF: {}", err))
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
