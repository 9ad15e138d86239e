// ==========================================
// 库存管理系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件解析失败 ({file}): {message}")]
    Parse { file: String, message: String },

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件为空: {0}")]
    EmptyInput(String),

    // ===== 数据质量错误 =====
    #[error("必填字段为空 (第 {row} 行, 字段 {field})")]
    MissingField { row: usize, field: String },

    // ===== 落库错误 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ImportError {
    pub fn parse(file: &str, message: impl Into<String>) -> Self {
        ImportError::Parse {
            file: file.to_string(),
            message: message.into(),
        }
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::parse("workbook", err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::parse("csv", err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
