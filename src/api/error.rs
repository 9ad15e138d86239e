// ==========================================
// 库存管理系统 - API层错误类型
// ==========================================
// 职责: 统一各层错误，转换为面向操作员的消息
// 约束: 错误不越过 API 边界，最终以结果值（Outcome）返回
// ==========================================

use crate::config::ConfigError;
use crate::exporter::ExportError;
use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("录入校验失败: {reason}")]
    ValidationFailed {
        reason: String,
        violations: Vec<FieldViolation>,
    },

    #[error("ID {0} 已存在")]
    DuplicateId(String),

    #[error("没有可保存的数据")]
    NothingToSave,

    #[error("必填字段为空 (第 {row} 行, 字段 {field})")]
    MissingField { row: usize, field: String },

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件解析失败: {0}")]
    ParseError(String),

    #[error("文件为空: {0}")]
    EmptyInput(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库初始化失败: {0}")]
    Initialization(String),

    #[error("约束违反: {0}")]
    ConstraintViolation(String),

    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 导出 / 配置错误
    // ==========================================
    #[error("导出失败: {0}")]
    ExportError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

impl ApiError {
    /// 提示级别（非失败，只是无事可做）
    pub fn is_warning(&self) -> bool {
        matches!(self, ApiError::NothingToSave | ApiError::EmptyInput(_))
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Initialization(msg) => ApiError::Initialization(msg),
            RepositoryError::StorageIo(msg) => ApiError::DatabaseError(msg),
            RepositoryError::ConstraintViolation(msg) => ApiError::ConstraintViolation(msg),
            RepositoryError::MissingField { row, field } => ApiError::MissingField { row, field },
            RepositoryError::EmptyRecordSet => ApiError::NothingToSave,
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Parse { .. } | ImportError::UnsupportedFormat(_) => {
                ApiError::ParseError(err.to_string())
            }
            ImportError::EmptyInput(file) => ApiError::EmptyInput(file),
            ImportError::MissingField { row, field } => ApiError::MissingField { row, field },
            ImportError::Repository(e) => e.into(),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 录入校验违规详情
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// 字段表头（如 "Producto"）
    pub field: String,
    /// 违规原因
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_mapping() {
        let err: ApiError = RepositoryError::EmptyRecordSet.into();
        assert!(matches!(err, ApiError::NothingToSave));
        assert!(err.is_warning());

        let err: ApiError = RepositoryError::ConstraintViolation("x".into()).into();
        assert!(matches!(err, ApiError::ConstraintViolation(_)));
        assert!(!err.is_warning());
    }

    #[test]
    fn test_import_error_mapping_unwraps_repository() {
        let err: ApiError =
            ImportError::Repository(RepositoryError::StorageIo("disk".into())).into();
        assert!(matches!(err, ApiError::DatabaseError(ref m) if m == "disk"));

        let err: ApiError = ImportError::EmptyInput("a.xlsx".into()).into();
        assert!(err.is_warning());
    }

    #[test]
    fn test_parse_error_keeps_file_name() {
        let err: ApiError = ImportError::parse("stock.xlsx", "bad zip").into();
        assert!(err.to_string().contains("stock.xlsx"));
    }
}
