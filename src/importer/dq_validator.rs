// ==========================================
// 库存管理系统 - 数据质量校验器实现
// ==========================================
// 职责: 导入记录的必填字段校验（产品/类别）
// 约束: 任一违规即拒绝整批导入
// ==========================================

use crate::domain::record::Record;
use crate::domain::types::Field;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};

/// 单条违规（行号从 1 开始，对应数据行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,
    pub field: String,
    pub message: String,
}

pub struct DqValidator;

impl DqValidator {
    /// 收集全部必填字段违规
    pub fn validate_required_fields(&self, records: &[Record]) -> Vec<DqViolation> {
        let mut violations = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            for (field, value) in [
                (Field::Product, &record.product),
                (Field::Category, &record.category),
            ] {
                if value.trim().is_empty() {
                    violations.push(DqViolation {
                        row_number: idx + 1,
                        field: field.header().to_string(),
                        message: format!("字段 '{}' 不能为空", field.header()),
                    });
                }
            }
        }

        violations
    }

    /// 校验并在首个违规处拒绝
    pub fn check(&self, records: &[Record]) -> ImportResult<()> {
        match self.validate_required_fields(records).into_iter().next() {
            Some(v) => Err(ImportError::MissingField {
                row: v.row_number,
                field: v.field,
            }),
            None => Ok(()),
        }
    }
}
