// ==========================================
// 库存管理系统 - 人工录入校验器
// ==========================================
// 职责: 单条录入表单的字段校验 + ID 重复检查
// 约束: 收集全部字段违规后一次性返回
// ==========================================

use crate::api::error::{ApiError, ApiResult, FieldViolation};
use crate::domain::record::{NewRecordForm, Record, LOCATION_MAX_CHARS, PRODUCT_MAX_CHARS};
use crate::domain::types::{EntryCategory, Field};

/// 录入表单校验器
pub struct EntryValidator;

impl EntryValidator {
    /// 校验录入表单并转换为记录
    ///
    /// # 参数
    /// - form: 录入表单
    /// - current: 当前库存（用于 ID 重复检查）
    ///
    /// # 返回
    /// - Ok(Record): 已去除首尾空白的新记录
    /// - Err(ApiError::ValidationFailed): 字段违规（含全部违规明细）
    /// - Err(ApiError::DuplicateId): ID 已存在
    pub fn validate(form: NewRecordForm, current: &[Record]) -> ApiResult<Record> {
        let record = form.into_record();
        let violations = Self::field_violations(&record);

        if !violations.is_empty() {
            let reason = violations
                .iter()
                .map(|v| format!("{}: {}", v.field, v.reason))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ApiError::ValidationFailed { reason, violations });
        }

        if current.iter().any(|r| r.id == record.id) {
            return Err(ApiError::DuplicateId(record.id));
        }

        Ok(record)
    }

    fn field_violations(record: &Record) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        let mut push = |field: Field, reason: String| {
            violations.push(FieldViolation {
                field: field.header().to_string(),
                reason,
            })
        };

        if record.id.is_empty() {
            push(Field::Id, "不能为空".to_string());
        }

        if record.product.is_empty() {
            push(Field::Product, "产品名必填".to_string());
        } else if record.product.chars().count() > PRODUCT_MAX_CHARS {
            push(Field::Product, format!("不能超过 {} 个字符", PRODUCT_MAX_CHARS));
        }

        if EntryCategory::from_label(&record.category).is_none() {
            let allowed = EntryCategory::ALL
                .iter()
                .map(|c| c.label())
                .collect::<Vec<_>>()
                .join("/");
            push(Field::Category, format!("必须为 {} 之一", allowed));
        }

        if record.quantity < 0 {
            push(Field::Quantity, "不能为负数".to_string());
        }

        if !record.price.is_finite() || record.price < 0.0 {
            push(Field::Price, "必须为非负数".to_string());
        }

        if record.location.chars().count() > LOCATION_MAX_CHARS {
            push(Field::Location, format!("不能超过 {} 个字符", LOCATION_MAX_CHARS));
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewRecordForm {
        NewRecordForm {
            id: "PROD-0003".to_string(),
            product: "Taladro".to_string(),
            category: "Herramientas".to_string(),
            quantity: 2,
            price: 59.9,
            location: "ALM-02".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let record = EntryValidator::validate(form(), &[]).unwrap();
        assert_eq!(record.id, "PROD-0003");
        assert_eq!(record.category, "Herramientas");
    }

    #[test]
    fn test_collects_all_violations() {
        let mut f = form();
        f.product = "  ".to_string();
        f.category = "Juguetes".to_string();
        f.quantity = -1;
        f.location = "x".repeat(21);

        match EntryValidator::validate(f, &[]) {
            Err(ApiError::ValidationFailed { violations, .. }) => {
                let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(fields, vec!["Producto", "Categoría", "Cantidad", "Ubicación"]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_product_length_limit() {
        let mut f = form();
        f.product = "ñ".repeat(50);
        assert!(EntryValidator::validate(f.clone(), &[]).is_ok());

        f.product = "ñ".repeat(51);
        assert!(matches!(
            EntryValidator::validate(f, &[]),
            Err(ApiError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_duplicate_id() {
        let current = vec![Record::new("PROD-0003", "Sierra", "Herramientas", 1, 1.0, "")];
        let err = EntryValidator::validate(form(), &current).unwrap_err();
        assert!(matches!(err, ApiError::DuplicateId(ref id) if id == "PROD-0003"));
    }
}
