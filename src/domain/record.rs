// ==========================================
// 库存管理系统 - 库存记录领域模型
// ==========================================
// 职责: 强类型库存记录 + 录入表单
// 对齐: inventory 表（id/product/category/quantity/price/location）
// ==========================================

use crate::domain::types::Field;
use serde::{Deserialize, Serialize};

/// 自动生成 ID 的前缀
pub const ID_PREFIX: &str = "PROD";

/// 产品名最大长度（录入表单约束）
pub const PRODUCT_MAX_CHARS: usize = 50;

/// 库位最大长度（录入表单约束）
pub const LOCATION_MAX_CHARS: usize = 20;

// ==========================================
// Record - 库存记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,       // 主键，分配后不可变
    pub product: String,  // 产品名（非空）
    pub category: String, // 类别（导入时为自由文本）
    pub quantity: i64,    // 数量（>= 0）
    pub price: f64,       // 单价（>= 0）
    pub location: String, // 库位（可为空串）
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        product: impl Into<String>,
        category: impl Into<String>,
        quantity: i64,
        price: f64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            product: product.into(),
            category: category.into(),
            quantity,
            price,
            location: location.into(),
        }
    }

    /// 行货值 = 数量 × 单价
    pub fn line_value(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    /// 按规范字段取文本形式（导出/预览用）
    pub fn text_of(&self, field: Field) -> String {
        match field {
            Field::Id => self.id.clone(),
            Field::Product => self.product.clone(),
            Field::Category => self.category.clone(),
            Field::Quantity => self.quantity.to_string(),
            Field::Price => self.price.to_string(),
            Field::Location => self.location.clone(),
        }
    }
}

/// 生成顺序 ID: PROD-0001
pub fn format_sequential_id(n: usize) -> String {
    format!("{}-{:04}", ID_PREFIX, n)
}

// ==========================================
// NewRecordForm - 人工录入表单
// ==========================================
// 用途: 单条录入，ID 由操作员提供（默认建议值见 suggest_next_id）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecordForm {
    pub id: String,
    pub product: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
    pub location: String,
}

impl NewRecordForm {
    pub fn into_record(self) -> Record {
        Record {
            id: self.id.trim().to_string(),
            product: self.product.trim().to_string(),
            category: self.category.trim().to_string(),
            quantity: self.quantity,
            price: self.price,
            location: self.location.trim().to_string(),
        }
    }
}
