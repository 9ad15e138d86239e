// ==========================================
// 库存管理系统 - 领域类型定义
// ==========================================
// 职责: 规范字段（六列）与录入表单的类别枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 规范字段 (Canonical Field)
// ==========================================
// 顺序即规范列顺序: ID / 产品 / 类别 / 数量 / 单价 / 库位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Id,
    Product,
    Category,
    Quantity,
    Price,
    Location,
}

impl Field {
    /// 规范顺序的全部字段
    pub const ALL: [Field; 6] = [
        Field::Id,
        Field::Product,
        Field::Category,
        Field::Quantity,
        Field::Price,
        Field::Location,
    ];

    /// 表格侧的规范表头（操作员语言）
    pub fn header(&self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::Product => "Producto",
            Field::Category => "Categoría",
            Field::Quantity => "Cantidad",
            Field::Price => "Precio",
            Field::Location => "Ubicación",
        }
    }

    /// 规范顺序中的列下标（补全后的表格按此下标取值）
    pub fn index(&self) -> usize {
        match self {
            Field::Id => 0,
            Field::Product => 1,
            Field::Category => 2,
            Field::Quantity => 3,
            Field::Price => 4,
            Field::Location => 5,
        }
    }

    /// 数值字段缺失时补 "0"，文本字段补空串
    pub fn is_numeric(&self) -> bool {
        matches!(self, Field::Quantity | Field::Price)
    }

    /// 缺列时的默认单元格值
    pub fn default_cell(&self) -> &'static str {
        if self.is_numeric() {
            "0"
        } else {
            ""
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

// ==========================================
// 录入类别 (Entry Category)
// ==========================================
// 仅约束人工录入表单；导入数据的类别为自由文本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryCategory {
    Electronics,
    Clothing,
    Food,
    Tools,
    Other,
}

impl EntryCategory {
    pub const ALL: [EntryCategory; 5] = [
        EntryCategory::Electronics,
        EntryCategory::Clothing,
        EntryCategory::Food,
        EntryCategory::Tools,
        EntryCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EntryCategory::Electronics => "Electrónica",
            EntryCategory::Clothing => "Ropa",
            EntryCategory::Food => "Alimentos",
            EntryCategory::Tools => "Herramientas",
            EntryCategory::Other => "Otros",
        }
    }

    pub fn from_label(label: &str) -> Option<EntryCategory> {
        let trimmed = label.trim();
        EntryCategory::ALL
            .iter()
            .copied()
            .find(|c| c.label() == trimmed)
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
