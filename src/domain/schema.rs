// ==========================================
// 库存管理系统 - 规范表结构
// ==========================================
// 职责: 无类型表格（表头 + 文本单元格）与规范列补全
// 约束: complete 为纯函数且幂等
// ==========================================

use crate::domain::types::Field;
use serde::{Deserialize, Serialize};

// ==========================================
// RawTable - 无类型表格
// ==========================================
// 表头为任意字符串（未必是规范列名）；行长度可能短于表头
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 首个同名列的下标
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 读取单元格，越界按空串处理
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

/// 补全规范列
///
/// # 规则
/// - 输出恰好六列，按规范顺序排列
/// - 缺失列补默认值（文本列空串，数值列 "0"）
/// - 同名列重复时取第一列；非规范列丢弃
pub fn complete(table: &RawTable) -> RawTable {
    let sources: Vec<Option<usize>> = Field::ALL
        .iter()
        .map(|f| table.column_index(f.header()))
        .collect();

    let columns = Field::ALL.iter().map(|f| f.header().to_string()).collect();

    let rows = (0..table.row_count())
        .map(|row| {
            Field::ALL
                .iter()
                .zip(sources.iter())
                .map(|(field, src)| match src {
                    Some(col) => table.cell(row, *col).to_string(),
                    None => field.default_cell().to_string(),
                })
                .collect()
        })
        .collect();

    RawTable { columns, rows }
}

/// 表头是否已是规范形态
pub fn is_canonical(table: &RawTable) -> bool {
    table.columns.len() == Field::ALL.len()
        && table
            .columns
            .iter()
            .zip(Field::ALL.iter())
            .all(|(c, f)| c == f.header())
}
