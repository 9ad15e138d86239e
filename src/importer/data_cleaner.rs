// ==========================================
// 库存管理系统 - 数据清洗器实现
// ==========================================
// 职责: 规范表格 → 强类型记录（唯一的类型转换边界）
// 规则: 文本原样保留 / 非数值转 0 / 数量向零截断 / 负数保留交由落库拒绝
// ==========================================

use crate::domain::record::Record;
use crate::domain::schema::{complete, RawTable};
use crate::domain::types::Field;

pub struct DataCleaner;

impl DataCleaner {
    /// 文本字段原样保留（与落库/导出一致，导出再导入逐字节相同）
    pub fn clean_text(&self, value: &str) -> String {
        value.to_string()
    }

    /// 解析数值；无法解析或非有限值返回 None
    fn parse_number(&self, value: &str) -> Option<f64> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    /// 数量：非数值 → 0，小数向零截断
    pub fn coerce_quantity(&self, value: &str) -> i64 {
        self.parse_number(value).map(|v| v.trunc() as i64).unwrap_or(0)
    }

    /// 单价：非数值 → 0.0
    pub fn coerce_price(&self, value: &str) -> f64 {
        self.parse_number(value).unwrap_or(0.0)
    }

    /// 表格 → 记录（先补全规范列，已补全的表格再补全结果不变）
    pub fn to_records(&self, table: &RawTable) -> Vec<Record> {
        let table = complete(table);
        let cell = |row: usize, f: Field| table.cell(row, f.index());

        (0..table.row_count())
            .map(|row| Record {
                id: self.clean_text(cell(row, Field::Id)),
                product: self.clean_text(cell(row, Field::Product)),
                category: self.clean_text(cell(row, Field::Category)),
                quantity: self.coerce_quantity(cell(row, Field::Quantity)),
                price: self.coerce_price(cell(row, Field::Price)),
                location: self.clean_text(cell(row, Field::Location)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_quantity() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.coerce_quantity("12"), 12);
        assert_eq!(cleaner.coerce_quantity(" 3.9 "), 3);
        assert_eq!(cleaner.coerce_quantity("-3"), -3);
        assert_eq!(cleaner.coerce_quantity("abc"), 0);
        assert_eq!(cleaner.coerce_quantity(""), 0);
        assert_eq!(cleaner.coerce_quantity("NaN"), 0);
    }

    #[test]
    fn test_coerce_price() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.coerce_price("2.5"), 2.5);
        assert_eq!(cleaner.coerce_price("-1.25"), -1.25);
        assert_eq!(cleaner.coerce_price("gratis"), 0.0);
        assert_eq!(cleaner.coerce_price("inf"), 0.0);
    }

    #[test]
    fn test_to_records_fills_defaults() {
        let table = RawTable::new(
            vec!["Producto".to_string(), "Categoría".to_string()],
            vec![vec!["Martillo".to_string(), "Herramientas".to_string()]],
        );

        let records = DataCleaner.to_records(&table);

        assert_eq!(
            records,
            vec![Record::new("", "Martillo", "Herramientas", 0, 0.0, "")]
        );
    }

    #[test]
    fn test_to_records_keeps_text_verbatim() {
        let table = RawTable::new(
            vec!["Producto".to_string(), "Categoría".to_string(), "Cantidad".to_string()],
            vec![vec![" Martillo ".to_string(), "Herramientas ".to_string(), " 3 ".to_string()]],
        );

        let records = DataCleaner.to_records(&table);

        assert_eq!(records[0].product, " Martillo ");
        assert_eq!(records[0].category, "Herramientas ");
        assert_eq!(records[0].quantity, 3);
    }
}
