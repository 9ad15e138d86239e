// ==========================================
// 库存管理系统 - 库存分析汇总
// ==========================================
// 职责: 总品数/总件数/总货值/类别分布/Top10/低库存
// ==========================================

use crate::domain::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 默认低库存阈值（件）
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Top N 数量
const TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub product: String,
    pub quantity: i64,
    pub price: f64,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockItem {
    pub product: String,
    pub quantity: i64,
    pub location: String,
}

// ==========================================
// InventorySummary - 库存分析结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_products: usize,
    pub total_units: i64,
    pub total_value: f64,
    pub distinct_categories: usize,
    pub by_category: Vec<CategoryCount>,
    pub top_by_quantity: Vec<TopProduct>,
    pub low_stock: Vec<LowStockItem>,
}

impl InventorySummary {
    pub fn compute(records: &[Record], low_stock_threshold: i64) -> Self {
        let total_units = records.iter().map(|r| r.quantity).sum();
        let total_value = records.iter().map(Record::line_value).sum();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for r in records {
            *counts.entry(r.category.as_str()).or_insert(0) += 1;
        }
        let mut by_category: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .collect();
        by_category.sort_by(|a, b| b.count.cmp(&a.count).then(a.category.cmp(&b.category)));

        // 稳定排序：同数量保持输入顺序
        let mut by_qty: Vec<&Record> = records.iter().collect();
        by_qty.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        let top_by_quantity = by_qty
            .into_iter()
            .take(TOP_N)
            .map(|r| TopProduct {
                product: r.product.clone(),
                quantity: r.quantity,
                price: r.price,
                total_value: r.line_value(),
            })
            .collect();

        let mut low: Vec<&Record> = records
            .iter()
            .filter(|r| r.quantity <= low_stock_threshold)
            .collect();
        low.sort_by_key(|r| r.quantity);
        let low_stock = low
            .into_iter()
            .map(|r| LowStockItem {
                product: r.product.clone(),
                quantity: r.quantity,
                location: r.location.clone(),
            })
            .collect();

        Self {
            total_products: records.len(),
            total_units,
            total_value,
            distinct_categories: by_category.len(),
            by_category,
            top_by_quantity,
            low_stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("PROD-0001", "Cable", "Electrónica", 20, 1.5, "A-1"),
            Record::new("PROD-0002", "Camisa", "Ropa", 3, 10.0, "B-2"),
            Record::new("PROD-0003", "Arroz", "Alimentos", 0, 2.0, "C-3"),
            Record::new("PROD-0004", "Radio", "Electrónica", 7, 25.0, ""),
        ]
    }

    #[test]
    fn test_totals() {
        let summary = InventorySummary::compute(&sample(), DEFAULT_LOW_STOCK_THRESHOLD);

        assert_eq!(summary.total_products, 4);
        assert_eq!(summary.total_units, 30);
        assert!((summary.total_value - (30.0 + 30.0 + 0.0 + 175.0)).abs() < 1e-9);
        assert_eq!(summary.distinct_categories, 3);
    }

    #[test]
    fn test_category_distribution_sorted() {
        let summary = InventorySummary::compute(&sample(), DEFAULT_LOW_STOCK_THRESHOLD);

        assert_eq!(summary.by_category[0].category, "Electrónica");
        assert_eq!(summary.by_category[0].count, 2);
        assert_eq!(summary.by_category[1].category, "Alimentos");
    }

    #[test]
    fn test_top_and_low_stock() {
        let summary = InventorySummary::compute(&sample(), DEFAULT_LOW_STOCK_THRESHOLD);

        assert_eq!(summary.top_by_quantity[0].product, "Cable");
        assert_eq!(summary.top_by_quantity[0].total_value, 30.0);

        let low: Vec<&str> = summary.low_stock.iter().map(|l| l.product.as_str()).collect();
        assert_eq!(low, vec!["Arroz", "Camisa"]);
    }

    #[test]
    fn test_empty_records() {
        let summary = InventorySummary::compute(&[], DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(summary.total_products, 0);
        assert_eq!(summary.total_value, 0.0);
        assert!(summary.by_category.is_empty());
    }
}
