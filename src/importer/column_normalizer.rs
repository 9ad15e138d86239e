// ==========================================
// 库存管理系统 - 表头标准化
// ==========================================
// 职责: 任意拼写/大小写/同义词表头 → 规范表头
// 流程: TRIM → 首字母大写其余小写 → 同义词映射 → 未识别列原样保留
// 约束: 不会失败；重名规范列由补全阶段取第一列
// ==========================================

use crate::domain::schema::RawTable;
use crate::domain::types::Field;
use std::collections::HashMap;
use tracing::debug;

/// 内置同义词表（键为“首字母大写”后的形态）
const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("Id", "ID"),
    ("Categoria", "Categoría"),
    ("Cant", "Cantidad"),
    ("Precio unitario", "Precio"),
    ("Locacion", "Ubicación"),
    ("Ubicacion", "Ubicación"),
    ("Product", "Producto"),
    ("Category", "Categoría"),
    ("Quantity", "Cantidad"),
    ("Qty", "Cantidad"),
    ("Price", "Precio"),
    ("Unit price", "Precio"),
    ("Location", "Ubicación"),
];

/// 首字母大写，其余小写
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase();
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}

// ==========================================
// ColumnNormalizer - 表头标准化器
// ==========================================
#[derive(Debug, Clone)]
pub struct ColumnNormalizer {
    synonyms: HashMap<String, String>,
}

impl Default for ColumnNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnNormalizer {
    pub fn new() -> Self {
        let synonyms = DEFAULT_SYNONYMS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { synonyms }
    }

    /// 追加同义词（键同样先做 TRIM + 首字母大写）
    pub fn with_synonyms<I, K, V>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (k, v) in extra {
            self.synonyms.insert(capitalize(k.as_ref().trim()), v.into());
        }
        self
    }

    fn rename(&self, column: &str) -> String {
        let cleaned = capitalize(column.trim());
        match self.synonyms.get(&cleaned) {
            Some(canonical) => canonical.clone(),
            None => cleaned,
        }
    }

    /// 标准化表头
    ///
    /// 多个表头映射到同一规范列时全部照常重命名，由 complete 取第一列
    pub fn normalize(&self, columns: &[String]) -> Vec<String> {
        let renamed: Vec<String> = columns.iter().map(|c| self.rename(c)).collect();

        for field in Field::ALL {
            let hits = renamed.iter().filter(|r| r.as_str() == field.header()).count();
            if hits > 1 {
                debug!(column = field.header(), hits = hits, "重复规范列，取第一列");
            }
        }

        debug!(before = ?columns, after = ?renamed, "表头标准化完成");
        renamed
    }

    /// 标准化表格表头（数据行不变）
    pub fn normalize_table(&self, table: RawTable) -> RawTable {
        let columns = self.normalize(&table.columns);
        RawTable {
            columns,
            rows: table.rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("cANTIDAD"), "Cantidad");
        assert_eq!(capitalize("ubicación"), "Ubicación");
        assert_eq!(capitalize("PRECIO UNITARIO"), "Precio unitario");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_normalize_synonyms_and_case() {
        let normalizer = ColumnNormalizer::new();
        let out = normalizer.normalize(&s(&[
            " id ",
            "PRODUCTO",
            "Categoria",
            "cant",
            "Precio Unitario",
            "locacion",
        ]));

        assert_eq!(
            out,
            s(&["ID", "Producto", "Categoría", "Cantidad", "Precio", "Ubicación"])
        );
    }

    #[test]
    fn test_normalize_keeps_unknown_columns() {
        let normalizer = ColumnNormalizer::new();
        let out = normalizer.normalize(&s(&["Proveedor", "Producto"]));
        assert_eq!(out, s(&["Proveedor", "Producto"]));
    }

    #[test]
    fn test_duplicate_targets_still_renamed() {
        let normalizer = ColumnNormalizer::new();
        let out = normalizer.normalize(&s(&["producto", "categoria", "cant", "cantidad"]));
        assert_eq!(out, s(&["Producto", "Categoría", "Cantidad", "Cantidad"]));
    }

    #[test]
    fn test_duplicate_targets_first_column_wins() {
        let table = RawTable::new(
            s(&["producto", "categoria", "cant", "cantidad"]),
            vec![s(&["Martillo", "Herramientas", "3", "9"])],
        );

        let normalized = ColumnNormalizer::new().normalize_table(table);
        let completed = crate::domain::schema::complete(&normalized);

        assert_eq!(
            completed.rows[0],
            s(&["", "Martillo", "Herramientas", "3", "0", ""])
        );
    }

    #[test]
    fn test_extra_synonyms() {
        let normalizer = ColumnNormalizer::new().with_synonyms([("STOCK", "Cantidad")]);
        assert_eq!(normalizer.normalize(&s(&["stock"])), s(&["Cantidad"]));
    }

    #[test]
    fn test_english_headers() {
        let normalizer = ColumnNormalizer::new();
        let out = normalizer.normalize(&s(&["Product", "Unit Price", "QTY"]));
        assert_eq!(out, s(&["Producto", "Precio", "Cantidad"]));
    }
}
