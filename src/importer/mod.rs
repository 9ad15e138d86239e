// ==========================================
// 库存管理系统 - 导入层
// ==========================================
// 职责: 外部表格导入,生成库存记录
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod column_normalizer;
pub mod data_cleaner;
pub mod dq_validator;
pub mod error;
pub mod file_parser;
pub mod inventory_importer;

// 重导出核心类型
pub use column_normalizer::{capitalize, ColumnNormalizer};
pub use data_cleaner::DataCleaner;
pub use dq_validator::{DqValidator, DqViolation};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, UniversalFileParser};
pub use inventory_importer::{assign_missing_ids, ImportMode, ImportReport, InventoryImporter};
