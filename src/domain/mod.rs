// ==========================================
// 库存管理系统 - 领域模型层
// ==========================================
// 职责: 定义库存记录、规范字段、表格补全与分析汇总
// 红线: 不含数据访问逻辑
// ==========================================

pub mod record;
pub mod schema;
pub mod summary;
pub mod types;

// 重导出核心类型
pub use record::{format_sequential_id, NewRecordForm, Record};
pub use schema::{complete, RawTable};
pub use summary::InventorySummary;
pub use types::{EntryCategory, Field};
