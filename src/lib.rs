// ==========================================
// 库存管理系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite (rusqlite)
// 系统定位: 单用户库存台账（表格导入 / 持久化 / 报表导出）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与规范字段
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部表格
pub mod importer;

// 导出层 - Excel / PDF
pub mod exporter;

// 配置层 - 应用配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{EntryCategory, Field, InventorySummary, NewRecordForm, RawTable, Record};

// 仓储 / 导入
pub use importer::{ImportMode, InventoryImporter};
pub use repository::InventoryRepository;

// API
pub use api::{InventoryApi, OperationOutcome};

// 配置
pub use config::AppConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "库存管理系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
