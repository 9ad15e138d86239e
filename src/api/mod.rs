// ==========================================
// 库存管理系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供命令行 / 界面层调用
// ==========================================

pub mod error;
pub mod inventory_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult, FieldViolation};
pub use inventory_api::{
    ExportOutcome, ImportOutcome, InventoryApi, InventorySnapshot, OperationOutcome,
};
pub use validator::EntryValidator;
