// ==========================================
// 库存管理系统 - 配置层
// ==========================================
// 职责: 应用配置加载，支持文件 + 环境变量覆写
// ==========================================

pub mod app_config;

pub use app_config::{get_default_db_path, AppConfig, ConfigError, ConfigResult, DB_PATH_ENV};
