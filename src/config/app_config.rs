// ==========================================
// 库存管理系统 - 应用配置
// ==========================================
// 职责: 配置加载（JSON 文件 → 环境变量覆写 → 默认值）
// 覆写顺序: 默认值 < 配置文件 < INVENTORY_DESK_DB_PATH
// ==========================================

use crate::domain::summary::DEFAULT_LOW_STOCK_THRESHOLD;
use crate::exporter::{ReportOptions, XlsxOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "INVENTORY_DESK_DB_PATH";

/// 默认数据库文件名
pub const DEFAULT_DB_FILE: &str = "inventory.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    Io { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    Parse { path: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub db_path: String,
    pub sheet_name: String,
    pub report_title: String,
    pub currency_symbol: String,
    pub low_stock_threshold: i64,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: get_default_db_path(),
            sheet_name: "Inventario".to_string(),
            report_title: "Reporte de Inventario".to_string(),
            currency_symbol: "$".to_string(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl AppConfig {
    /// 加载配置
    ///
    /// # 参数
    /// - path: 可选 JSON 配置文件；缺省字段取默认值
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(db_path) = env_db_path() {
            debug!(db_path = %db_path, "使用环境变量指定的数据库路径");
            config.db_path = db_path;
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: display.clone(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: display,
            message: e.to_string(),
        })
    }

    pub fn xlsx_options(&self) -> XlsxOptions {
        XlsxOptions {
            sheet_name: self.sheet_name.clone(),
            currency_symbol: self.currency_symbol.clone(),
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            title: self.report_title.clone(),
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}

fn env_db_path() -> Option<String> {
    std::env::var(DB_PATH_ENV)
        .ok()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 > 用户数据目录 > 当前目录
///
/// 说明: 只计算路径，不创建目录；数据目录由仓储初始化时创建
pub fn get_default_db_path() -> String {
    if let Some(path) = env_db_path() {
        return path;
    }

    default_db_path_in(dirs::data_dir().as_deref())
        .to_string_lossy()
        .to_string()
}

/// 在给定数据目录下计算默认数据库路径（无数据目录时回退到当前目录）
pub fn default_db_path_in(data_dir: Option<&Path>) -> PathBuf {
    match data_dir {
        Some(dir) => dir.join("inventory-desk").join(DEFAULT_DB_FILE),
        None => PathBuf::from(".").join(DEFAULT_DB_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_default_db_path_does_not_create_dirs() {
        let base = tempfile::tempdir().unwrap();

        let path = default_db_path_in(Some(base.path()));

        assert_eq!(path, base.path().join("inventory-desk").join(DEFAULT_DB_FILE));
        assert!(!base.path().join("inventory-desk").exists());
        assert_eq!(default_db_path_in(None), PathBuf::from(".").join(DEFAULT_DB_FILE));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"db_path": "/tmp/x.db", "currency_symbol": "€", "low_stock_threshold": 2}}"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.db_path, "/tmp/x.db");
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.low_stock_threshold, 2);
        assert_eq!(config.sheet_name, "Inventario");
        assert_eq!(config.report_title, "Reporte de Inventario");
        assert!(!config.log_json);
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/inventory.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_export_options_follow_config() {
        let config = AppConfig {
            sheet_name: "Stock".to_string(),
            currency_symbol: "€".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.xlsx_options().sheet_name, "Stock");
        assert_eq!(config.report_options().currency_symbol, "€");
        assert_eq!(config.report_options().title, "Reporte de Inventario");
    }
}
