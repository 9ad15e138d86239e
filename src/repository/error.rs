// ==========================================
// 库存管理系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 启动错误（致命）=====
    #[error("数据库初始化失败: {0}")]
    Initialization(String),

    // ===== 存储 I/O 错误 =====
    #[error("数据库读写失败: {0}")]
    StorageIo(String),

    // ===== 约束错误 =====
    #[error("约束违反: {0}")]
    ConstraintViolation(String),

    #[error("必填字段缺失 (第 {row} 条, 字段 {field})")]
    MissingField { row: usize, field: String },

    #[error("没有可保存的数据")]
    EmptyRecordSet,
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, msg)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                RepositoryError::ConstraintViolation(
                    msg.unwrap_or_else(|| "constraint failed".to_string()),
                )
            }
            _ => RepositoryError::StorageIo(err.to_string()),
        }
    }
}

impl RepositoryError {
    /// 是否为致命错误（需终止启动）
    pub fn is_fatal(&self) -> bool {
        matches!(self, RepositoryError::Initialization(_))
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_unique_failure_maps_to_constraint_violation() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id TEXT PRIMARY KEY); INSERT INTO t VALUES ('a');")
            .unwrap();

        let err: RepositoryError = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .unwrap_err()
            .into();

        assert!(matches!(err, RepositoryError::ConstraintViolation(ref m) if m.contains("UNIQUE")));
    }

    #[test]
    fn test_other_failure_maps_to_storage_io() {
        let conn = Connection::open_in_memory().unwrap();
        let err: RepositoryError = conn
            .execute("SELECT * FROM missing_table", [])
            .unwrap_err()
            .into();

        assert!(matches!(err, RepositoryError::StorageIo(_)));
        assert!(!err.is_fatal());
    }
}
