// ==========================================
// 库存管理系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 连接按“一次逻辑操作”打开，用完即释放，不做连接池
// ==========================================

use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 库存表 DDL（幂等）
pub const INVENTORY_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS inventory (
    id TEXT PRIMARY KEY,
    product TEXT NOT NULL,
    category TEXT NOT NULL,
    quantity INTEGER DEFAULT 0 CHECK (quantity >= 0),
    price REAL DEFAULT 0.0 CHECK (price >= 0),
    location TEXT
);
CREATE INDEX IF NOT EXISTS idx_inventory_product ON inventory(product);
CREATE INDEX IF NOT EXISTS idx_inventory_category ON inventory(category);
"#;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 确保数据库文件所在目录存在（best-effort）
pub fn ensure_parent_dir(db_path: &str) -> std::io::Result<()> {
    match Path::new(db_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// 判断库存表是否存在
pub fn inventory_table_exists(conn: &Connection) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='inventory'",
        [],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
