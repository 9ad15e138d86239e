// ==========================================
// 库存管理系统 - 库存台账数据仓储
// ==========================================
// 职责: inventory 表的建表/整表读取/整表替换/合并保存/清空
// 约束: 每次逻辑操作独立打开连接，用完即释放
// 约束: 写操作全部在单个事务内完成，失败整体回滚
// ==========================================

use crate::db::{ensure_parent_dir, open_sqlite_connection, INVENTORY_SCHEMA_SQL};
use crate::domain::record::Record;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Transaction};
use std::collections::HashSet;
use tracing::{debug, error, info, instrument, warn};

const SELECT_ALL_SQL: &str = r#"
    SELECT id, product, category, quantity, price, location
    FROM inventory
    ORDER BY product, id
"#;

const INSERT_SQL: &str = r#"
    INSERT INTO inventory (id, product, category, quantity, price, location)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

const UPSERT_SQL: &str = r#"
    INSERT INTO inventory (id, product, category, quantity, price, location)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    ON CONFLICT(id) DO UPDATE SET
        product = excluded.product,
        category = excluded.category,
        quantity = excluded.quantity,
        price = excluded.price,
        location = excluded.location
"#;

// ==========================================
// InventoryRepository - 库存台账仓储
// ==========================================
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    db_path: String,
}

impl InventoryRepository {
    /// 创建仓储实例（不打开连接）
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    fn open(&self) -> RepositoryResult<Connection> {
        Ok(open_sqlite_connection(&self.db_path)?)
    }

    /// 建表与索引（幂等，每次进程启动都可调用）
    ///
    /// # 返回
    /// - Err(RepositoryError::Initialization): 存储无法打开或建表失败，调用方应终止启动
    #[instrument(skip(self), fields(db_path = %self.db_path))]
    pub fn initialize(&self) -> RepositoryResult<()> {
        ensure_parent_dir(&self.db_path)
            .map_err(|e| RepositoryError::Initialization(format!("创建数据目录失败: {}", e)))?;

        let conn = open_sqlite_connection(&self.db_path)
            .map_err(|e| RepositoryError::Initialization(format!("打开数据库失败: {}", e)))?;

        conn.execute_batch(INVENTORY_SCHEMA_SQL).map_err(|e| {
            error!(error = %e, "建表失败");
            RepositoryError::Initialization(format!("建表失败: {}", e))
        })?;

        info!("库存表初始化完成");
        Ok(())
    }

    /// 读取全部记录（按产品名升序，二进制排序；同名按 ID）
    pub fn load_all(&self) -> RepositoryResult<Vec<Record>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(SELECT_ALL_SQL)?;

        let records = stmt
            .query_map([], |row| {
                Ok(Record {
                    id: row.get(0)?,
                    product: row.get(1)?,
                    category: row.get(2)?,
                    quantity: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
                    price: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
                    location: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                })
            })?
            .collect::<SqliteResult<Vec<Record>>>()?;

        debug!(count = records.len(), "读取库存记录");
        Ok(records)
    }

    /// 当前记录数
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.open()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM inventory", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// 全部已占用的 ID
    pub fn ids(&self) -> RepositoryResult<HashSet<String>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT id FROM inventory")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<SqliteResult<HashSet<String>>>()?;
        Ok(ids)
    }

    /// ID 是否已存在
    pub fn exists(&self, id: &str) -> RepositoryResult<bool> {
        let conn = self.open()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM inventory WHERE id = ?1 LIMIT 1",
                params![id],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(found)
    }

    /// 整表替换保存
    ///
    /// # 前置条件
    /// - records 非空（清空请使用 clear）
    /// - id/product/category 非空；quantity/price 非负且有限
    ///
    /// # 返回
    /// - Ok(usize): 写入的记录数
    /// - Err: 校验失败或约束违反（事务整体回滚，原数据不变）
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn replace_all(&self, records: &[Record]) -> RepositoryResult<usize> {
        if records.is_empty() {
            warn!("拒绝保存空数据集");
            return Err(RepositoryError::EmptyRecordSet);
        }
        validate_records(records)?;

        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM inventory", [])?;
        let inserted = insert_all(&tx, INSERT_SQL, records)?;
        tx.commit()?;

        info!(deleted = deleted, inserted = inserted, "整表替换完成");
        Ok(inserted)
    }

    /// 合并保存（按 ID upsert，未出现在本批次中的记录保留）
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn merge_save(&self, records: &[Record]) -> RepositoryResult<usize> {
        if records.is_empty() {
            warn!("拒绝合并空数据集");
            return Err(RepositoryError::EmptyRecordSet);
        }
        validate_records(records)?;
        ensure_unique_ids(records)?;

        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        let written = insert_all(&tx, UPSERT_SQL, records)?;
        tx.commit()?;

        info!(written = written, "合并保存完成");
        Ok(written)
    }

    /// 清空全部记录（显式入口，不受非空前置条件限制）
    #[instrument(skip(self))]
    pub fn clear(&self) -> RepositoryResult<usize> {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM inventory", [])?;
        tx.commit()?;

        info!(deleted = deleted, "库存已清空");
        Ok(deleted)
    }
}

fn insert_all(tx: &Transaction, sql: &str, records: &[Record]) -> RepositoryResult<usize> {
    let mut stmt = tx.prepare(sql)?;
    let mut count = 0;
    for r in records {
        let location = if r.location.is_empty() {
            None
        } else {
            Some(r.location.as_str())
        };
        stmt.execute(params![
            r.id,
            r.product,
            r.category,
            r.quantity,
            r.price,
            location
        ])
        .map_err(|e| {
            warn!(id = %r.id, error = %e, "写入失败，事务回滚");
            RepositoryError::from(e)
        })?;
        count += 1;
    }
    Ok(count)
}

/// 写前校验（行号从 1 开始）
///
/// 说明: 负数直接拒绝，不做修正；非数值的修正发生在导入边界
pub fn validate_records(records: &[Record]) -> RepositoryResult<()> {
    for (idx, r) in records.iter().enumerate() {
        let row = idx + 1;
        for (field, value) in [("id", &r.id), ("product", &r.product), ("category", &r.category)] {
            if value.trim().is_empty() {
                return Err(RepositoryError::MissingField {
                    row,
                    field: field.to_string(),
                });
            }
        }
        if r.quantity < 0 {
            return Err(RepositoryError::ConstraintViolation(format!(
                "第 {} 条数量为负数: {}",
                row, r.quantity
            )));
        }
        if !r.price.is_finite() || r.price < 0.0 {
            return Err(RepositoryError::ConstraintViolation(format!(
                "第 {} 条单价非法: {}",
                row, r.price
            )));
        }
    }
    Ok(())
}

// upsert 不会因批内重复 ID 报错（后者覆盖前者），这里显式拒绝
fn ensure_unique_ids(records: &[Record]) -> RepositoryResult<()> {
    let mut seen = HashSet::new();
    for r in records {
        if !seen.insert(r.id.as_str()) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "批次内 ID 重复: {}",
                r.id
            )));
        }
    }
    Ok(())
}
