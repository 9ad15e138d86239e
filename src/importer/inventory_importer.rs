// ==========================================
// 库存管理系统 - 库存表格导入器实现
// ==========================================
// 职责: 整合导入流程，从上传字节到数据库
// 流程: 解析 → 判空 → 表头标准化 → 补全/类型转换 → 必填校验 → 生成 ID → 落库
// 约束: 任一步骤失败则整批拒绝，不产生部分写入
// ==========================================

use crate::domain::record::{format_sequential_id, Record};
use crate::importer::column_normalizer::ColumnNormalizer;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::dq_validator::DqValidator;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::repository::InventoryRepository;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// 预览行数
pub const PREVIEW_ROWS: usize = 5;

/// 落库方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImportMode {
    /// 整表替换（默认；导入新文件会丢弃原有库存）
    #[default]
    Replace,
    /// 按 ID 合并（保留本批次未涉及的记录）
    Merge,
}

/// 导入结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,
    pub file_name: String,
    pub mode: ImportMode,
    pub started_at: DateTime<Utc>,
    /// 落库记录数
    pub records_processed: usize,
    /// 本次生成的 ID 数
    pub ids_synthesized: usize,
    /// 前 5 条预览
    pub preview: Vec<Record>,
    pub elapsed_ms: u64,
}

/// 为空 ID 的记录按输入顺序生成 PROD-NNNN
///
/// # 参数
/// - base_count: 导入开始时的库存记录数（编号从 base_count + 1 开始）
/// - reserved: 已被占用的 ID（库中已有的 ID），生成时跳过
///
/// # 返回
/// - 生成的 ID 数
///
/// 说明: 本批次中显式给出的 ID 同样视为已占用
pub fn assign_missing_ids(
    records: &mut [Record],
    base_count: usize,
    reserved: &HashSet<String>,
) -> usize {
    let mut taken: HashSet<String> = records
        .iter()
        .filter(|r| !r.id.trim().is_empty())
        .map(|r| r.id.clone())
        .collect();
    taken.extend(reserved.iter().cloned());

    let mut next = base_count + 1;
    let mut synthesized = 0;
    for record in records.iter_mut().filter(|r| r.id.trim().is_empty()) {
        let mut candidate = format_sequential_id(next);
        while taken.contains(&candidate) {
            next += 1;
            candidate = format_sequential_id(next);
        }
        next += 1;
        taken.insert(candidate.clone());
        record.id = candidate;
        synthesized += 1;
    }
    synthesized
}

// ==========================================
// InventoryImporter - 库存导入器
// ==========================================
pub struct InventoryImporter {
    repo: InventoryRepository,
    file_parser: UniversalFileParser,
    normalizer: ColumnNormalizer,
    data_cleaner: DataCleaner,
    dq_validator: DqValidator,
}

impl InventoryImporter {
    pub fn new(repo: InventoryRepository) -> Self {
        Self::with_normalizer(repo, ColumnNormalizer::new())
    }

    pub fn with_normalizer(repo: InventoryRepository, normalizer: ColumnNormalizer) -> Self {
        Self {
            repo,
            file_parser: UniversalFileParser,
            normalizer,
            data_cleaner: DataCleaner,
            dq_validator: DqValidator,
        }
    }

    /// 解析并校验，不落库
    ///
    /// # 参数
    /// - base_count: 生成 ID 的起点（当前库存记录数）
    /// - reserved: 生成 ID 时需跳过的已占用 ID
    ///
    /// # 返回
    /// - Ok((records, ids_synthesized))
    pub fn prepare(
        &self,
        bytes: &[u8],
        file_name: &str,
        base_count: usize,
        reserved: &HashSet<String>,
    ) -> ImportResult<(Vec<Record>, usize)> {
        // === 步骤 1: 解析文件 ===
        let table = self.file_parser.parse(bytes, file_name)?;
        debug!(rows = table.row_count(), columns = ?table.columns, "文件解析完成");

        // === 步骤 2: 判空 ===
        if table.is_empty() {
            warn!(file_name = %file_name, "文件无数据行");
            return Err(ImportError::EmptyInput(file_name.to_string()));
        }

        // === 步骤 3: 表头标准化 + 补全 + 类型转换 ===
        let table = self.normalizer.normalize_table(table);
        let mut records = self.data_cleaner.to_records(&table);

        // === 步骤 4: 必填校验 ===
        self.dq_validator.check(&records)?;

        // === 步骤 5: 生成 ID ===
        let synthesized = assign_missing_ids(&mut records, base_count, reserved);
        debug!(synthesized = synthesized, "ID 生成完成");

        Ok((records, synthesized))
    }

    /// 导入上传文件
    ///
    /// # 参数
    /// - bytes: 文件内容
    /// - file_name: 文件名（仅用于格式选择与诊断）
    /// - mode: 整表替换 / 合并
    ///
    /// # 返回
    /// - Ok(ImportReport): 导入结果
    /// - Err(ImportError): 任一步骤失败，数据库保持不变
    #[instrument(skip(self, bytes), fields(batch_id, size = bytes.len()))]
    pub fn import_bytes(
        &self,
        bytes: &[u8],
        file_name: &str,
        mode: ImportMode,
    ) -> ImportResult<ImportReport> {
        let start_time = Instant::now();
        let started_at = Utc::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        info!(file_name = %file_name, mode = ?mode, "开始导入库存数据");

        // 编号基准在流程开始时读取一次，批内不再重读
        let base_count = self.repo.count()?;
        // 合并模式下库中 ID 会被 upsert 覆盖，生成时必须跳过；整表替换时旧数据整体丢弃
        let reserved = match mode {
            ImportMode::Replace => HashSet::new(),
            ImportMode::Merge => self.repo.ids()?,
        };

        let (records, ids_synthesized) = self.prepare(bytes, file_name, base_count, &reserved)?;

        // === 步骤 6: 落库 ===
        let records_processed = match mode {
            ImportMode::Replace => self.repo.replace_all(&records)?,
            ImportMode::Merge => self.repo.merge_save(&records)?,
        };

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            records = records_processed,
            ids_synthesized = ids_synthesized,
            elapsed_ms = elapsed_ms,
            "导入完成"
        );

        Ok(ImportReport {
            batch_id,
            file_name: file_name.to_string(),
            mode,
            started_at,
            records_processed,
            ids_synthesized,
            preview: records.into_iter().take(PREVIEW_ROWS).collect(),
            elapsed_ms,
        })
    }
}
