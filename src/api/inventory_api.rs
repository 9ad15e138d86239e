// ==========================================
// 库存管理系统 - 库存业务 API
// ==========================================
// 职责: 串联仓储 / 导入 / 导出，向界面层返回结果值
// 约束: 调用方显式传入当前记录集；每次写操作成功后需重新 load_all
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::EntryValidator;
use crate::config::AppConfig;
use crate::domain::record::{format_sequential_id, NewRecordForm, Record};
use crate::domain::summary::InventorySummary;
use crate::exporter::{export_pdf, export_xlsx};
use crate::importer::{ImportMode, ImportReport, InventoryImporter};
use crate::repository::InventoryRepository;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

// ==========================================
// 结果值类型
// ==========================================

/// 写操作结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationOutcome {
    pub success: bool,
    pub message: String,
    /// 受影响记录数
    pub affected: usize,
}

impl OperationOutcome {
    fn ok(message: impl Into<String>, affected: usize) -> Self {
        Self {
            success: true,
            message: message.into(),
            affected,
        }
    }

    fn failed(err: &ApiError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            affected: 0,
        }
    }
}

/// 读取结果（失败时 records 为空，error 为消息）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub records: Vec<Record>,
    pub error: Option<String>,
}

/// 导入结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub message: String,
    pub records_processed: usize,
    pub report: Option<ImportReport>,
}

/// 导出结果（失败时无字节）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportOutcome {
    pub bytes: Option<Vec<u8>>,
    pub error: Option<String>,
}

impl From<ApiResult<Vec<u8>>> for ExportOutcome {
    fn from(result: ApiResult<Vec<u8>>) -> Self {
        match result {
            Ok(bytes) => Self {
                bytes: Some(bytes),
                error: None,
            },
            Err(e) => Self {
                bytes: None,
                error: Some(e.to_string()),
            },
        }
    }
}

// ==========================================
// InventoryApi - 库存业务 API
// ==========================================
pub struct InventoryApi {
    config: AppConfig,
    repo: InventoryRepository,
}

impl InventoryApi {
    pub fn new(config: AppConfig) -> Self {
        let repo = InventoryRepository::new(config.db_path.clone());
        Self { config, repo }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 初始化存储（失败为致命错误，调用方应终止）
    pub fn initialize(&self) -> ApiResult<()> {
        self.repo.initialize().map_err(|e| {
            error!(error = %e, db_path = %self.repo.db_path(), "数据库初始化失败");
            ApiError::from(e)
        })
    }

    /// 读取全部记录
    pub fn load_all(&self) -> InventorySnapshot {
        match self.repo.load_all() {
            Ok(records) => InventorySnapshot {
                records,
                error: None,
            },
            Err(e) => {
                error!(error = %e, "读取库存失败");
                InventorySnapshot {
                    records: Vec::new(),
                    error: Some(ApiError::from(e).to_string()),
                }
            }
        }
    }

    /// 整表保存（替换全部记录）
    pub fn save_all(&self, records: &[Record]) -> OperationOutcome {
        outcome(
            self.repo.replace_all(records).map_err(ApiError::from),
            |n| format!("已保存 {} 条记录", n),
        )
    }

    /// 按 ID 合并保存
    pub fn merge_save(&self, records: &[Record]) -> OperationOutcome {
        outcome(
            self.repo.merge_save(records).map_err(ApiError::from),
            |n| format!("已合并 {} 条记录", n),
        )
    }

    /// 清空库存（显式操作，与空集保存区分）
    pub fn clear(&self) -> OperationOutcome {
        outcome(self.repo.clear().map_err(ApiError::from), |n| {
            format!("已删除全部数据（{} 条）", n)
        })
    }

    /// 单条录入
    ///
    /// # 参数
    /// - current: 当前记录集（录入后整表保存 current + 新记录）
    /// - form: 录入表单
    #[instrument(skip(self, current, form), fields(current = current.len()))]
    pub fn add_record(&self, current: &[Record], form: NewRecordForm) -> OperationOutcome {
        let result = EntryValidator::validate(form, current).and_then(|record| {
            let id = record.id.clone();
            let mut all = current.to_vec();
            all.push(record);
            self.repo.replace_all(&all)?;
            Ok(id)
        });

        match result {
            Ok(id) => {
                info!(id = %id, "新增记录");
                OperationOutcome::ok(format!("产品 {} 已添加", id), 1)
            }
            Err(e) => {
                warn!(error = %e, "新增记录被拒绝");
                OperationOutcome::failed(&e)
            }
        }
    }

    /// 建议的下一个 ID: PROD-{当前条数+1}
    pub fn suggest_next_id(&self, current: &[Record]) -> String {
        format_sequential_id(current.len() + 1)
    }

    /// 导入上传文件
    pub fn import_upload(&self, bytes: &[u8], file_name: &str, mode: ImportMode) -> ImportOutcome {
        let importer = InventoryImporter::new(self.repo.clone());

        match importer.import_bytes(bytes, file_name, mode) {
            Ok(report) => ImportOutcome {
                success: true,
                message: format!("文件导入成功（{} 条记录）", report.records_processed),
                records_processed: report.records_processed,
                report: Some(report),
            },
            Err(e) => {
                let err = ApiError::from(e);
                if err.is_warning() {
                    warn!(file_name = %file_name, error = %err, "导入未执行");
                } else {
                    error!(file_name = %file_name, error = %err, "导入失败");
                }
                ImportOutcome {
                    success: false,
                    message: err.to_string(),
                    records_processed: 0,
                    report: None,
                }
            }
        }
    }

    /// 导出 .xlsx
    pub fn export_spreadsheet(&self, records: &[Record]) -> ExportOutcome {
        export_xlsx(records, &self.config.xlsx_options())
            .map_err(ApiError::from)
            .into()
    }

    /// 导出 PDF 报表
    pub fn export_report(&self, records: &[Record]) -> ExportOutcome {
        export_pdf(records, &self.config.report_options())
            .map_err(ApiError::from)
            .into()
    }

    /// 库存统计
    pub fn summary(&self, records: &[Record]) -> InventorySummary {
        InventorySummary::compute(records, self.config.low_stock_threshold)
    }
}

fn outcome(result: ApiResult<usize>, message: impl FnOnce(usize) -> String) -> OperationOutcome {
    match result {
        Ok(n) => OperationOutcome::ok(message(n), n),
        Err(e) => {
            if e.is_warning() {
                warn!(error = %e, "操作未执行");
            } else {
                error!(error = %e, "操作失败");
            }
            OperationOutcome::failed(&e)
        }
    }
}
