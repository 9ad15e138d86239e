// ==========================================
// 库存管理系统 - 命令行入口
// ==========================================
// 职责: 参数解析 → 配置/日志初始化 → 调用 InventoryApi
// 约束: 存储初始化失败即退出（非零退出码）
// ==========================================

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use inventory_desk::api::{ExportOutcome, InventoryApi, OperationOutcome};
use inventory_desk::config::AppConfig;
use inventory_desk::domain::Record;
use inventory_desk::exporter::format_currency;
use inventory_desk::importer::ImportMode;
use inventory_desk::{logging, NewRecordForm};
use std::path::{Path, PathBuf};

/// 库存管理系统 - 表格导入 / 台账持久化 / 报表导出
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 数据库文件路径（覆盖配置）
    #[arg(long, global = true)]
    db: Option<String>,

    /// JSON 配置文件
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 初始化数据库
    Init,

    /// 列出全部记录
    List {
        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 导入 .xlsx/.xls/.csv 文件（默认整表替换）
    Import {
        file: PathBuf,

        /// 按 ID 合并，保留文件中未出现的记录
        #[arg(long)]
        merge: bool,
    },

    /// 新增单条记录
    Add {
        /// 缺省时使用建议 ID
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        product: String,
        #[arg(long)]
        category: String,
        #[arg(long, default_value_t = 0)]
        quantity: i64,
        #[arg(long, default_value_t = 0.0)]
        price: f64,
        #[arg(long, default_value = "")]
        location: String,
    },

    /// 导出 Excel
    ExportXlsx { out: PathBuf },

    /// 导出 PDF 报表
    ExportPdf { out: PathBuf },

    /// 删除全部数据
    Clear {
        /// 确认删除
        #[arg(long)]
        yes: bool,
    },

    /// 库存统计
    Summary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("加载配置失败")?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    logging::init(&config.log_level, config.log_json);
    tracing::info!(version = inventory_desk::VERSION, db_path = %config.db_path, "{}", inventory_desk::APP_NAME);

    let api = InventoryApi::new(config);
    api.initialize().context("无法初始化数据库")?;

    match cli.command {
        Command::Init => {
            println!("数据库已就绪: {}", api.config().db_path);
        }
        Command::List { json } => {
            let records = load(&api)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print_table(&records, &api.config().currency_symbol);
            }
        }
        Command::Import { file, merge } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("无法读取文件: {}", file.display()))?;
            let file_name = file_name_of(&file);
            let mode = if merge {
                ImportMode::Merge
            } else {
                ImportMode::Replace
            };

            let outcome = api.import_upload(&bytes, &file_name, mode);
            if !outcome.success {
                bail!(outcome.message);
            }
            println!("{}", outcome.message);
            if let Some(report) = outcome.report {
                print_table(&report.preview, &api.config().currency_symbol);
            }
        }
        Command::Add {
            id,
            product,
            category,
            quantity,
            price,
            location,
        } => {
            let current = load(&api)?;
            let form = NewRecordForm {
                id: id.unwrap_or_else(|| api.suggest_next_id(&current)),
                product,
                category,
                quantity,
                price,
                location,
            };
            report(api.add_record(&current, form))?;
        }
        Command::ExportXlsx { out } => {
            let records = load(&api)?;
            write_export(api.export_spreadsheet(&records), &out)?;
        }
        Command::ExportPdf { out } => {
            let records = load(&api)?;
            write_export(api.export_report(&records), &out)?;
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("将删除全部数据且无法撤销；确认请加 --yes");
            }
            report(api.clear())?;
        }
        Command::Summary => {
            let records = load(&api)?;
            let summary = api.summary(&records);
            let symbol = &api.config().currency_symbol;

            println!("产品数: {}", summary.total_products);
            println!("总数量: {}", summary.total_units);
            println!("总货值: {}", format_currency(summary.total_value, symbol));
            println!("类别数: {}", summary.distinct_categories);
            for c in &summary.by_category {
                println!("  {:<20} {}", c.category, c.count);
            }
            if !summary.low_stock.is_empty() {
                println!("低库存:");
                for item in &summary.low_stock {
                    println!("  {:<30} {:>6} {}", item.product, item.quantity, item.location);
                }
            }
        }
    }

    Ok(())
}

fn load(api: &InventoryApi) -> Result<Vec<Record>> {
    let snapshot = api.load_all();
    match snapshot.error {
        Some(e) => bail!(e),
        None => Ok(snapshot.records),
    }
}

fn report(outcome: OperationOutcome) -> Result<()> {
    if !outcome.success {
        bail!(outcome.message);
    }
    println!("{}", outcome.message);
    Ok(())
}

fn write_export(outcome: ExportOutcome, out: &Path) -> Result<()> {
    match (outcome.bytes, outcome.error) {
        (Some(bytes), _) => {
            std::fs::write(out, &bytes)
                .with_context(|| format!("无法写入文件: {}", out.display()))?;
            println!("已导出: {} ({} 字节)", out.display(), bytes.len());
            Ok(())
        }
        (None, Some(e)) => bail!(e),
        (None, None) => bail!("导出失败"),
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_table(records: &[Record], symbol: &str) {
    println!(
        "{:<12} {:<30} {:<16} {:>8} {:>14} {:<12}",
        "ID", "Producto", "Categoría", "Cantidad", "Precio", "Ubicación"
    );
    for r in records {
        println!(
            "{:<12} {:<30} {:<16} {:>8} {:>14} {:<12}",
            r.id,
            r.product,
            r.category,
            r.quantity,
            format_currency(r.price, symbol),
            r.location
        );
    }
}
