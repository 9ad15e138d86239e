// ==========================================
// 库存管理系统 - 文件解析器实现
// ==========================================
// 职责: 上传字节 → 无类型表格（首个工作表，首行为表头）
// 支持: Excel (.xlsx/.xls，自动识别) / CSV (.csv)
// ==========================================

use crate::domain::schema::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto_from_rs, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: ExcelParser, CsvParser
pub trait FileParser: Send + Sync {
    /// 解析字节为无类型表格
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 数据行（已跳过完全空白的行）
    /// - Err(ImportError::Parse): 非可识别格式
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawTable>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawTable> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: Vec<String> = record.iter().map(|v| v.to_string()).collect();
            push_non_blank(&mut rows, row);
        }

        Ok(RawTable::new(headers, rows))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawTable> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::parse("workbook", "Excel 文件无工作表"))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 空工作表按“零行”处理，由调用方判定为空输入
        let mut rows_iter = range.rows();
        let headers: Vec<String> = match rows_iter.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect(),
            None => return Ok(RawTable::default()),
        };

        let mut rows = Vec::new();
        for data_row in rows_iter {
            let row: Vec<String> = data_row.iter().map(|cell| cell.to_string()).collect();
            push_non_blank(&mut rows, row);
        }

        Ok(RawTable::new(headers, rows))
    }
}

// 跳过完全空白的行；单元格文本原样保留，仅表头去空白
fn push_non_blank(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if row.iter().any(|v| !v.trim().is_empty()) {
        rows.push(row);
    }
}

// ==========================================
// 通用文件解析器（根据文件名选择）
// ==========================================
// 工作簿格式交给 calamine 按内容自动识别；无扩展名按工作簿处理
pub struct UniversalFileParser;

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xls", "xlsm", "xlsb", "ods"];

impl UniversalFileParser {
    pub fn parse(&self, bytes: &[u8], file_name: &str) -> ImportResult<RawTable> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let result = match ext.as_str() {
            "csv" => CsvParser.parse_bytes(bytes),
            "" => ExcelParser.parse_bytes(bytes),
            e if WORKBOOK_EXTENSIONS.contains(&e) => ExcelParser.parse_bytes(bytes),
            _ => return Err(ImportError::UnsupportedFormat(file_name.to_string())),
        };

        // 补充文件名以便诊断
        result.map_err(|e| match e {
            ImportError::Parse { message, .. } => ImportError::parse(file_name, message),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_parser_valid_bytes() {
        let data = "Producto,Cantidad,Precio\nMartillo,3,2.5\nSierra, 4 ,10\n";
        let table = CsvParser.parse_bytes(data.as_bytes()).unwrap();

        assert_eq!(table.columns, vec!["Producto", "Cantidad", "Precio"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, 1), " 4 ");
    }

    #[test]
    fn test_csv_parser_skip_empty_rows_and_bom() {
        let data = "\u{feff}Producto,Cantidad\nA,1\n , \nB,2\n";
        let table = CsvParser.parse_bytes(data.as_bytes()).unwrap();

        assert_eq!(table.columns[0], "Producto");
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_excel_parser_rejects_garbage() {
        let result = ExcelParser.parse_bytes(b"definitely not a workbook");
        assert!(matches!(result, Err(ImportError::Parse { .. })));
    }

    #[test]
    fn test_universal_parser_reports_file_name() {
        let err = UniversalFileParser
            .parse(b"garbage", "stock.xlsx")
            .unwrap_err();
        assert!(matches!(err, ImportError::Parse { ref file, .. } if file == "stock.xlsx"));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let err = UniversalFileParser
            .parse(b"Producto\nMartillo\n", "notas.txt")
            .unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(ref f) if f == "notas.txt"));
    }

    #[test]
    fn test_excel_parser_reads_first_sheet() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Producto").unwrap();
        sheet.write_string(0, 1, "Cantidad").unwrap();
        sheet.write_string(1, 0, "Martillo").unwrap();
        sheet.write_number(1, 1, 3.0).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = ExcelParser.parse_bytes(&bytes).unwrap();

        assert_eq!(table.columns, vec!["Producto", "Cantidad"]);
        assert_eq!(table.rows, vec![vec!["Martillo".to_string(), "3".to_string()]]);
    }
}
