// ==========================================
// 库存管理系统 - 导出格式化工具
// ==========================================
// 职责: 货币字符串 / Excel 货币格式 / 报表文本截断
// ==========================================

/// 报表单元格最大字符数（超出部分以 "..." 标记）
pub const REPORT_TEXT_MAX_CHARS: usize = 18;

const ELLIPSIS: &str = "...";

/// 货币字符串: 1234.5 → "$1,234.50"
pub fn format_currency(value: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.00 不显示负号
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", sign, symbol, grouped, frac_part)
}

/// Excel 货币数字格式；非 "$" 符号需加引号
pub fn excel_currency_format(symbol: &str) -> String {
    if symbol == "$" {
        "$#,##0.00".to_string()
    } else {
        format!("\"{}\"#,##0.00", symbol.replace('"', ""))
    }
}

/// 按字符截断（非字节），超长追加 "..."
pub fn truncate_text(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        let head: String = value.chars().take(max_chars).collect();
        format!("{}{}", head, ELLIPSIS)
    } else {
        value.to_string()
    }
}
