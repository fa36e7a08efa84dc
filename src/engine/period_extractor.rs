// ==========================================
// 冶金产品表观需求台账 - 报告期识别引擎
// ==========================================
// 输入: 网格前若干行（表头区域）
// 输出: (年, 月)；任一缺失则文件不可定期
// 规则: 年份、月份各自取“最后一次出现”
// ==========================================

use crate::domain::grid::RawGrid;
use crate::domain::types::TimePeriod;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

// 2017-2029，不要求词边界
static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20(1[7-9]|2[0-9])").expect("年份正则无效"));

/// 俄文月份（主格 + 属格）
const MONTHS_RU: &[(&str, u32)] = &[
    ("январь", 1),
    ("января", 1),
    ("февраль", 2),
    ("февраля", 2),
    ("март", 3),
    ("марта", 3),
    ("апрель", 4),
    ("апреля", 4),
    ("май", 5),
    ("мая", 5),
    ("июнь", 6),
    ("июня", 6),
    ("июль", 7),
    ("июля", 7),
    ("август", 8),
    ("августа", 8),
    ("сентябрь", 9),
    ("сентября", 9),
    ("октябрь", 10),
    ("октября", 10),
    ("ноябрь", 11),
    ("ноября", 11),
    ("декабрь", 12),
    ("декабря", 12),
];

// ==========================================
// PeriodExtractor - 报告期识别
// ==========================================
pub struct PeriodExtractor {
    scan_rows: usize,
}

impl PeriodExtractor {
    pub fn new(scan_rows: usize) -> Self {
        Self { scan_rows }
    }

    /// 从网格表头区域识别报告期
    pub fn extract(&self, grid: &RawGrid) -> Option<TimePeriod> {
        let blob = header_text_blob(grid, self.scan_rows);
        let period = extract_period_from_text(&blob);
        trace!(chars = blob.len(), ?period, "报告期识别");
        period
    }
}

impl Default for PeriodExtractor {
    fn default() -> Self {
        Self::new(20)
    }
}

/// 拼接表头区域文本（小写）
///
/// 按列读取：先第 0 列自上而下，再第 1 列……；空单元格跳过
pub fn header_text_blob(grid: &RawGrid, scan_rows: usize) -> String {
    let head = grid.head(scan_rows);
    let mut parts = Vec::new();
    for col in 0..grid.column_count() {
        for row in head {
            if let Some(cell) = row.get(col) {
                if !cell.is_empty() {
                    parts.push(cell.to_text());
                }
            }
        }
    }
    parts.join(" ").to_lowercase()
}

/// 从自由文本中识别报告期
pub fn extract_period_from_text(text: &str) -> Option<TimePeriod> {
    let lowered = text.to_lowercase();
    let year = find_last_year(&lowered)?;
    let month = find_last_month(&lowered)?;
    TimePeriod::new(year, month)
}

/// 最后一个 2017-2029 年份
pub fn find_last_year(text: &str) -> Option<i32> {
    YEAR_PATTERN
        .find_iter(text)
        .last()
        .and_then(|m| m.as_str().parse().ok())
}

/// 最后一个月份词（按非单词字符切分）
pub fn find_last_month(text: &str) -> Option<u32> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter_map(month_from_token)
        .last()
}

fn month_from_token(token: &str) -> Option<u32> {
    MONTHS_RU
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, month)| *month)
}
