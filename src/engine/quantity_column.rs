// ==========================================
// 冶金产品表观需求台账 - 数量列选择引擎
// ==========================================
// 输入: 网格 + 表头行号
// 规则: 表头行及其下方两行合并文本须同时含“тыс”与吨位标记，
//       且不含货币/价格/百分比/增速/百万等词
// 顺序: 多个候选列时取最右一列
// ==========================================

use crate::domain::grid::RawGrid;
use regex::Regex;
use std::sync::LazyLock;

const THOUSAND_MARKER: &str = "тыс";

/// 禁用词（优先于吨位标记）
const DISALLOWED_MARKERS: &[&str] = &[
    "долл", "usd", "руб", "стоим", "цена", "%", "темп", "рост", "млн",
];

// 独立的 “т” / “т.” 记号
static TONNE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)т(\.|\s|$)").expect("吨位记号正则无效"));

// 数字紧跟 “т” 结尾（“1000 т”）
static TONNE_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d\s*т$").expect("吨位结尾正则无效"));

// ==========================================
// QuantityColumnSelector - 数量列选择
// ==========================================
pub struct QuantityColumnSelector {
    header_depth: usize,
}

impl QuantityColumnSelector {
    /// # 参数
    /// - header_depth: 合并的表头行数（含表头行本身）
    pub fn new(header_depth: usize) -> Self {
        Self { header_depth }
    }

    /// 选择“千吨”数量列
    ///
    /// # 返回
    /// - Some(col): 最右侧的候选列
    /// - None: 无候选列（调用方跳过文件）
    pub fn select(&self, grid: &RawGrid, header_row: usize) -> Option<usize> {
        (0..grid.column_count())
            .filter(|&col| {
                is_thousand_tonne_header(&self.column_header_text(grid, header_row, col))
            })
            .last()
    }

    /// 某列表头区域的合并文本（小写，每段前加空格）
    pub fn column_header_text(&self, grid: &RawGrid, header_row: usize, col: usize) -> String {
        let mut text = String::new();
        for row in header_row..header_row.saturating_add(self.header_depth) {
            if row >= grid.row_count() {
                break;
            }
            let cell = grid.cell(row, col);
            if !cell.is_empty() {
                text.push(' ');
                text.push_str(&cell.lower_text());
            }
        }
        text
    }
}

impl Default for QuantityColumnSelector {
    fn default() -> Self {
        Self::new(3)
    }
}

/// 表头文本是否表示“千吨”
pub fn is_thousand_tonne_header(text: &str) -> bool {
    let text = text.to_lowercase();
    let has_thousand = text.contains(THOUSAND_MARKER);
    let has_tonne =
        text.contains("тонн") || TONNE_TOKEN.is_match(&text) || TONNE_TAIL.is_match(&text);
    let disallowed = DISALLOWED_MARKERS.iter().any(|m| text.contains(m));
    has_thousand && has_tonne && !disallowed
}
