// ==========================================
// 冶金产品表观需求台账 - 表头定位引擎
// ==========================================
// 规则: 同一行同时出现 “код” 与（“тн”+“вэд” 或 “наименование”）
// 顺序: 最早满足条件的行即表头行
// ==========================================

use crate::domain::grid::{Cell, RawGrid};
use serde::{Deserialize, Serialize};

const CODE_MARKER: &str = "код";
const NAME_MARKER: &str = "наименование";

/// 表头位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderLocation {
    pub row_index: usize,
    pub code_column: usize,
}

// ==========================================
// HeaderLocator - 表头定位
// ==========================================
pub struct HeaderLocator {
    scan_rows: usize,
}

impl HeaderLocator {
    pub fn new(scan_rows: usize) -> Self {
        Self { scan_rows }
    }

    /// 在前 scan_rows 行中定位表头行与编码列
    ///
    /// # 返回
    /// - Some(HeaderLocation): 表头行号 + 第一个含 “код” 的列
    /// - None: 窗口内无满足条件的行（调用方跳过文件）
    pub fn locate(&self, grid: &RawGrid) -> Option<HeaderLocation> {
        grid.rows()
            .take(self.scan_rows)
            .enumerate()
            .find_map(|(row_index, row)| {
                let cells: Vec<String> = row.iter().map(Cell::lower_text).collect();
                if !is_header_row(&cells) {
                    return None;
                }
                let code_column = cells.iter().position(|s| s.contains(CODE_MARKER))?;
                Some(HeaderLocation {
                    row_index,
                    code_column,
                })
            })
    }
}

impl Default for HeaderLocator {
    fn default() -> Self {
        Self::new(40)
    }
}

fn is_header_row(cells: &[String]) -> bool {
    let has_code = cells.iter().any(|s| s.contains(CODE_MARKER));
    let has_tn_ved = cells.iter().any(|s| s.contains("тн") && s.contains("вэд"));
    let has_name = cells.iter().any(|s| s.contains(NAME_MARKER));
    has_code && (has_tn_ved || has_name)
}
