// ==========================================
// 冶金产品表观需求台账 - 表格网格模型
// ==========================================
// 职责: 原始单元格值 + 矩形网格
// 来源: 文件加载器（Excel/CSV），识别引擎只读
// ==========================================

use serde::{Deserialize, Serialize};

/// 表示“缺失”的文本标记（区分缺失与 0）
pub const NULL_MARKERS: &[&str] = &["-", "", "nan", "None", "...", "…"];

static EMPTY_CELL: Cell = Cell::Empty;

// ==========================================
// Cell - 原始单元格
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// 由文本构造：空白文本视为 Empty
    pub fn text<S: Into<String>>(value: S) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// 单元格文本表示
    ///
    /// - Empty → ""
    /// - 整数值的浮点数不带 ".0"（7208.0 → "7208"）
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
        }
    }

    /// 小写文本（表头识别统一使用）
    pub fn lower_text(&self) -> String {
        self.to_text().to_lowercase()
    }

    /// 转换为数值（全函数，不抛错）
    ///
    /// # 规则
    /// - 去除不换行空格与普通空格
    /// - 逗号小数点 → 点（"12,5" → 12.5）
    /// - 缺失标记（"-", "...", "nan" 等）→ None
    /// - 非有限值（NaN/inf）→ None
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Number(_) => None,
            Cell::Text(s) => parse_decimal(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// 解析带逗号小数点/千分位空格的数值文本
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if NULL_MARKERS.contains(&trimmed) {
        return None;
    }

    let normalized: String = trimmed
        .chars()
        .filter(|c| *c != '\u{a0}' && *c != ' ')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

// ==========================================
// RawGrid - 矩形网格
// ==========================================
// 不变量: 每行长度 == width（加载时右侧补 Empty）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGrid {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl RawGrid {
    pub fn new(mut rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, Cell::Empty);
        }
        Self { rows, width }
    }

    /// 由字符串矩阵构造（空字符串 → Empty）
    pub fn from_strings<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|s| Cell::text(s.as_ref())).collect())
            .collect();
        Self::new(rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.width == 0
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    /// 越界访问返回 Empty
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// 前 n 行（不足 n 行时返回全部）
    pub fn head(&self, n: usize) -> &[Vec<Cell>] {
        &self.rows[..n.min(self.rows.len())]
    }
}
