// ==========================================
// 冶金产品表观需求台账 - ТН ВЭД 编码分类引擎
// ==========================================
// 判定顺序:
// 1. 含括号或 “кроме” → 明确排除的子项，不匹配
// 2. 严格 “DDDD-DDDD” 区间 → 目标前缀前 4 位落在区间内即匹配
// 3. 其余 → 仅保留数字；不足 2 位不是编码；否则按前缀匹配
// 红线: 不假设一个编码只属于一个产品
// ==========================================

use crate::config::taxonomy::{Taxonomy, TaxonomyEntry};
use regex::Regex;
use std::sync::LazyLock;

static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})\s*-\s*([0-9]{4})$").expect("编码区间正则无效")
});

const EXCEPT_MARKER: &str = "кроме";

/// 编码单元格的解析形态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeForm {
    /// 带括号/“кроме”的限定子项
    Excluded,
    /// 4 位编码区间（闭区间）
    Range { start: u32, end: u32 },
    /// 清洗后的数字串
    Digits(String),
    /// 数字不足 2 位
    NotACode,
}

impl CodeForm {
    /// 解析单元格文本
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.contains('(') || raw.contains(')') || raw.to_lowercase().contains(EXCEPT_MARKER) {
            return CodeForm::Excluded;
        }

        if let Some(caps) = RANGE_PATTERN.captures(raw) {
            let bounds = (caps[1].parse::<u32>(), caps[2].parse::<u32>());
            if let (Ok(start), Ok(end)) = bounds {
                return CodeForm::Range { start, end };
            }
        }

        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() < 2 {
            CodeForm::NotACode
        } else {
            CodeForm::Digits(digits)
        }
    }

    /// 是否匹配某个目标前缀
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        match self {
            CodeForm::Excluded | CodeForm::NotACode => false,
            CodeForm::Range { start, end } => leading_four(prefix)
                .map(|head| *start <= head && head <= *end)
                .unwrap_or(false),
            CodeForm::Digits(digits) => digits.starts_with(prefix),
        }
    }

    /// 是否匹配前缀集合中的任意一个
    pub fn matches_any<S: AsRef<str>>(&self, prefixes: &[S]) -> bool {
        prefixes.iter().any(|p| self.matches_prefix(p.as_ref()))
    }
}

/// 前缀前 4 位数值（前缀不足 4 位或含非数字时为 None）
fn leading_four(prefix: &str) -> Option<u32> {
    if prefix.len() < 4 || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    prefix[..4].parse().ok()
}

/// 单元格编码是否匹配前缀列表
pub fn is_code_match<S: AsRef<str>>(code_text: &str, prefixes: &[S]) -> bool {
    CodeForm::parse(code_text).matches_any(prefixes)
}

// ==========================================
// CodeClassifier - 编码 → 产品
// ==========================================
pub struct CodeClassifier<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> CodeClassifier<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// 返回所有匹配的分类条目（按分类表声明顺序）
    pub fn classify(&self, code_text: &str) -> Vec<&'a TaxonomyEntry> {
        let form = CodeForm::parse(code_text);
        match form {
            CodeForm::Excluded | CodeForm::NotACode => Vec::new(),
            _ => self
                .taxonomy
                .iter()
                .filter(|entry| form.matches_any(&entry.code_prefixes))
                .collect(),
        }
    }
}
