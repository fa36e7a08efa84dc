// ==========================================
// 冶金产品表观需求台账 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 指标类型 (Metric Kind)
// ==========================================
// 同一 (年, 月, 产品) 下三类指标独立累加
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    Production, // 产量
    Import,     // 进口
    Export,     // 出口
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Production => "Production",
            MetricKind::Import => "Import",
            MetricKind::Export => "Export",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 报告期 (Time Period)
// ==========================================
// 顺序: 先年后月
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimePeriod {
    pub year: i32,
    pub month: u32, // 1-12
}

impl TimePeriod {
    /// 构造报告期，月份不在 1-12 时返回 None
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// 下一个月（12 月之后进位到下一年 1 月）
    pub fn next(&self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// 年份是否落在闭区间 [first, last]
    pub fn within_years(&self, first: i32, last: i32) -> bool {
        self.year >= first && self.year <= last
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
