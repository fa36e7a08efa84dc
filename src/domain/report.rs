// ==========================================
// 冶金产品表观需求台账 - 运行报告
// ==========================================
// 职责: 记录每个被跳过文件的原因 + 运行汇总
// 红线: 单个文件失败不终止整次运行
// ==========================================

use crate::domain::types::MetricKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

// ==========================================
// SkipReason - 文件级不可恢复原因
// ==========================================
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum SkipReason {
    #[error("文件不可读: {0}")]
    Unreadable(String),

    #[error("表头区域未找到报告期（年份 + 月份）")]
    NoPeriod,

    #[error("未找到含“код”的表头行")]
    NoHeader,

    #[error("未找到“тыс. тонн”数量列")]
    NoQuantityColumn,

    #[error("目录中没有可处理的源文件")]
    NoSourceFile,
}

// ==========================================
// FileDiagnostic - 跳过文件诊断
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDiagnostic {
    pub file: String,
    pub metric: MetricKind,
    pub reason: SkipReason,
}

// ==========================================
// RunReport - 运行报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub records_by_metric: BTreeMap<String, usize>, // 指标 → 原始记录条数
    pub output_rows: usize,
    pub diagnostics: Vec<FileDiagnostic>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            files_processed: 0,
            files_skipped: 0,
            records_by_metric: BTreeMap::new(),
            output_rows: 0,
            diagnostics: Vec::new(),
        }
    }

    /// 记录一个成功解析的文件
    pub fn record_processed(&mut self, metric: MetricKind, records: usize) {
        self.files_processed += 1;
        *self
            .records_by_metric
            .entry(metric.as_str().to_string())
            .or_insert(0) += records;
    }

    /// 记录一个被跳过的文件
    pub fn record_skipped(
        &mut self,
        file: impl Into<String>,
        metric: MetricKind,
        reason: SkipReason,
    ) {
        self.files_skipped += 1;
        self.diagnostics.push(FileDiagnostic {
            file: file.into(),
            metric,
            reason,
        });
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
