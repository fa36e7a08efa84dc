// ==========================================
// 冶金产品表观需求台账 - 输出层
// ==========================================
// 职责: 需求台账 CSV / 地区占比 CSV / 运行报告 JSON
// ==========================================

pub mod csv_writer;
pub mod report_writer;

use std::path::PathBuf;
use thiserror::Error;

/// 输出层错误类型
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("写入文件失败 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;

// 重导出核心类型
pub use csv_writer::{DemandTableWriter, RegionalShareWriter, DEMAND_COLUMNS};
pub use report_writer::write_report_json;
