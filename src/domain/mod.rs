// ==========================================
// 冶金产品表观需求台账 - 领域模型层
// ==========================================
// 职责: 定义表格单元、时间周期、产品记录、台账记录
// 红线: 不含文件 I/O,不含识别逻辑
// ==========================================

pub mod grid;
pub mod record;
pub mod report;
pub mod types;

// 重导出核心类型
pub use grid::{Cell, RawGrid};
pub use record::{DemandRecord, LedgerKey, ProductRecord};
pub use report::{FileDiagnostic, RunReport, SkipReason};
pub use types::{MetricKind, TimePeriod};
