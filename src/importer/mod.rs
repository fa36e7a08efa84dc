// ==========================================
// 冶金产品表观需求台账 - 导入层
// ==========================================
// 职责: 源文件发现 + 文件 → RawGrid
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod grid_loader_trait;
pub mod source_discovery;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvGridLoader, ExcelGridLoader, UniversalGridLoader};
pub use grid_loader_trait::{GridLoader, SheetSelector};
pub use source_discovery::{discover_first, discover_spreadsheets};
