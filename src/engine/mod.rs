// ==========================================
// 冶金产品表观需求台账 - 引擎层
// ==========================================
// 职责: 无固定结构表格的启发式识别 + 编码分类 + 台账合并
// 红线: 引擎只读 RawGrid，不做文件 IO
//       识别失败返回 SkipReason / None，不 panic
// ==========================================

pub mod code_classifier;
pub mod customs_parser;
pub mod header_locator;
pub mod ledger;
pub mod period_extractor;
pub mod production_parser;
pub mod quantity_column;
pub mod regional_share;

// 重导出核心引擎
pub use code_classifier::{is_code_match, CodeClassifier, CodeForm};
pub use customs_parser::{CustomsLayout, CustomsTableParser};
pub use header_locator::{HeaderLocation, HeaderLocator};
pub use ledger::{apparent_demand, combine_same_metric, LedgerMerger, MetricSeries};
pub use period_extractor::{extract_period_from_text, PeriodExtractor};
pub use production_parser::{ProductionAnchor, ProductionTableParser};
pub use quantity_column::{is_thousand_tonne_header, QuantityColumnSelector};
pub use regional_share::{RegionRow, RegionalShareEngine, RegionalShareTable};
