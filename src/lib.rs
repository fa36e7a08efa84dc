// ==========================================
// 冶金产品表观需求台账 - 核心库
// ==========================================
// 输入: 海关进出口表 + 产量表（无固定结构的电子表格）
// 输出: 按 (年, 月, 产品) 的产量/进口/出口/表观需求台账
// 系统定位: 启发式表格识别 + 编码分类 + 台账合并
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值类型
pub mod domain;

// 配置层 - 分类表与运行参数
pub mod config;

// 导入层 - 源文件发现与加载
pub mod importer;

// 引擎层 - 表格识别与台账合并
pub mod engine;

// 主流程
pub mod pipeline;

// 输出层
pub mod output;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Cell, DemandRecord, FileDiagnostic, LedgerKey, MetricKind, ProductRecord, RawGrid, RunReport,
    SkipReason, TimePeriod,
};

// 配置
pub use config::{ConfigError, ConfigManager, PipelineConfig, Taxonomy, TaxonomyEntry};

// 导入
pub use importer::{GridLoader, ImportError, SheetSelector, UniversalGridLoader};

// 引擎
pub use engine::{
    CodeClassifier, CustomsTableParser, HeaderLocator, LedgerMerger, PeriodExtractor,
    ProductionTableParser, QuantityColumnSelector, RegionalShareEngine,
};

// 主流程
pub use pipeline::{DemandPipeline, PipelineOutcome};

// 输出
pub use output::{DemandTableWriter, OutputError, RegionalShareWriter};

// ==========================================
// 版本信息
// ==========================================
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "冶金产品表观需求台账";
