// ==========================================
// 冶金产品表观需求台账 - 配置层
// ==========================================
// 职责: 流水线配置、产品分类桥接表
// 存储: JSON 配置文件（可选） + 内置缺省值
// ==========================================

pub mod config_manager;
pub mod pipeline_config;
pub mod taxonomy;

// 重导出核心配置类型
pub use config_manager::{ConfigError, ConfigManager};
pub use pipeline_config::{PipelineConfig, RegionalShareConfig};
pub use taxonomy::{clean_product_name, Taxonomy, TaxonomyEntry};
