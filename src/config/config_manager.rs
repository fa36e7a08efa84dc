// ==========================================
// 冶金产品表观需求台账 - 配置管理器
// ==========================================
// 职责: 配置加载（JSON 文件 + 缺省值）、校验、分类表装载
// 覆写顺序: 缺省值 < 配置文件 < 命令行参数
// ==========================================

use crate::config::pipeline_config::PipelineConfig;
use crate::config::taxonomy::{Taxonomy, TaxonomyEntry};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败 ({path}): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置值无效: {0}")]
    Invalid(String),
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: PipelineConfig,
    taxonomy: Taxonomy,
}

impl ConfigManager {
    /// 由已有配置构造（会执行校验）
    pub fn new(config: PipelineConfig, taxonomy: Taxonomy) -> Result<Self, ConfigError> {
        validate(&config)?;
        Ok(Self { config, taxonomy })
    }

    /// 加载配置
    ///
    /// # 参数
    /// - path: JSON 配置文件；None 时使用缺省配置
    ///
    /// # 返回
    /// - Ok(ConfigManager): 配置 + 分类表（外部分类表优先）
    /// - Err: 文件不可读、JSON 无效、取值越界
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(p) => {
                info!(path = %p.display(), "加载配置文件");
                read_json::<PipelineConfig>(p)?
            }
            None => {
                debug!("未指定配置文件，使用缺省配置");
                PipelineConfig::default()
            }
        };

        let taxonomy = match &config.taxonomy_file {
            Some(p) => {
                info!(path = %p.display(), "加载外部分类表");
                Taxonomy::from_entries(read_json::<Vec<TaxonomyEntry>>(p)?)?
            }
            None => Taxonomy::builtin(),
        };

        Self::new(config, taxonomy)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PipelineConfig {
        &mut self.config
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// 配置快照（JSON），写入日志便于复现
    pub fn snapshot_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(&self.config)
            .map_err(|e| ConfigError::Invalid(format!("配置序列化失败: {}", e)))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

const MAX_REGIONAL_YEARS: usize = 100;

/// 校验配置取值
pub fn validate(config: &PipelineConfig) -> Result<(), ConfigError> {
    if config.first_year > config.last_year {
        return Err(ConfigError::Invalid(format!(
            "年份区间倒置: {} > {}",
            config.first_year, config.last_year
        )));
    }
    if config.period_scan_rows == 0
        || config.header_scan_rows == 0
        || config.quantity_header_depth == 0
        || config.production_anchor_scan_rows == 0
    {
        return Err(ConfigError::Invalid("扫描行数必须大于 0".to_string()));
    }
    if !(1..=12).contains(&config.production_start_month) {
        return Err(ConfigError::Invalid(format!(
            "产量表起始月份无效: {}",
            config.production_start_month
        )));
    }
    if config.production_start_year > config.production_last_year {
        return Err(ConfigError::Invalid(format!(
            "产量表年份区间倒置: {} > {}",
            config.production_start_year, config.production_last_year
        )));
    }
    if !(config.production_scale.is_finite() && config.production_scale > 0.0) {
        return Err(ConfigError::Invalid(format!(
            "产量值除数必须为正数: {}",
            config.production_scale
        )));
    }
    if config.production_anchors.iter().all(|a| a.trim().is_empty()) {
        return Err(ConfigError::Invalid("产量表锚点为空".to_string()));
    }
    if config.quantity_header_depth > config.header_scan_rows {
        return Err(ConfigError::Invalid(format!(
            "数量列表头行数超过表头扫描窗口: {} > {}",
            config.quantity_header_depth, config.header_scan_rows
        )));
    }
    if config.regional.year_count == 0 || config.regional.year_count > MAX_REGIONAL_YEARS {
        return Err(ConfigError::Invalid(format!(
            "地区表年份数必须在 1-{} 之间: {}",
            MAX_REGIONAL_YEARS, config.regional.year_count
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_defaults() {
        let manager = ConfigManager::load(None).unwrap();
        assert_eq!(manager.config().header_scan_rows, 40);
        assert_eq!(manager.config().period_scan_rows, 20);
        assert_eq!(manager.config().first_year, 2017);
        assert_eq!(manager.config().last_year, 2024);
        assert_eq!(manager.taxonomy().len(), 8);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "data_dir": "/tmp/metal", "last_year": 2023 }}"#).unwrap();

        let manager = ConfigManager::load(Some(file.path())).unwrap();
        assert_eq!(manager.config().data_dir, PathBuf::from("/tmp/metal"));
        assert_eq!(manager.config().last_year, 2023);
        assert_eq!(manager.config().header_scan_rows, 40);
        assert_eq!(manager.config().import_path(), PathBuf::from("/tmp/metal/import"));
    }

    #[test]
    fn test_load_external_taxonomy() {
        let mut taxonomy_file = NamedTempFile::new().unwrap();
        writeln!(
            taxonomy_file,
            r#"[{{ "product_name": "Ферросплавы, тыс.т", "code_prefixes": ["7202"] }}]"#
        )
        .unwrap();

        let mut config_file = NamedTempFile::new().unwrap();
        let body = serde_json::json!({ "taxonomy_file": taxonomy_file.path() });
        write!(config_file, "{}", body).unwrap();

        let manager = ConfigManager::load(Some(config_file.path())).unwrap();
        assert_eq!(manager.taxonomy().len(), 1);
        assert_eq!(manager.taxonomy().entries()[0].display_name(), "Ферросплавы");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = PipelineConfig::default();
        config.first_year = 2025;
        assert!(ConfigManager::new(config, Taxonomy::builtin()).is_err());

        let mut config = PipelineConfig::default();
        config.production_start_month = 13;
        assert!(validate(&config).is_err());

        let mut config = PipelineConfig::default();
        config.production_scale = 0.0;
        assert!(validate(&config).is_err());

        let mut config = PipelineConfig::default();
        config.quantity_header_depth = usize::MAX;
        assert!(validate(&config).is_err());

        let mut config = PipelineConfig::default();
        config.regional.year_count = usize::MAX;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();
        let err = ConfigManager::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
