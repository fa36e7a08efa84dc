// ==========================================
// 冶金产品表观需求台账 - 产品分类桥接表
// ==========================================
// 职责: 产品名称 → ТН ВЭД 编码前缀（4-6 位）
// 红线: 进程内只读；修改分类只改数据，不改识别代码
// ==========================================

use crate::config::config_manager::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// 名称尾部的计量单位后缀（", тыс.т" / ", т" / ",т"）
static UNIT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i),?\s*(тыс\.?)?\s*т\.?$").expect("单位后缀正则无效")
});

/// 内置桥接表（顺序即匹配优先级）
const BUILTIN_BRIDGE: &[(&str, &[&str])] = &[
    ("Руда железная товарная необогащенная, тыс.т", &["2601"]),
    ("Концентрат железорудный, тыс.т", &["260111"]),
    (
        "Чугун зеркальный и передельный в чушках, болванках или в прочих первичных формах, тыс.т",
        &["7201"],
    ),
    (
        "Сталь нелегированная в слитках или в прочих первичных формах и полуфабрикаты из нелегированной стали, т",
        &["7206", "7207"],
    ),
    (
        "Сталь нержавеющая в слитках или прочих первичных формах и полуфабрикаты из нержавеющей стали,т",
        &["7218"],
    ),
    (
        "Сталь легированная прочая в слитках или в прочих первичных формах и полуфабрикаты из прочей легированной стали,т",
        &["7224"],
    ),
    (
        "Прокат готовый, т",
        &[
            "7208", "7209", "7210", "7211", "7212", "7213", "7214", "7215", "7216", "7219",
            "7220", "7221", "7222", "7225", "7226", "7227", "7228",
        ],
    ),
    (
        "Трубы, профили пустотелые и их фитинги стальные, т",
        &["7304", "7305", "7306", "7307"],
    ),
];

/// 去掉产品名称尾部的计量单位后缀
///
/// "Прокат готовый, т" → "Прокат готовый"
pub fn clean_product_name(name: &str) -> String {
    UNIT_SUFFIX.replace(name, "").trim().to_string()
}

// ==========================================
// TaxonomyEntry - 分类条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub product_name: String,
    pub code_prefixes: Vec<String>,
}

impl TaxonomyEntry {
    pub fn new(product_name: &str, code_prefixes: &[&str]) -> Self {
        Self {
            product_name: product_name.to_string(),
            code_prefixes: code_prefixes.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// 输出用名称（去单位后缀）
    pub fn display_name(&self) -> String {
        clean_product_name(&self.product_name)
    }
}

// ==========================================
// Taxonomy - 分类表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    entries: Vec<TaxonomyEntry>,
}

impl Taxonomy {
    /// 内置冶金产品分类（8 项）
    pub fn builtin() -> Self {
        let entries = BUILTIN_BRIDGE
            .iter()
            .map(|(name, prefixes)| TaxonomyEntry::new(name, prefixes))
            .collect();
        Self { entries }
    }

    /// 由外部条目构造（校验前缀格式）
    ///
    /// # 校验
    /// - 至少一个条目
    /// - 名称非空、不重复
    /// - 每个前缀为 4-6 位纯数字
    pub fn from_entries(entries: Vec<TaxonomyEntry>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::Invalid("分类表为空".to_string()));
        }

        for (idx, entry) in entries.iter().enumerate() {
            if entry.product_name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("分类条目 {} 名称为空", idx)));
            }
            if entries[..idx]
                .iter()
                .any(|e| e.product_name == entry.product_name)
            {
                return Err(ConfigError::Invalid(format!(
                    "分类条目名称重复: {}",
                    entry.product_name
                )));
            }
            if entry.code_prefixes.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "分类条目无编码前缀: {}",
                    entry.product_name
                )));
            }
            for prefix in &entry.code_prefixes {
                let valid = (4..=6).contains(&prefix.len())
                    && prefix.chars().all(|c| c.is_ascii_digit());
                if !valid {
                    return Err(ConfigError::Invalid(format!(
                        "编码前缀格式错误 ({}): {}",
                        entry.product_name, prefix
                    )));
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxonomyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, product_name: &str) -> Option<&TaxonomyEntry> {
        self.entries.iter().find(|e| e.product_name == product_name)
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_eight_entries() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.len(), 8);
        assert_eq!(
            taxonomy.get("Прокат готовый, т").unwrap().code_prefixes.len(),
            17
        );
        assert!(Taxonomy::from_entries(taxonomy.entries().to_vec()).is_ok());
    }

    #[test]
    fn test_clean_product_name_strips_unit_suffix() {
        assert_eq!(clean_product_name("Прокат готовый, т"), "Прокат готовый");
        assert_eq!(
            clean_product_name("Руда железная товарная необогащенная, тыс.т"),
            "Руда железная товарная необогащенная"
        );
        assert_eq!(
            clean_product_name("Сталь нержавеющая в слитках,т"),
            "Сталь нержавеющая в слитках"
        );
        assert_eq!(clean_product_name("Концентрат, ТЫС. Т."), "Концентрат");
    }

    #[test]
    fn test_from_entries_rejects_bad_prefix() {
        let bad = vec![TaxonomyEntry::new("Лом", &["72a4"])];
        assert!(Taxonomy::from_entries(bad).is_err());

        let short = vec![TaxonomyEntry::new("Лом", &["720"])];
        assert!(Taxonomy::from_entries(short).is_err());

        let dup = vec![
            TaxonomyEntry::new("Лом", &["7204"]),
            TaxonomyEntry::new("Лом", &["7205"]),
        ];
        assert!(Taxonomy::from_entries(dup).is_err());

        assert!(Taxonomy::from_entries(Vec::new()).is_err());
    }
}
