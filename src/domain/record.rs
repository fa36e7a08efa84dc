// ==========================================
// 冶金产品表观需求台账 - 产品记录与台账记录
// ==========================================
// ProductRecord: 识别引擎输出（单一指标）
// DemandRecord:  台账合并输出（三指标 + 表观需求）
// ==========================================

use crate::domain::types::{MetricKind, TimePeriod};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductRecord - 产品指标记录
// ==========================================
// 同一 (年, 月, 产品, 指标) 可出现多条，合并时累加而非覆盖
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub period: TimePeriod,
    pub product: String,     // 分类表中的完整产品名称
    pub metric: MetricKind,
    pub value: Option<f64>,  // None = 缺失（区别于 0）
}

impl ProductRecord {
    pub fn new(period: TimePeriod, product: &str, metric: MetricKind, value: Option<f64>) -> Self {
        Self {
            period,
            product: product.to_string(),
            metric,
            value,
        }
    }

    pub fn key(&self) -> LedgerKey {
        LedgerKey {
            period: self.period,
            product: self.product.clone(),
        }
    }
}

// ==========================================
// LedgerKey - 台账复合键 (年, 月, 产品)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LedgerKey {
    pub period: TimePeriod,
    pub product: String,
}

// ==========================================
// DemandRecord - 表观需求台账行
// ==========================================
// 列顺序与输出表一致: Year, Month, Product, Production, Import, Export, Demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Production")]
    pub production: Option<f64>,
    #[serde(rename = "Import")]
    pub import: Option<f64>,
    #[serde(rename = "Export")]
    pub export: Option<f64>,
    #[serde(rename = "Demand")]
    pub demand: Option<f64>,
}

impl DemandRecord {
    pub fn period(&self) -> TimePeriod {
        TimePeriod {
            year: self.year,
            month: self.month,
        }
    }

    /// 按指标取值
    pub fn metric(&self, kind: MetricKind) -> Option<f64> {
        match kind {
            MetricKind::Production => self.production,
            MetricKind::Import => self.import,
            MetricKind::Export => self.export,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demand_record_accessors() {
        let row = DemandRecord {
            year: 2020,
            month: 2,
            product: "Прокат готовый".to_string(),
            production: Some(100.0),
            import: Some(12.5),
            export: None,
            demand: None,
        };
        assert_eq!(row.period(), TimePeriod::new(2020, 2).unwrap());
        assert_eq!(row.metric(MetricKind::Production), Some(100.0));
        assert_eq!(row.metric(MetricKind::Import), Some(12.5));
        assert_eq!(row.metric(MetricKind::Export), None);
    }
}
