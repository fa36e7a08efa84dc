// ==========================================
// 冶金产品表观需求台账 - 台账合并引擎
// ==========================================
// 输入: 产量 / 进口 / 出口 三组记录
// 输出: 按 (年, 月, 产品) 一行的 DemandRecord
// 空值规则:
//   同一指标内聚合: None + x = x，x + y = x + y
//   需求计算:       任一操作数为 None → None
// ==========================================

use crate::config::taxonomy::clean_product_name;
use crate::domain::record::{DemandRecord, LedgerKey, ProductRecord};
use crate::domain::types::MetricKind;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// 同一指标内的合并规则
pub fn combine_same_metric(acc: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (acc, value) {
        (Some(a), Some(b)) => Some(a + b),
        (Some(a), None) => Some(a),
        (None, other) => other,
    }
}

/// 表观需求 = 产量 + 进口 − 出口（空值传播）
pub fn apparent_demand(
    production: Option<f64>,
    import: Option<f64>,
    export: Option<f64>,
) -> Option<f64> {
    Some(production? + import? - export?)
}

// ==========================================
// MetricSeries - 单一指标的聚合序列
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct MetricSeries {
    values: BTreeMap<LedgerKey, Option<f64>>,
}

impl MetricSeries {
    /// 聚合同一指标的记录（其他指标的记录被忽略）
    pub fn aggregate(metric: MetricKind, records: &[ProductRecord]) -> Self {
        let mut values: BTreeMap<LedgerKey, Option<f64>> = BTreeMap::new();
        for record in records.iter().filter(|r| r.metric == metric) {
            let slot = values.entry(record.key()).or_insert(None);
            *slot = combine_same_metric(*slot, record.value);
        }
        Self { values }
    }

    pub fn get(&self, key: &LedgerKey) -> Option<f64> {
        self.values.get(key).copied().flatten()
    }

    pub fn keys(&self) -> impl Iterator<Item = &LedgerKey> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ==========================================
// LedgerMerger - 三表外连接
// ==========================================
pub struct LedgerMerger {
    first_year: i32,
    last_year: i32,
}

impl LedgerMerger {
    pub fn new(first_year: i32, last_year: i32) -> Self {
        Self {
            first_year,
            last_year,
        }
    }

    /// 合并三组记录
    ///
    /// # 规则
    /// - 外连接：任一来源出现的键都产生一行，缺失指标为 None
    /// - 仅保留 [first_year, last_year] 年份
    /// - 产品名去除单位后缀后，按 (产品, 年, 月) 排序
    pub fn merge(
        &self,
        production: &[ProductRecord],
        import: &[ProductRecord],
        export: &[ProductRecord],
    ) -> Vec<DemandRecord> {
        let production = MetricSeries::aggregate(MetricKind::Production, production);
        let import = MetricSeries::aggregate(MetricKind::Import, import);
        let export = MetricSeries::aggregate(MetricKind::Export, export);
        debug!(
            production = production.len(),
            import = import.len(),
            export = export.len(),
            "指标聚合完成"
        );

        let keys: BTreeSet<&LedgerKey> = production
            .keys()
            .chain(import.keys())
            .chain(export.keys())
            .filter(|k| k.period.within_years(self.first_year, self.last_year))
            .collect();

        let mut rows: Vec<DemandRecord> = keys
            .into_iter()
            .map(|key| {
                let p = production.get(key);
                let i = import.get(key);
                let e = export.get(key);
                DemandRecord {
                    year: key.period.year,
                    month: key.period.month,
                    product: clean_product_name(&key.product),
                    production: p,
                    import: i,
                    export: e,
                    demand: apparent_demand(p, i, e),
                }
            })
            .collect();

        rows.sort_by(|a, b| a.product.cmp(&b.product).then(a.period().cmp(&b.period())));

        info!(rows = rows.len(), "台账合并完成");
        rows
    }
}

impl Default for LedgerMerger {
    fn default() -> Self {
        Self::new(2017, 2024)
    }
}
