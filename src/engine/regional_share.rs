// ==========================================
// 冶金产品表观需求台账 - 地区用电占比引擎
// ==========================================
// 输入: 地区电力平衡表网格（地区名列 + 连续年份列）
// 流程: 跳过前导行 → 剔除汇总地区 → 同名地区合并
//       → 剔除全空/全零行 → 各年份按列合计折算百分比
// ==========================================

use crate::config::pipeline_config::RegionalShareConfig;
use crate::domain::grid::RawGrid;
use crate::engine::ledger::combine_same_metric;
use crate::importer::data_cleaner::DataCleaner;
use serde::Serialize;
use tracing::{debug, info};

/// 单个地区的数值行（原始值或百分比）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRow {
    pub region: String,
    pub values: Vec<Option<f64>>,
}

/// 占比表
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalShareTable {
    pub years: Vec<i32>,
    pub rows: Vec<RegionRow>,
}

impl RegionalShareTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn region(&self, name: &str) -> Option<&RegionRow> {
        self.rows.iter().find(|r| r.region == name)
    }
}

// ==========================================
// RegionalShareEngine
// ==========================================
pub struct RegionalShareEngine {
    config: RegionalShareConfig,
}

impl RegionalShareEngine {
    pub fn new(config: RegionalShareConfig) -> Self {
        Self { config }
    }

    /// 读取地区行并合并同名地区（保持首次出现顺序）
    pub fn collect_regions(&self, grid: &RawGrid) -> Vec<RegionRow> {
        let year_count = self.config.year_count;
        let mut merged: Vec<RegionRow> = Vec::new();

        for row in grid.rows().skip(self.config.skip_rows) {
            let region = row
                .get(self.config.region_column)
                .map(|c| DataCleaner.clean_text(&c.to_text()))
                .unwrap_or_default();
            if region.is_empty() || self.config.excluded_regions.contains(&region) {
                continue;
            }

            let values: Vec<Option<f64>> = (0..year_count)
                .map(|i| {
                    row.get(self.config.first_year_column.saturating_add(i))
                        .and_then(|c| c.to_number())
                })
                .collect();

            match merged.iter_mut().find(|r| r.region == region) {
                Some(existing) => {
                    for (acc, value) in existing.values.iter_mut().zip(values) {
                        *acc = combine_same_metric(*acc, value);
                    }
                }
                None => merged.push(RegionRow { region, values }),
            }
        }

        merged
    }

    /// 计算各地区各年份占比（%，保留 4 位小数）
    pub fn compute(&self, grid: &RawGrid) -> RegionalShareTable {
        let years = self.config.years();
        let regions: Vec<RegionRow> = self
            .collect_regions(grid)
            .into_iter()
            .filter(has_meaningful_values)
            .collect();
        debug!(regions = regions.len(), "地区行筛选完成");

        let totals: Vec<f64> = (0..years.len())
            .map(|i| regions.iter().filter_map(|r| r.values[i]).sum())
            .collect();

        let rows = regions
            .into_iter()
            .map(|r| RegionRow {
                values: r
                    .values
                    .iter()
                    .zip(&totals)
                    .map(|(value, &total)| {
                        if total > 0.0 {
                            value.map(|v| round4(v / total * 100.0))
                        } else {
                            Some(0.0)
                        }
                    })
                    .collect(),
                region: r.region,
            })
            .collect::<Vec<_>>();

        info!(regions = rows.len(), years = years.len(), "地区占比计算完成");
        RegionalShareTable { years, rows }
    }
}

/// 至少一个非空值，且并非全部为 0（空值不视为 0）
fn has_meaningful_values(row: &RegionRow) -> bool {
    let any_present = row.values.iter().any(Option::is_some);
    let any_non_zero = row.values.iter().any(|v| *v != Some(0.0));
    any_present && any_non_zero
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
