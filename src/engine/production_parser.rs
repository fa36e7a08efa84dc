// ==========================================
// 冶金产品表观需求台账 - 产品产量表解析引擎
// ==========================================
// 版式: 固定（名称列 + 自 2017-01 起逐月排列的数值列）
// 流程: 锚点定位起始行/名称列 → 名称匹配分类表 → 向右逐月取值
// 红线: 缺失值保持 None，不得以 0 代替
// ==========================================

use crate::config::pipeline_config::PipelineConfig;
use crate::config::taxonomy::{Taxonomy, TaxonomyEntry};
use crate::domain::grid::RawGrid;
use crate::domain::record::ProductRecord;
use crate::domain::types::{MetricKind, TimePeriod};
use crate::importer::data_cleaner::DataCleaner;
use tracing::debug;

/// 产量表起点（起始行 + 名称列）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionAnchor {
    pub start_row: usize,
    pub name_column: usize,
}

// ==========================================
// ProductionTableParser - 产量表解析
// ==========================================
pub struct ProductionTableParser<'a> {
    taxonomy: &'a Taxonomy,
    anchors: Vec<String>,
    anchor_scan_rows: usize,
    start: TimePeriod,
    last_year: i32,
    scale: f64,
}

impl<'a> ProductionTableParser<'a> {
    pub fn new(taxonomy: &'a Taxonomy, config: &PipelineConfig) -> Self {
        // 配置已校验，月份非法时退回 1 月
        let start = TimePeriod::new(config.production_start_year, config.production_start_month)
            .unwrap_or(TimePeriod {
                year: config.production_start_year,
                month: 1,
            });
        Self {
            taxonomy,
            anchors: config.production_anchors.clone(),
            anchor_scan_rows: config.production_anchor_scan_rows,
            start,
            last_year: config.production_last_year,
            scale: config.production_scale,
        }
    }

    /// 定位起始行与名称列
    ///
    /// 前 anchor_scan_rows 行中第一个含锚点文本的行；
    /// 该行第一个含锚点的列为名称列。找不到时退回 (0, 0)
    pub fn locate_anchor(&self, grid: &RawGrid) -> ProductionAnchor {
        for (row_index, row) in grid.rows().take(self.anchor_scan_rows).enumerate() {
            let hit = row.iter().position(|cell| {
                let text = cell.to_text();
                self.anchors.iter().any(|a| text.contains(a.as_str()))
            });
            if let Some(name_column) = hit {
                return ProductionAnchor {
                    start_row: row_index,
                    name_column,
                };
            }
        }
        debug!("产量表未找到锚点，从 (0, 0) 开始");
        ProductionAnchor {
            start_row: 0,
            name_column: 0,
        }
    }

    /// 名称单元格 → 分类条目
    ///
    /// 先精确匹配；否则按分类表声明顺序逐条尝试
    /// 去空白相等 或 名称包含条目名，首个命中即返回
    pub fn match_product(&self, raw_name: &str) -> Option<&'a TaxonomyEntry> {
        let name = raw_name.trim();
        if name.is_empty() {
            return None;
        }
        if let Some(entry) = self.taxonomy.get(name) {
            return Some(entry);
        }

        let compact_name = DataCleaner.compact(name);
        self.taxonomy.iter().find(|entry| {
            DataCleaner.compact(&entry.product_name) == compact_name
                || name.contains(entry.product_name.as_str())
        })
    }

    /// 解析整张产量表
    ///
    /// 每个匹配行从名称列右侧第一列开始，按月递增分配报告期，
    /// 年份超过 last_year 即停止；不可解析的值记为 None
    pub fn parse(&self, grid: &RawGrid) -> Vec<ProductRecord> {
        let anchor = self.locate_anchor(grid);
        let mut records = Vec::new();

        for row in grid.rows().skip(anchor.start_row) {
            let Some(name_cell) = row.get(anchor.name_column) else {
                continue;
            };
            let Some(entry) = self.match_product(&name_cell.to_text()) else {
                continue;
            };

            let mut period = self.start;
            for cell in &row[anchor.name_column + 1..] {
                if period.year > self.last_year {
                    break;
                }
                let value = cell.to_number().map(|v| v / self.scale);
                records.push(ProductRecord::new(
                    period,
                    &entry.product_name,
                    MetricKind::Production,
                    value,
                ));
                period = period.next();
            }
        }

        debug!(
            start_row = anchor.start_row,
            name_column = anchor.name_column,
            records = records.len(),
            "产量表解析完成"
        );
        records
    }
}
