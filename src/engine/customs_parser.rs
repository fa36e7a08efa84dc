// ==========================================
// 冶金产品表观需求台账 - 海关进出口表解析引擎
// ==========================================
// 流程: 报告期识别 → 表头定位 → 数量列选择 → 逐行编码分类
// 红线: 文件级识别失败 → SkipReason（跳过文件）
//       单元格级失败   → 跳过该行（不影响文件）
// ==========================================

use crate::config::pipeline_config::PipelineConfig;
use crate::config::taxonomy::Taxonomy;
use crate::domain::grid::RawGrid;
use crate::domain::record::ProductRecord;
use crate::domain::report::SkipReason;
use crate::domain::types::{MetricKind, TimePeriod};
use crate::engine::code_classifier::CodeClassifier;
use crate::engine::header_locator::{HeaderLocation, HeaderLocator};
use crate::engine::period_extractor::PeriodExtractor;
use crate::engine::quantity_column::QuantityColumnSelector;
use tracing::{debug, trace};

/// 识别出的表结构
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomsLayout {
    pub period: TimePeriod,
    pub header: HeaderLocation,
    pub quantity_column: usize,
}

// ==========================================
// CustomsTableParser - 海关表解析
// ==========================================
pub struct CustomsTableParser<'a> {
    taxonomy: &'a Taxonomy,
    period_extractor: PeriodExtractor,
    header_locator: HeaderLocator,
    quantity_selector: QuantityColumnSelector,
}

impl<'a> CustomsTableParser<'a> {
    pub fn new(taxonomy: &'a Taxonomy, config: &PipelineConfig) -> Self {
        Self {
            taxonomy,
            period_extractor: PeriodExtractor::new(config.period_scan_rows),
            header_locator: HeaderLocator::new(config.header_scan_rows),
            quantity_selector: QuantityColumnSelector::new(config.quantity_header_depth),
        }
    }

    /// 识别表结构
    ///
    /// # 返回
    /// - Err(NoPeriod / NoHeader / NoQuantityColumn): 文件不可用
    pub fn recognize(&self, grid: &RawGrid) -> Result<CustomsLayout, SkipReason> {
        let period = self
            .period_extractor
            .extract(grid)
            .ok_or(SkipReason::NoPeriod)?;

        let header = self
            .header_locator
            .locate(grid)
            .ok_or(SkipReason::NoHeader)?;

        let quantity_column = self
            .quantity_selector
            .select(grid, header.row_index)
            .ok_or(SkipReason::NoQuantityColumn)?;

        debug!(
            %period,
            header_row = header.row_index,
            code_column = header.code_column,
            quantity_column,
            "表结构识别完成"
        );

        Ok(CustomsLayout {
            period,
            header,
            quantity_column,
        })
    }

    /// 按已识别的结构提取产品记录
    ///
    /// # 行规则
    /// - 编码单元格为空 → 跳过
    /// - 数量不可解析或 ≤ 0 → 跳过
    /// - 一个编码可产生多条记录（匹配多个产品时）
    pub fn extract(
        &self,
        grid: &RawGrid,
        layout: &CustomsLayout,
        metric: MetricKind,
    ) -> Vec<ProductRecord> {
        let classifier = CodeClassifier::new(self.taxonomy);
        let mut records = Vec::new();

        for row in (layout.header.row_index + 1)..grid.row_count() {
            let code_cell = grid.cell(row, layout.header.code_column);
            if code_cell.is_empty() {
                continue;
            }

            let value = match grid.cell(row, layout.quantity_column).to_number() {
                Some(v) if v > 0.0 => v,
                _ => continue,
            };

            let code_text = code_cell.to_text();
            for entry in classifier.classify(code_text.trim()) {
                trace!(row, code = %code_text.trim(), product = %entry.product_name, value, "编码匹配");
                records.push(ProductRecord::new(
                    layout.period,
                    &entry.product_name,
                    metric,
                    Some(value),
                ));
            }
        }

        records
    }

    /// 识别 + 提取
    pub fn parse(
        &self,
        grid: &RawGrid,
        metric: MetricKind,
    ) -> Result<Vec<ProductRecord>, SkipReason> {
        let layout = self.recognize(grid)?;
        Ok(self.extract(grid, &layout, metric))
    }
}
