// ==========================================
// 冶金产品表观需求台账 - 主流程
// ==========================================
// 流程: 源文件发现 → 加载 RawGrid → 解析 → 聚合 → 合并
// 红线: 单个文件失败只记录诊断并跳过，不中断整次运行
// 并行: 海关文件按文件 fork-join 解析，合并在全部完成后进行
// ==========================================

use crate::config::config_manager::ConfigManager;
use crate::config::pipeline_config::PipelineConfig;
use crate::config::taxonomy::Taxonomy;
use crate::domain::record::{DemandRecord, ProductRecord};
use crate::domain::report::{RunReport, SkipReason};
use crate::domain::types::MetricKind;
use crate::engine::customs_parser::CustomsTableParser;
use crate::engine::ledger::LedgerMerger;
use crate::engine::production_parser::ProductionTableParser;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::UniversalGridLoader;
use crate::importer::grid_loader_trait::{GridLoader, SheetSelector};
use crate::importer::source_discovery::{discover_first, discover_spreadsheets};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// 一次运行的结果
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub records: Vec<DemandRecord>,
    pub report: RunReport,
}

// ==========================================
// DemandPipeline - 台账主流程
// ==========================================
pub struct DemandPipeline<'a> {
    config: &'a PipelineConfig,
    taxonomy: &'a Taxonomy,
    loader: Box<dyn GridLoader>,
}

impl<'a> DemandPipeline<'a> {
    /// 使用通用加载器（Excel / CSV 按扩展名分派）
    pub fn new(manager: &'a ConfigManager) -> Self {
        Self::with_loader(
            manager.config(),
            manager.taxonomy(),
            Box::new(UniversalGridLoader),
        )
    }

    pub fn with_loader(
        config: &'a PipelineConfig,
        taxonomy: &'a Taxonomy,
        loader: Box<dyn GridLoader>,
    ) -> Self {
        Self {
            config,
            taxonomy,
            loader,
        }
    }

    /// 执行完整流程
    ///
    /// # 返回
    /// - Ok(PipelineOutcome): 台账行 + 运行报告（含被跳过文件的诊断）
    /// - Err: 源目录无法枚举
    #[instrument(skip(self), fields(data_dir = %self.config.data_dir.display()))]
    pub fn run(&self) -> ImportResult<PipelineOutcome> {
        let mut report = RunReport::new();
        info!(run_id = %report.run_id, "开始生成需求台账");

        // === 步骤 1: 产量表 ===
        let production = self.collect_production(&mut report)?;

        // === 步骤 2: 进口 / 出口 ===
        let import_dir = self.config.import_path();
        let export_dir = self.config.export_path();
        let import = self.collect_customs(MetricKind::Import, &import_dir, &mut report)?;
        let export = self.collect_customs(MetricKind::Export, &export_dir, &mut report)?;

        // === 步骤 3: 合并 ===
        let merger = LedgerMerger::new(self.config.first_year, self.config.last_year);
        let records = merger.merge(&production, &import, &export);
        report.output_rows = records.len();

        info!(
            files_processed = report.files_processed,
            files_skipped = report.files_skipped,
            production = production.len(),
            import = import.len(),
            export = export.len(),
            rows = records.len(),
            "需求台账生成完成"
        );

        Ok(PipelineOutcome { records, report })
    }

    fn collect_production(&self, report: &mut RunReport) -> ImportResult<Vec<ProductRecord>> {
        let dir = self.config.production_path();
        let Some(path) = discover_first(&dir, &self.config.production_extensions)? else {
            let reason = SkipReason::NoSourceFile;
            warn!(
                file = %dir.display(),
                metric = %MetricKind::Production,
                reason = %reason,
                "跳过文件"
            );
            report.record_skipped(dir.display().to_string(), MetricKind::Production, reason);
            return Ok(Vec::new());
        };

        match self.parse_production_file(&path) {
            Ok(records) => {
                report.record_processed(MetricKind::Production, records.len());
                Ok(records)
            }
            Err(reason) => {
                warn!(
                    file = %path.display(),
                    metric = %MetricKind::Production,
                    reason = %reason,
                    "跳过文件"
                );
                report.record_skipped(path.display().to_string(), MetricKind::Production, reason);
                Ok(Vec::new())
            }
        }
    }

    fn collect_customs(
        &self,
        metric: MetricKind,
        dir: &Path,
        report: &mut RunReport,
    ) -> ImportResult<Vec<ProductRecord>> {
        let files = discover_spreadsheets(dir, &self.config.spreadsheet_extensions)?;
        info!(metric = %metric, files = files.len(), "开始解析海关表");

        let parser = CustomsTableParser::new(self.taxonomy, self.config);
        let results: Vec<(PathBuf, Result<Vec<ProductRecord>, SkipReason>)> = files
            .into_par_iter()
            .map(|path| {
                let result = self.parse_customs_file(&parser, &path, metric);
                (path, result)
            })
            .collect();

        let mut records = Vec::new();
        for (path, result) in results {
            match result {
                Ok(file_records) => {
                    report.record_processed(metric, file_records.len());
                    records.extend(file_records);
                }
                Err(reason) => {
                    warn!(file = %path.display(), metric = %metric, reason = %reason, "跳过文件");
                    report.record_skipped(path.display().to_string(), metric, reason);
                }
            }
        }
        Ok(records)
    }

    /// 解析单个海关文件（加载失败 → Unreadable）
    #[instrument(skip(self, parser, path), fields(file = %path.display()))]
    pub fn parse_customs_file(
        &self,
        parser: &CustomsTableParser<'_>,
        path: &Path,
        metric: MetricKind,
    ) -> Result<Vec<ProductRecord>, SkipReason> {
        let grid = self
            .loader
            .load(path, &SheetSelector::First)
            .map_err(|e| SkipReason::Unreadable(e.to_string()))?;
        debug!(rows = grid.row_count(), cols = grid.column_count(), "文件加载完成");

        let records = parser.parse(&grid, metric)?;
        debug!(records = records.len(), "文件解析完成");
        Ok(records)
    }

    /// 解析产量表文件
    #[instrument(skip(self, path), fields(file = %path.display()))]
    pub fn parse_production_file(&self, path: &Path) -> Result<Vec<ProductRecord>, SkipReason> {
        let grid = self
            .loader
            .load(path, &SheetSelector::First)
            .map_err(|e| SkipReason::Unreadable(e.to_string()))?;
        debug!(rows = grid.row_count(), cols = grid.column_count(), "产量表加载完成");

        Ok(ProductionTableParser::new(self.taxonomy, self.config).parse(&grid))
    }
}
