// ==========================================
// 冶金产品表观需求台账 - 流水线配置
// ==========================================
// PipelineConfig:      需求台账（目录、扫描窗口、年份区间）
// RegionalShareConfig: 地区用电占比表（版式位置、排除项）
// 缺省值: 与历史发布表格版式一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 台账流水线配置
///
/// 所有字段均可在 JSON 配置文件中省略，缺省值与历史口径一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 数据根目录（其下为 production/import/export 子目录）
    pub data_dir: PathBuf,
    pub production_dir: String,
    pub import_dir: String,
    pub export_dir: String,

    /// 台账输出文件（CSV）
    pub output_file: PathBuf,

    /// 运行报告（JSON，可选）
    pub report_file: Option<PathBuf>,

    /// 外部分类表（JSON 数组，可选；缺省使用内置 8 项）
    pub taxonomy_file: Option<PathBuf>,

    /// 进出口目录中可处理的源文件扩展名（小写，不含点）
    pub spreadsheet_extensions: Vec<String>,

    /// 产量目录中可处理的源文件扩展名（取排序后第一个）
    pub production_extensions: Vec<String>,

    /// 报告期扫描行数
    pub period_scan_rows: usize,

    /// 表头扫描行数
    pub header_scan_rows: usize,

    /// 数量列判定时合并的表头行数（表头行及其下方）
    pub quantity_header_depth: usize,

    /// 产量表锚点扫描行数
    pub production_anchor_scan_rows: usize,

    /// 产量表锚点（产品名称片段，区分大小写）
    pub production_anchors: Vec<String>,

    /// 产量表首列对应的年月
    pub production_start_year: i32,
    pub production_start_month: u32,

    /// 产量表最后一年（超过即停止）
    pub production_last_year: i32,

    /// 产量值除数（源表为吨时取 1000）
    pub production_scale: f64,

    /// 台账保留年份闭区间
    pub first_year: i32,
    pub last_year: i32,

    /// 地区占比表
    pub regional: RegionalShareConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            production_dir: "production".to_string(),
            import_dir: "import".to_string(),
            export_dir: "export".to_string(),
            output_file: PathBuf::from("final_demand_metallurgy_clean.csv"),
            report_file: None,
            taxonomy_file: None,
            spreadsheet_extensions: vec!["xls".to_string(), "xlsx".to_string()],
            production_extensions: vec!["xlsx".to_string()],
            period_scan_rows: 20,
            header_scan_rows: 40,
            quantity_header_depth: 3,
            production_anchor_scan_rows: 20,
            production_anchors: vec!["Руда".to_string(), "Чугун".to_string()],
            production_start_year: 2017,
            production_start_month: 1,
            production_last_year: 2024,
            production_scale: 1.0,
            first_year: 2017,
            last_year: 2024,
            regional: RegionalShareConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn production_path(&self) -> PathBuf {
        self.data_dir.join(&self.production_dir)
    }

    pub fn import_path(&self) -> PathBuf {
        self.data_dir.join(&self.import_dir)
    }

    pub fn export_path(&self) -> PathBuf {
        self.data_dir.join(&self.export_dir)
    }
}

/// 地区用电占比表配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionalShareConfig {
    /// 工作表序号（从 0 开始）
    pub sheet_index: usize,

    /// 跳过的前导行数
    pub skip_rows: usize,

    pub region_column: usize,

    /// 第一个年份列的位置
    pub first_year_column: usize,
    pub first_year: i32,
    pub year_count: usize,

    /// 汇总行（联邦、联邦区等），不参与占比
    pub excluded_regions: Vec<String>,

    pub output_file: PathBuf,
}

impl Default for RegionalShareConfig {
    fn default() -> Self {
        let excluded = [
            "Российская Федерация",
            "Центральный федеральный округ",
            "Северо-Западный федеральный округ",
            "Южный федеральный округ",
            "Архангельская область",
            "Северо-Кавказский федеральный округ",
            "Приволжский федеральный округ",
            "Уральский федеральный округ",
            "Сибирский федеральный округ",
            "Дальневосточный федеральный округ",
            "Тюменская область",
        ];

        Self {
            sheet_index: 21,
            skip_rows: 2,
            region_column: 0,
            first_year_column: 13,
            first_year: 2017,
            year_count: 8,
            excluded_regions: excluded.iter().map(|s| s.to_string()).collect(),
            output_file: PathBuf::from("electricity_consumption_2017-2024_percent.csv"),
        }
    }
}

impl RegionalShareConfig {
    pub fn years(&self) -> Vec<i32> {
        (0..self.year_count as i32).map(|i| self.first_year + i).collect()
    }
}
