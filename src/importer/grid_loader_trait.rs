// ==========================================
// 冶金产品表观需求台账 - 网格加载 Trait
// ==========================================
// 职责: 定义“文件 → RawGrid”接口（不包含实现）
// 红线: 识别引擎只依赖 RawGrid，不依赖文件格式
// ==========================================

use crate::domain::grid::RawGrid;
use crate::importer::error::ImportResult;
use std::path::Path;

/// 工作表选择
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelector {
    /// 第一个工作表
    #[default]
    First,
    /// 按序号（从 0 开始）
    Index(usize),
    /// 按名称
    Name(String),
}

// ==========================================
// GridLoader Trait
// ==========================================
// 实现者: ExcelGridLoader, CsvGridLoader, UniversalGridLoader
pub trait GridLoader: Send + Sync {
    /// 读取文件为矩形网格
    ///
    /// # 参数
    /// - path: 文件路径
    /// - sheet: 工作表选择（CSV 忽略）
    ///
    /// # 返回
    /// - Ok(RawGrid): 原始单元格网格（行列位置与源表一致）
    /// - Err: 文件不存在、格式不支持、解析失败
    fn load(&self, path: &Path, sheet: &SheetSelector) -> ImportResult<RawGrid>;
}
