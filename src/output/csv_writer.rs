// ==========================================
// 冶金产品表观需求台账 - CSV 写出
// ==========================================
// 列顺序固定: Year, Month, Product, Production, Import, Export, Demand
// 空值写为空字段（区别于 0）
// ==========================================

use crate::domain::record::DemandRecord;
use crate::engine::regional_share::RegionalShareTable;
use crate::output::{OutputError, OutputResult};
use csv::WriterBuilder;
use std::fs;
use std::path::Path;
use tracing::info;

pub const DEMAND_COLUMNS: [&str; 7] = [
    "Year",
    "Month",
    "Product",
    "Production",
    "Import",
    "Export",
    "Demand",
];

const REGION_COLUMN: &str = "Регион";

fn ensure_parent(path: &Path) -> OutputResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| OutputError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

fn format_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// ==========================================
// DemandTableWriter - 需求台账
// ==========================================
pub struct DemandTableWriter;

impl DemandTableWriter {
    /// 写出台账（无数据时只写表头）
    pub fn write(&self, path: &Path, records: &[DemandRecord]) -> OutputResult<usize> {
        ensure_parent(path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;

        writer.write_record(DEMAND_COLUMNS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush().map_err(|source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(file = %path.display(), rows = records.len(), "需求台账已写出");
        Ok(records.len())
    }
}

// ==========================================
// RegionalShareWriter - 地区占比
// ==========================================
pub struct RegionalShareWriter;

impl RegionalShareWriter {
    pub fn write(&self, path: &Path, table: &RegionalShareTable) -> OutputResult<usize> {
        ensure_parent(path)?;
        let mut writer = WriterBuilder::new().from_path(path)?;

        let mut header = vec![REGION_COLUMN.to_string()];
        header.extend(table.years.iter().map(|y| y.to_string()));
        writer.write_record(&header)?;

        for row in &table.rows {
            let mut fields = vec![row.region.clone()];
            fields.extend(row.values.iter().map(|v| format_value(*v)));
            writer.write_record(&fields)?;
        }
        writer.flush().map_err(|source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(file = %path.display(), regions = table.rows.len(), "地区占比表已写出");
        Ok(table.rows.len())
    }
}
