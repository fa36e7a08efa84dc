// ==========================================
// 冶金产品表观需求台账 - 运行报告写出
// ==========================================

use crate::domain::report::RunReport;
use crate::output::{OutputError, OutputResult};
use std::fs;
use std::path::Path;
use tracing::info;

/// 运行报告 → 格式化 JSON 文件
pub fn write_report_json(path: &Path, report: &RunReport) -> OutputResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, json).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(file = %path.display(), run_id = %report.run_id, "运行报告已写出");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::SkipReason;
    use crate::domain::types::MetricKind;
    use tempfile::TempDir;

    #[test]
    fn test_write_report_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");

        let mut report = RunReport::new();
        report.record_processed(MetricKind::Import, 3);
        report.record_skipped("export/bad.xls", MetricKind::Export, SkipReason::NoPeriod);
        write_report_json(&path, &report).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["files_processed"], 1);
        assert_eq!(value["files_skipped"], 1);
        assert_eq!(value["records_by_metric"]["Import"], 3);
        assert_eq!(value["diagnostics"][0]["file"], "export/bad.xls");
    }
}
