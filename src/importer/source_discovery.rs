// ==========================================
// 冶金产品表观需求台账 - 源文件发现
// ==========================================
// 职责: 按扩展名在数据目录中查找表格文件
// 顺序: 按路径排序，保证输出可复现
// ==========================================

use crate::importer::error::ImportResult;
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 列出目录下（不递归）扩展名匹配的文件
///
/// # 参数
/// - dir: 目录
/// - extensions: 小写扩展名（不含点）
///
/// # 返回
/// - 排序后的文件列表；目录不存在时返回空列表
pub fn discover_spreadsheets(dir: &Path, extensions: &[String]) -> ImportResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "数据目录不存在");
        return Ok(Vec::new());
    }

    let pattern = format!("{}/*.*", Pattern::escape(&dir.to_string_lossy()));
    let mut files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "目录项不可读，已跳过");
                None
            }
        })
        .filter(|path| path.is_file() && has_extension(path, extensions))
        .collect();

    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "源文件发现完成");
    Ok(files)
}

/// 取目录中第一个匹配的文件（产量表只处理一个文件）
pub fn discover_first(dir: &Path, extensions: &[String]) -> ImportResult<Option<PathBuf>> {
    Ok(discover_spreadsheets(dir, extensions)?.into_iter().next())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_lowercase();
            extensions.iter().any(|x| x.eq_ignore_ascii_case(&lower))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.xlsx", "a.XLS", "notes.txt", "c.csv"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.xlsx")).unwrap();

        let files = discover_spreadsheets(dir.path(), &exts(&["xls", "xlsx"])).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.XLS", "b.xlsx"]);
    }

    #[test]
    fn test_discover_missing_dir_is_empty() {
        let files =
            discover_spreadsheets(Path::new("/definitely/not/here"), &exts(&["xlsx"])).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_first() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("z.xlsx"), b"x").unwrap();
        fs::write(dir.path().join("m.xlsx"), b"x").unwrap();

        let first = discover_first(dir.path(), &exts(&["xlsx"])).unwrap().unwrap();
        assert_eq!(first.file_name().unwrap(), "m.xlsx");
        assert!(discover_first(dir.path(), &exts(&["csv"])).unwrap().is_none());
    }
}
