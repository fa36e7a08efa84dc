// ==========================================
// 冶金产品表观需求台账 - 文件解析器实现
// ==========================================
// 职责: Excel (.xlsx/.xls) / CSV (.csv) → RawGrid
// 说明: 不做表头识别，保留原始行列位置
// ==========================================

use crate::domain::grid::{Cell, RawGrid};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::grid_loader_trait::{GridLoader, SheetSelector};
use calamine::{open_workbook, open_workbook_auto, Data, Range, Reader, Xls, Xlsx};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvGridLoader;

impl GridLoader for CsvGridLoader {
    fn load(&self, path: &Path, _sheet: &SheetSelector) -> ImportResult<RawGrid> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 按字节读取，非 UTF-8 字段只影响该单元格
        let mut rows = Vec::new();
        for result in reader.byte_records() {
            let record = result?;
            rows.push(
                record
                    .iter()
                    .map(|v| DataCleaner.clean_cell(&String::from_utf8_lossy(v)))
                    .collect(),
            );
        }

        Ok(RawGrid::new(rows))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelGridLoader;

impl GridLoader for ExcelGridLoader {
    fn load(&self, path: &Path, sheet: &SheetSelector) -> ImportResult<RawGrid> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = extension_of(path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file_label = path.display().to_string();

        // 1. 按扩展名自动识别
        let first_error = match open_workbook_auto(path) {
            Ok(mut workbook) => match read_selected(&mut workbook, sheet, &file_label) {
                Ok(grid) => return Ok(grid),
                Err(e) => e,
            },
            Err(e) => ImportError::from(e),
        };

        // 工作表不存在不是格式问题，不再尝试其他引擎
        if matches!(
            first_error,
            ImportError::SheetNotFound(_) | ImportError::EmptyWorkbook(_)
        ) {
            return Err(first_error);
        }

        // 2. 扩展名与实际格式不符时，逐个尝试 xlsx / xls 引擎
        debug!(file = %file_label, error = %first_error, "自动识别失败，尝试其他解析引擎");
        if let Ok(mut workbook) = open_workbook::<Xlsx<_>, _>(path) {
            if let Ok(grid) = read_selected(&mut workbook, sheet, &file_label) {
                return Ok(grid);
            }
        }
        if let Ok(mut workbook) = open_workbook::<Xls<_>, _>(path) {
            if let Ok(grid) = read_selected(&mut workbook, sheet, &file_label) {
                return Ok(grid);
            }
        }

        Err(first_error)
    }
}

fn read_selected<R>(workbook: &mut R, sheet: &SheetSelector, file: &str) -> ImportResult<RawGrid>
where
    R: Reader<BufReader<File>>,
    R::Error: std::fmt::Display,
{
    let names = workbook.sheet_names();
    if names.is_empty() {
        return Err(ImportError::EmptyWorkbook(file.to_string()));
    }

    let name = match sheet {
        SheetSelector::First => names[0].clone(),
        SheetSelector::Index(idx) => names
            .get(*idx)
            .cloned()
            .ok_or_else(|| ImportError::SheetNotFound(format!("{} #{}", file, idx)))?,
        SheetSelector::Name(wanted) => names
            .iter()
            .find(|n| *n == wanted)
            .cloned()
            .ok_or_else(|| ImportError::SheetNotFound(format!("{} '{}'", file, wanted)))?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

    Ok(range_to_grid(&range))
}

/// calamine Range → RawGrid
///
/// Range 从第一个非空单元格开始，这里补齐前导空行/空列，
/// 保证行号与源表一致（表头扫描窗口按绝对行号计算）
fn range_to_grid(range: &Range<Data>) -> RawGrid {
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset];
    for data_row in range.rows() {
        let mut row = vec![Cell::Empty; col_offset];
        row.extend(data_row.iter().map(data_to_cell));
        rows.push(row);
    }

    RawGrid::new(rows)
}

fn data_to_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::String(s) => DataCleaner.clean_cell(s),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Error(_) => Cell::Empty,
        other => DataCleaner.clean_cell(&other.to_string()),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalGridLoader;

impl GridLoader for UniversalGridLoader {
    fn load(&self, path: &Path, sheet: &SheetSelector) -> ImportResult<RawGrid> {
        let ext = extension_of(path);
        match ext.as_str() {
            "csv" => CsvGridLoader.load(path, sheet),
            e if EXCEL_EXTENSIONS.contains(&e) => ExcelGridLoader.load(path, sheet),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
