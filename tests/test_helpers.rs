// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 在临时目录中构造 production / import / export 源表（CSV）
// 说明: CSV 加载器与 Excel 加载器产出相同的 RawGrid
// ==========================================

#![allow(dead_code)]

use metallurgy_demand::config::{ConfigManager, PipelineConfig, Taxonomy};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ORE: &str = "Руда железная товарная необогащенная, тыс.т";
pub const ROLLED: &str = "Прокат готовый, т";
pub const PIPES: &str = "Трубы, профили пустотелые и их фитинги стальные, т";

/// 临时数据目录（需保持存活）
pub struct TestDataDir {
    pub temp_dir: TempDir,
}

impl TestDataDir {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("无法创建临时目录");
        for sub in ["production", "import", "export"] {
            fs::create_dir_all(temp_dir.path().join(sub)).expect("无法创建子目录");
        }
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// 写入 CSV 源表，返回文件路径
    pub fn write_csv(&self, sub: &str, name: &str, rows: &[Vec<&str>]) -> PathBuf {
        let dir = self.root().join(sub);
        fs::create_dir_all(&dir).expect("无法创建子目录");
        let path = dir.join(name);
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&path)
            .expect("无法创建 CSV 文件");
        for row in rows {
            writer.write_record(row).expect("无法写入 CSV 行");
        }
        writer.flush().expect("无法刷新 CSV 文件");
        path
    }

    /// 写入任意字节（用于构造损坏文件）
    pub fn write_bytes(&self, sub: &str, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.root().join(sub).join(name);
        fs::write(&path, bytes).expect("无法写入文件");
        path
    }

    /// 指向本目录、按 CSV 识别源表的配置
    pub fn config(&self) -> PipelineConfig {
        PipelineConfig {
            data_dir: self.root().to_path_buf(),
            output_file: self.root().join("out").join("demand.csv"),
            spreadsheet_extensions: vec!["csv".to_string()],
            production_extensions: vec!["csv".to_string()],
            ..PipelineConfig::default()
        }
    }

    pub fn manager(&self) -> ConfigManager {
        ConfigManager::new(self.config(), Taxonomy::builtin()).expect("配置无效")
    }
}

/// 海关表：标题行（含报告期）+ 表头两行 + 数据行
pub fn customs_rows<'a>(title: &'a str, data: &[(&'a str, &'a str)]) -> Vec<Vec<&'a str>> {
    let mut rows = vec![
        vec![title, "", "", ""],
        vec!["Код ТН ВЭД", "Наименование товара", "Количество", "Стоимость"],
        vec!["", "", "тыс. тонн", "тыс. долл. США"],
    ];
    for (code, value) in data {
        rows.push(vec![*code, "товар", *value, "1"]);
    }
    rows
}

/// 产量表：名称列 + 自 2017-01 起的逐月数值
pub fn production_rows<'a>(data: &[(&'a str, Vec<&'a str>)]) -> Vec<Vec<&'a str>> {
    let mut rows = vec![vec!["Производство важнейших видов продукции"]];
    for (name, values) in data {
        let mut row = vec![*name];
        row.extend(values.iter().copied());
        rows.push(row);
    }
    rows
}
