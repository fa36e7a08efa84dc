// ==========================================
// 地区用电占比 集成测试
// ==========================================
// 测试目标: 电力平衡表 → 占比表 CSV
// ==========================================

mod test_helpers;

use metallurgy_demand::config::RegionalShareConfig;
use metallurgy_demand::engine::RegionalShareEngine;
use metallurgy_demand::importer::{GridLoader, SheetSelector, UniversalGridLoader};
use metallurgy_demand::logging;
use metallurgy_demand::output::RegionalShareWriter;
use std::fs;
use test_helpers::TestDataDir;

/// 与发布版式一致: 地区名在第 0 列，2017 年起在第 13 列
fn balance_row<'a>(region: &'a str, values: [&'a str; 8]) -> Vec<&'a str> {
    let mut row = vec![region];
    row.extend(std::iter::repeat("").take(12));
    row.extend(values);
    row
}

#[test]
fn test_regional_shares_end_to_end() {
    logging::init_test();
    let data = TestDataDir::new();
    let input = data.write_csv(
        "regional",
        "elbalans.csv",
        &[
            vec!["Потребление электроэнергии по субъектам"],
            vec!["млн кВт·ч"],
            balance_row("Российская Федерация", ["100"; 8]),
            balance_row("Северо-Западный федеральный округ", ["40"; 8]),
            balance_row("Санкт-Петербург", ["30", "30", "30", "30", "30", "30", "30", "0"]),
            balance_row("Ленинградская область", ["10", "10", "10", "10", "10", "10", "10", "0"]),
            balance_row("Ленинградская область", ["-", "10", "…", "…", "…", "…", "…", "…"]),
            balance_row("Ненецкий автономный округ", ["0"; 8]),
        ],
    );

    let config = RegionalShareConfig::default();
    let grid = UniversalGridLoader
        .load(&input, &SheetSelector::Index(config.sheet_index))
        .unwrap();
    let table = RegionalShareEngine::new(config.clone()).compute(&grid);

    assert_eq!(table.years, (2017..=2024).collect::<Vec<_>>());
    let names: Vec<_> = table.rows.iter().map(|r| r.region.as_str()).collect();
    assert_eq!(names, vec!["Санкт-Петербург", "Ленинградская область"]);

    let spb = table.region("Санкт-Петербург").unwrap();
    assert_eq!(spb.values[0], Some(75.0));
    // 2018: 30 / (30 + 20)
    assert_eq!(spb.values[1], Some(60.0));
    // 2024 合计为 0
    assert_eq!(spb.values[7], Some(0.0));

    let output = data.root().join("shares.csv");
    RegionalShareWriter.write(&output, &table).unwrap();
    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(
        lines[0],
        "Регион,2017,2018,2019,2020,2021,2022,2023,2024"
    );
    assert_eq!(lines.len(), 3);
}
