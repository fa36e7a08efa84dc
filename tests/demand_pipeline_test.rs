// ==========================================
// DemandPipeline 集成测试
// ==========================================
// 测试目标: 从磁盘源表到需求台账 CSV 的完整流程
// ==========================================

mod test_helpers;

use metallurgy_demand::domain::{MetricKind, SkipReason};
use metallurgy_demand::logging;
use metallurgy_demand::output::{write_report_json, DemandTableWriter};
use metallurgy_demand::pipeline::DemandPipeline;
use std::fs;
use test_helpers::{customs_rows, production_rows, TestDataDir, ORE, PIPES, ROLLED};

fn months(values: &[&'static str]) -> Vec<&'static str> {
    values.to_vec()
}

#[test]
fn test_import_file_yields_rolled_products_row() {
    logging::init_test();
    let data = TestDataDir::new();
    data.write_csv(
        "import",
        "import_2020_02.csv",
        &customs_rows(
            "Импорт важнейших товаров за февраль 2020 года",
            &[("72081000", "12,5")],
        ),
    );

    let manager = data.manager();
    let outcome = DemandPipeline::new(&manager).run().unwrap();

    assert_eq!(outcome.records.len(), 1);
    let row = &outcome.records[0];
    assert_eq!((row.year, row.month), (2020, 2));
    assert_eq!(row.product, "Прокат готовый");
    assert_eq!(row.metric(MetricKind::Import), Some(12.5));
    assert_eq!(row.metric(MetricKind::Production), None);
    assert_eq!(row.metric(MetricKind::Export), None);
    assert_eq!(row.demand, None);
}

#[test]
fn test_full_ledger_with_demand() {
    logging::init_test();
    let data = TestDataDir::new();

    // 产量：2017-01 .. 2017-02
    data.write_csv(
        "production",
        "production.csv",
        &production_rows(&[(ORE, months(&["100", "110"])), (ROLLED, months(&["50", "-"]))]),
    );
    // 两个进口文件落在同一报告期，同一产品数量相加
    data.write_csv(
        "import",
        "a.csv",
        &customs_rows("Импорт за январь 2017", &[("2601", "3"), ("7208", "1,5")]),
    );
    data.write_csv(
        "import",
        "b.csv",
        &customs_rows("Импорт за январь 2017", &[("260112", "2")]),
    );
    data.write_csv(
        "export",
        "c.csv",
        &customs_rows(
            "Экспорт за январь 2017",
            &[("2601", "40"), ("7304", "7"), ("7208 (кроме проката)", "9")],
        ),
    );

    let manager = data.manager();
    let outcome = DemandPipeline::new(&manager).run().unwrap();

    let ore_jan = outcome
        .records
        .iter()
        .find(|r| r.product == "Руда железная товарная необогащенная" && r.month == 1)
        .unwrap();
    assert_eq!(ore_jan.production, Some(100.0));
    assert_eq!(ore_jan.import, Some(5.0));
    assert_eq!(ore_jan.export, Some(40.0));
    assert_eq!(ore_jan.demand, Some(65.0));

    let rolled_feb = outcome
        .records
        .iter()
        .find(|r| r.product == "Прокат готовый" && r.month == 2)
        .unwrap();
    assert_eq!(rolled_feb.production, None);

    let rolled_jan = outcome
        .records
        .iter()
        .find(|r| r.product == "Прокат готовый" && r.month == 1)
        .unwrap();
    assert_eq!(rolled_jan.import, Some(1.5));
    // 排除项 7208 (кроме ...) 不计入出口
    assert_eq!(rolled_jan.export, None);
    assert_eq!(rolled_jan.demand, None);

    let pipes = outcome
        .records
        .iter()
        .find(|r| r.product.starts_with("Трубы"))
        .unwrap();
    assert_eq!(pipes.export, Some(7.0));
    assert_eq!(pipes.production, None);
    assert_eq!(pipes.demand, None);

    // 排序: 产品名 → 年 → 月
    let keys: Vec<_> = outcome
        .records
        .iter()
        .map(|r| (r.product.clone(), r.year, r.month))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    assert_eq!(outcome.report.files_processed, 4);
    assert_eq!(outcome.report.files_skipped, 0);
    assert!(!PIPES.is_empty());
}

#[test]
fn test_production_walk_rolls_into_next_year() {
    logging::init_test();
    let data = TestDataDir::new();
    let values: Vec<String> = (1..=13).map(|v| v.to_string()).collect();
    let value_refs: Vec<&str> = values.iter().map(String::as_str).collect();
    data.write_csv(
        "production",
        "production.csv",
        &production_rows(&[(ORE, value_refs)]),
    );

    let manager = data.manager();
    let outcome = DemandPipeline::new(&manager).run().unwrap();

    assert_eq!(outcome.records.len(), 13);
    assert!(outcome.records[..12].iter().all(|r| r.year == 2017));
    assert_eq!(
        (outcome.records[12].year, outcome.records[12].month),
        (2018, 1)
    );
    assert_eq!(outcome.records[12].production, Some(13.0));
}

#[test]
fn test_unrecognized_files_are_skipped_with_diagnostics() {
    logging::init_test();
    let data = TestDataDir::new();
    data.write_csv(
        "import",
        "no_period.csv",
        &customs_rows("Импорт важнейших товаров", &[("7208", "1")]),
    );
    data.write_csv(
        "import",
        "no_header.csv",
        &[vec!["Импорт за март 2021"], vec!["7208", "1"]],
    );
    data.write_csv(
        "export",
        "no_quantity.csv",
        &[
            vec!["Экспорт за март 2021", "", ""],
            vec!["Код ТН ВЭД", "Наименование", "Стоимость, тыс. долл. США"],
            vec!["7208", "Прокат", "10"],
        ],
    );
    data.write_csv(
        "export",
        "good.csv",
        &customs_rows("Экспорт за март 2021", &[("7306", "2")]),
    );
    data.write_bytes("export", "readme.txt", b"not a table");

    let manager = data.manager();
    let outcome = DemandPipeline::new(&manager).run().unwrap();

    // 产量目录为空 + 3 个无法识别的海关文件
    assert_eq!(outcome.report.files_skipped, 4);
    assert_eq!(outcome.report.files_processed, 1);

    let reasons: Vec<_> = outcome
        .report
        .diagnostics
        .iter()
        .map(|d| (d.metric, d.reason.clone()))
        .collect();
    assert!(reasons.contains(&(MetricKind::Production, SkipReason::NoSourceFile)));
    assert!(reasons.contains(&(MetricKind::Import, SkipReason::NoPeriod)));
    assert!(reasons.contains(&(MetricKind::Import, SkipReason::NoHeader)));
    assert!(reasons.contains(&(MetricKind::Export, SkipReason::NoQuantityColumn)));

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].export, Some(2.0));
}

#[test]
fn test_outputs_written_to_disk() {
    logging::init_test();
    let data = TestDataDir::new();
    data.write_csv(
        "export",
        "exp.csv",
        &customs_rows("Экспорт за декабрь 2024", &[("7218", "0,75")]),
    );

    let manager = data.manager();
    let outcome = DemandPipeline::new(&manager).run().unwrap();

    let output = &manager.config().output_file;
    DemandTableWriter.write(output, &outcome.records).unwrap();
    let report_path = data.root().join("out").join("report.json");
    write_report_json(&report_path, &outcome.report).unwrap();

    let content = fs::read_to_string(output).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines[0], "Year,Month,Product,Production,Import,Export,Demand");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("2024,12,"));
    assert!(lines[1].ends_with(",,,0.75,"));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["output_rows"], 1);
}
