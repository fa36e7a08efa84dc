// ==========================================
// 冶金产品表观需求台账 - 命令行入口
// ==========================================
// 子命令:
//   demand           生成 产量/进口/出口/需求 台账（默认）
//   regional-shares  地区用电占比表
// 退出码: 跳过文件不影响退出码；配置无效或输出失败 → 非 0
// ==========================================

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use metallurgy_demand::config::ConfigManager;
use metallurgy_demand::engine::RegionalShareEngine;
use metallurgy_demand::importer::{GridLoader, SheetSelector, UniversalGridLoader};
use metallurgy_demand::output::{write_report_json, DemandTableWriter, RegionalShareWriter};
use metallurgy_demand::pipeline::DemandPipeline;
use metallurgy_demand::{logging, APP_NAME, VERSION};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "metallurgy-demand",
    version,
    about = "冶金产品表观需求台账 - 海关/统计表格识别与合并"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// 日志详细程度（-v: debug，-vv: trace）
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// 生成需求台账
    Demand(DemandArgs),

    /// 生成地区用电占比表
    RegionalShares(RegionalArgs),
}

#[derive(Args, Default)]
struct DemandArgs {
    /// 数据根目录（含 production / import / export 子目录）
    #[arg(long = "data-dir", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// 台账输出文件
    #[arg(long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// 运行报告（JSON）
    #[arg(long = "report", value_name = "FILE")]
    report: Option<PathBuf>,

    /// 配置文件（JSON）
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct RegionalArgs {
    /// 电力平衡表文件
    #[arg(long = "input", value_name = "FILE")]
    input: PathBuf,

    /// 工作表序号（从 0 开始，缺省取配置值）
    #[arg(long = "sheet", value_name = "N")]
    sheet: Option<usize>,

    /// 占比表输出文件
    #[arg(long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// 配置文件（JSON）
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::level_for_verbosity(cli.verbose));

    info!("==================================================");
    info!("{} v{}", APP_NAME, VERSION);
    info!("==================================================");

    match cli.command.unwrap_or_else(|| Command::Demand(DemandArgs::default())) {
        Command::Demand(args) => run_demand(args),
        Command::RegionalShares(args) => run_regional_shares(args),
    }
}

fn run_demand(args: DemandArgs) -> Result<()> {
    let mut manager = ConfigManager::load(args.config.as_deref()).context("配置加载失败")?;

    let config = manager.config_mut();
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(output) = args.output {
        config.output_file = output;
    }
    if let Some(report) = args.report {
        config.report_file = Some(report);
    }

    debug!(config = %manager.snapshot_json()?, "运行配置");

    let pipeline = DemandPipeline::new(&manager);
    let outcome = pipeline.run().context("源文件目录扫描失败")?;

    let config = manager.config();
    DemandTableWriter
        .write(&config.output_file, &outcome.records)
        .context("台账写出失败")?;

    if let Some(report_file) = &config.report_file {
        write_report_json(report_file, &outcome.report).context("运行报告写出失败")?;
    }

    info!(
        output = %config.output_file.display(),
        rows = outcome.records.len(),
        skipped = outcome.report.files_skipped,
        "完成"
    );
    Ok(())
}

fn run_regional_shares(args: RegionalArgs) -> Result<()> {
    let manager = ConfigManager::load(args.config.as_deref()).context("配置加载失败")?;
    let regional = manager.config().regional.clone();

    let sheet = SheetSelector::Index(args.sheet.unwrap_or(regional.sheet_index));
    let grid = UniversalGridLoader
        .load(&args.input, &sheet)
        .with_context(|| format!("无法读取电力平衡表: {}", args.input.display()))?;

    let output = args.output.unwrap_or_else(|| regional.output_file.clone());
    let table = RegionalShareEngine::new(regional).compute(&grid);
    RegionalShareWriter
        .write(&output, &table)
        .context("地区占比表写出失败")?;

    info!(output = %output.display(), regions = table.rows.len(), "完成");
    Ok(())
}
