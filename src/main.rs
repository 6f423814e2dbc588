// ==========================================
// 坐席产能规划系统 - 命令行入口
// ==========================================
// 用法:
//   capacity-planner <due_dates> <assignments> <associates> <config.json> [reference_date] [output.csv]
//
// - 输入文件支持 .csv / .xlsx / .xls
// - reference_date 格式 YYYY-MM-DD,缺省取本地当天
// - 指定 output.csv 时同时写出 <output>.report.json
// ==========================================

use anyhow::{bail, Context, Result};
use capacity_planner::exporter::DecisionWriter;
use capacity_planner::importer::RecordLoader;
use capacity_planner::{logging, AssignmentOrchestrator, PlanningConfig};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

const USAGE: &str = "用法: capacity-planner <due_dates> <assignments> <associates> <config.json> [reference_date] [output.csv]";

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        bail!("参数不足\n{}", USAGE);
    }

    tracing::info!("==================================================");
    tracing::info!("{} v{}", capacity_planner::APP_NAME, capacity_planner::VERSION);
    tracing::info!("==================================================");

    let reference_date = match args.get(4).map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("基准日格式错误: {}", raw))?,
        None => Local::now().date_naive(),
    };
    let output_path = args.get(5).map(PathBuf::from);

    // 配置错误为全局致命错误
    let config = PlanningConfig::from_file(&args[3])
        .with_context(|| format!("加载配置失败: {}", args[3]))?;

    let inputs = RecordLoader::new()
        .load_all(
            PathBuf::from(&args[0]),
            PathBuf::from(&args[1]),
            PathBuf::from(&args[2]),
        )
        .context("加载输入记录失败")?;

    let report = AssignmentOrchestrator::new()
        .run_parallel(
            &inputs.due_dates,
            &inputs.assignments,
            &inputs.associates,
            &config,
            reference_date,
        )
        .await?;

    for evaluation in &report.evaluations {
        tracing::info!(
            associate = %evaluation.associate_name,
            customers = evaluation.customer_count,
            assigned = evaluation.assigned(),
            peak_workload = evaluation.outcome.peak_workload,
            peak_headroom = evaluation.outcome.peak_headroom,
            "坐席判定"
        );
    }
    for exclusion in &report.exclusions {
        tracing::warn!(
            associate = %exclusion.associate_name,
            customers = exclusion.customer_ids.len(),
            error = %exclusion.error,
            "坐席已排除"
        );
    }

    let writer = DecisionWriter;
    match output_path {
        Some(path) => {
            writer.write_csv(&path, &report.decisions)?;
            writer.write_report_json(path.with_extension("report.json"), &report)?;
        }
        None => writer.write_csv_to(std::io::stdout().lock(), &report.decisions)?,
    }

    Ok(())
}
