// ==========================================
// NFL 数据 ETL - 命令行入口
// ==========================================
// 用法:
//   nfl-etl [config.json|-] [dataset ...]
//
// - 省略配置文件或传 "-" 时使用内置默认配置
// - 指定 dataset 时只装载这些数据集
// ==========================================

use anyhow::Context;
use nfl_etl::config::EtlConfig;
use nfl_etl::pipeline::{AnalyticalStore, DuckDbStore, LoadAuditSink};
use nfl_etl::repository::LoadLogRepository;
use nfl_etl::{logging, DatasetOutcome, APP_NAME, VERSION};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next().filter(|s| s.trim() != "-") {
        Some(path) => EtlConfig::from_path(&path)
            .with_context(|| format!("无法加载配置: {}", path))?,
        None => EtlConfig::default(),
    };

    let selected: Vec<String> = args.collect();
    let mut jobs = config.effective_jobs();
    if !selected.is_empty() {
        jobs.retain(|job| selected.iter().any(|name| name == &job.dataset));
        if jobs.is_empty() {
            anyhow::bail!("没有匹配的装载任务: {}", selected.join(", "));
        }
    }

    info!("==================================================");
    info!("{} v{}", APP_NAME, VERSION);
    info!("==================================================");

    let db_path = config.resolved_db_path();
    info!("使用数据库: {}", db_path);

    let runner = config.build_runner();
    info!(
        latest_year = runner.builder().resolver().latest_year(),
        datasets = jobs.len(),
        "装载计划已就绪"
    );

    let store = DuckDbStore::open(&db_path).context("无法打开 DuckDB")?;

    let report = {
        let audit_repo = LoadLogRepository::new(store.connection());
        let audit: Option<&dyn LoadAuditSink> = if !config.audit {
            None
        } else if let Err(e) = audit_repo.ensure_table() {
            warn!("审计表初始化失败，本次不记录审计: {}", e);
            None
        } else {
            Some(&audit_repo)
        };
        runner.run(&store, &jobs, audit)
    };

    store.release().context("释放 DuckDB 连接失败")?;

    for outcome in &report.outcomes {
        match outcome {
            DatasetOutcome::Succeeded(load) => {
                println!("✓ {:<28} {:>10} rows  {}", load.dataset, load.row_count, load.target);
            }
            DatasetOutcome::Failed {
                dataset,
                stage,
                error,
                ..
            } => {
                println!("✗ {:<28} [{}] {}", dataset, stage, error);
            }
        }
    }
    println!(
        "run_id={} succeeded={} failed={}",
        report.run_id,
        report.succeeded_count(),
        report.failed_count()
    );

    if report.failed_count() > 0 {
        std::process::exit(1);
    }
    Ok(())
}
