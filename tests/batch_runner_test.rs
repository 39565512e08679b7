// ==========================================
// BatchRunner 集成测试（DuckDB + 审计台账）
// ==========================================
// 测试目标:
// - 单个数据集失败不影响同批次其他数据集
// - 每个数据集的结局写入 ETL_AUDIT.LOAD_LOG
// - 配置驱动的默认窗口装载
// ==========================================


use nfl_etl::config::EtlConfig;
use nfl_etl::db::open_duckdb_connection;
use nfl_etl::engine::{DatasetCatalog, LoadJob};
use nfl_etl::pipeline::{BatchRunner, DuckDbStore, LoadAuditSink};
use nfl_etl::repository::LoadLogRepository;
use nfl_etl::{logging, DatasetEntry, LoadStage};
use test_helpers::{count_rows, create_fixture_root, create_test_db, local_builder};

fn catalog() -> DatasetCatalog {
    DatasetCatalog::new(vec![
        DatasetEntry::new("snap_counts", &["snap_counts"], Some(2012)),
        DatasetEntry::new("players", &["players"], None),
        DatasetEntry::new("qbr_season", &["qbr_season_level"], None).with_category("espn_data"),
    ])
}

#[test]
fn test_failure_isolation_with_audit() {
    logging::init_test();
    let root = create_fixture_root().unwrap();
    // snap_counts 缺少 2024 文件 → 读取失败
    test_helpers::write_season_files(root.path(), "snap_counts", "snap_counts", 2022..=2023, 3)
        .unwrap();
    test_helpers::write_parquet(root.path(), "players", "players", 2024, 7).unwrap();
    test_helpers::write_parquet(root.path(), "espn_data", "qbr_season_level", 2024, 2).unwrap();

    let runner = BatchRunner::new(catalog(), local_builder(root.path()), "BASE");
    let jobs = vec![
        LoadJob::new("snap_counts").with_years(vec![2022, 2024]),
        LoadJob::new("players"),
        LoadJob::new("qbr_season"),
        LoadJob::new("not_in_catalog"),
    ];

    let store = DuckDbStore::open_in_memory().unwrap();
    let repo = LoadLogRepository::new(store.connection());
    repo.ensure_table().unwrap();

    let report = runner.run(&store, &jobs, Some(&repo as &dyn LoadAuditSink));

    assert_eq!(report.succeeded_count(), 2);
    assert_eq!(report.failed_count(), 2);
    assert_eq!(
        report.outcome("snap_counts").unwrap().failed_stage(),
        Some(LoadStage::Extract)
    );
    assert_eq!(
        report.outcome("not_in_catalog").unwrap().failed_stage(),
        Some(LoadStage::Resolve)
    );
    assert_eq!(count_rows(store.connection(), "\"BASE\".\"PLAYERS\"").unwrap(), 7);
    assert_eq!(count_rows(store.connection(), "\"BASE\".\"QBR_SEASON\"").unwrap(), 2);

    let entries = repo.list_by_run(report.run_id).unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries.iter().filter(|e| e.status == "FAILED").count(), 2);
    let players = entries.iter().find(|e| e.dataset == "players").unwrap();
    assert_eq!(players.row_count, Some(7));
    assert_eq!(players.target_table.as_deref(), Some("BASE.PLAYERS"));
    println!("✓ 失败隔离 + 审计台账");
}

#[test]
fn test_failed_dataset_keeps_table_from_previous_batch() {
    let root = create_fixture_root().unwrap();
    test_helpers::write_parquet(root.path(), "players", "players", 2024, 3).unwrap();

    let runner = BatchRunner::new(catalog(), local_builder(root.path()), "BASE");
    let store = DuckDbStore::open_in_memory().unwrap();

    let first = runner.run(&store, &[LoadJob::new("players")], None);
    assert_eq!(first.succeeded_count(), 1);

    std::fs::remove_file(root.path().join("players/players.parquet")).unwrap();
    let second = runner.run(&store, &[LoadJob::new("players")], None);
    assert_eq!(second.failed_count(), 1);
    assert_eq!(count_rows(store.connection(), "\"BASE\".\"PLAYERS\"").unwrap(), 3);
}

#[test]
fn test_config_driven_run_and_release() {
    logging::init_test();
    let root = create_fixture_root().unwrap();
    test_helpers::write_season_files(root.path(), "snap_counts", "snap_counts", 2022..=2024, 2)
        .unwrap();
    let (_db_dir, db_path) = create_test_db().unwrap();

    let raw = serde_json::json!({
        "schema": "NFL",
        "base_url": root.path().to_string_lossy(),
        "latest_year": 2024,
        "catalog": [
            {"name": "snap_counts", "paths": ["snap_counts"], "min_year": 2022}
        ]
    })
    .to_string();
    let config = EtlConfig::from_json(&raw).unwrap();
    let jobs = config.effective_jobs();
    assert_eq!(jobs.len(), 1);

    let store = DuckDbStore::open(&db_path).unwrap();
    let report = config
        .build_runner()
        .run_and_release(store, &jobs)
        .expect("Batch failed");
    assert_eq!(report.succeeded_count(), 1);

    // 未指定年份: 装载 [min_year, 最新赛季] 共 3 个文件
    let conn = open_duckdb_connection(&db_path).unwrap();
    assert_eq!(count_rows(&conn, "\"NFL\".\"SNAP_COUNTS\"").unwrap(), 6);
}
