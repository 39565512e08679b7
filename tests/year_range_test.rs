// ==========================================
// 年份解析与清单构建 集成测试
// ==========================================
// 测试目标: 通过公开 API 验证年份区间与定位符规则
// ==========================================


use nfl_etl::domain::types::{FileFormat, YearSpec};
use nfl_etl::engine::{
    DatasetCatalog, FixedSeason, LoadJob, ManifestBuilder, ResolveError, YearRangeResolver,
};
use nfl_etl::{logging, DatasetEntry, NFLVERSE_DATA_URL};
use test_helpers::TEST_LATEST_YEAR;

fn resolver() -> YearRangeResolver {
    YearRangeResolver::from_season(&FixedSeason(TEST_LATEST_YEAR))
}

fn builder() -> ManifestBuilder {
    ManifestBuilder::new(NFLVERSE_DATA_URL, FileFormat::Parquet, resolver())
}

#[test]
fn test_scalar_years_up_to_latest() {
    logging::init_test();
    for y in 1999..=TEST_LATEST_YEAR {
        let resolved = resolver().resolve(&YearSpec::from(y), None).unwrap();
        assert_eq!(resolved, vec![y]);
    }
    println!("✓ 标量年份 ≤ 最新赛季均解析为单元素");
}

#[test]
fn test_future_years_rejected() {
    for y in [TEST_LATEST_YEAR + 1, TEST_LATEST_YEAR + 10] {
        let err = resolver().resolve(&YearSpec::from(y), None).unwrap_err();
        assert!(err.is_range_error());
    }
    let err = resolver()
        .resolve(&YearSpec::from(vec![2020, 2030]), None)
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::ExceedsLatest {
            year: 2030,
            latest_year: TEST_LATEST_YEAR
        }
    );
}

#[test]
fn test_non_numeric_string_rejected() {
    let err = resolver()
        .resolve(&YearSpec::from("$312"), None)
        .unwrap_err();
    assert!(err.is_parse_error());
    assert!(err.to_string().contains("$312"));
}

#[test]
fn test_gap_filling_order_and_dedup() {
    let r = resolver();
    assert_eq!(
        r.resolve(&YearSpec::from(vec![2022, 2024]), None).unwrap(),
        vec![2022, 2023, 2024]
    );
    assert_eq!(
        r.resolve(&YearSpec::from(vec![2022, 2020]), None).unwrap(),
        vec![2020, 2021, 2022]
    );
    assert_eq!(
        r.resolve(&YearSpec::from(vec![2022, 2022]), None).unwrap(),
        vec![2022]
    );
}

#[test]
fn test_string_coercion() {
    let r = resolver();
    assert_eq!(
        r.resolve(&YearSpec::from(vec!["2022"]), None).unwrap(),
        vec![2022]
    );
    assert_eq!(r.resolve(&YearSpec::from("2023"), None).unwrap(), vec![2023]);
}

#[test]
fn test_floor_truncation_is_not_an_error() {
    logging::init_test();
    let resolved = resolver()
        .resolve(&YearSpec::from(vec![2021, 2024]), Some(2022))
        .unwrap();
    assert_eq!(resolved, vec![2022, 2023, 2024]);
    assert_eq!(resolved.truncated_at(), Some(2022));

    // 恰好从 min_year 开始: 不截断
    let exact = resolver()
        .resolve(&YearSpec::from(vec![2022, 2024]), Some(2022))
        .unwrap();
    assert_eq!(exact.truncated_at(), None);
}

#[test]
fn test_manifest_shapes() {
    let b = builder();

    let single = b.build("snap_counts", "snap_counts", None, None).unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(
        single.locators()[0],
        format!("{}/snap_counts/snap_counts.parquet", NFLVERSE_DATA_URL)
    );

    let years = YearSpec::from(vec![2022, 2024]);
    let ftn = b
        .build("ftn_charting", "ftn_charting", Some(&years), None)
        .unwrap();
    let expected: Vec<String> = (2022..=2024)
        .map(|y| format!("{}/ftn_charting/ftn_charting_{}.parquet", NFLVERSE_DATA_URL, y))
        .collect();
    assert_eq!(ftn.locators(), expected.as_slice());
}

#[test]
fn test_manifest_entirely_below_floor() {
    let years = YearSpec::from(vec![2010]);
    let err = builder()
        .build("ftn_charting", "ftn_charting", Some(&years), Some(2022))
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::BelowFloor {
            min_year: 2022,
            requested_max: 2010
        }
    );
    assert!(err.is_range_error());
}

#[test]
fn test_catalog_product_ordering() {
    let catalog = DatasetCatalog::new(vec![DatasetEntry::new(
        "nextgen_stats",
        &["ngs_a", "ngs_b"],
        Some(2016),
    )
    .with_metadata(&["passing", "rushing"])]);

    let request = catalog
        .plan(
            &LoadJob::new("nextgen_stats").with_years(vec![2023, 2024]),
            &builder(),
            "BASE",
        )
        .unwrap();

    let stems: Vec<&str> = request
        .manifest
        .iter()
        .map(|l| l.rsplit('/').next().unwrap_or(""))
        .collect();
    assert_eq!(
        stems,
        vec![
            "ngs_a_2023_passing.parquet",
            "ngs_a_2023_rushing.parquet",
            "ngs_a_2024_passing.parquet",
            "ngs_a_2024_rushing.parquet",
            "ngs_b_2023_passing.parquet",
            "ngs_b_2023_rushing.parquet",
            "ngs_b_2024_passing.parquet",
            "ngs_b_2024_rushing.parquet",
        ]
    );
    assert_eq!(request.target.to_string(), "BASE.NEXTGEN_STATS");
    println!("✓ 笛卡尔积顺序: 路径 → 年份 → 后缀");
}
