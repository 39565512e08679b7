// ==========================================
// NFL 数据 ETL - 核心库
// ==========================================
// 数据源: nflverse-data GitHub Release
// 技术栈: Rust + DuckDB
// 数据流: 目录 → 年份解析 → 清单 → 读取 → 打时间戳 → 整表替换
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 数据集、清单、装载状态
pub mod domain;

// 引擎层 - 年份解析与清单构建
pub mod engine;

// 管道层 - Extract / Transform / Load
pub mod pipeline;

// 数据仓储层 - 审计台账
pub mod repository;

// 配置层 - 运行配置与内置目录
pub mod config;

// 数据库基础设施（连接初始化/标识符引用）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    BatchReport, DatasetEntry, DatasetOutcome, FileFormat, LoadReport, LoadRequest, LoadStage,
    LoadState, Manifest, PathSpec, TableRef, YearSpec, YearValue,
};

// 引擎
pub use engine::{
    DatasetCatalog, FixedSeason, LatestSeason, LoadJob, ManifestBuilder, ResolveError,
    ResolvedYears, WallClockSeason, YearRangeResolver,
};

// 管道
pub use pipeline::{
    load_and_release, AnalyticalStore, BatchRunner, DuckDbStore, LoadAuditSink, LoadPipeline,
    PipelineError,
};

// 配置与仓储
pub use config::{ConfigError, EtlConfig};
pub use repository::{LoadLogEntry, LoadLogRepository};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "NFL 数据 ETL";

// nflverse Release 下载根地址
pub const NFLVERSE_DATA_URL: &str = "https://github.com/nflverse/nflverse-data/releases/download";

// 默认目标 schema
pub const DEFAULT_SCHEMA: &str = "BASE";
