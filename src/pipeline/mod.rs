// ==========================================
// NFL 数据 ETL - 装载管道层
// ==========================================
// 职责: Extract → Transform → Load，整体替换目标表
// 存储: DuckDB（通过 AnalyticalStore 接口）
// ==========================================

pub mod batch;
pub mod duckdb_store;
pub mod error;
pub mod load_pipeline;
pub mod store_trait;

// 重导出核心类型
pub use batch::BatchRunner;
pub use duckdb_store::DuckDbStore;
pub use error::{PipelineError, PipelineResult, StoreError, StoreResult};
pub use load_pipeline::{load_and_release, LoadPipeline, LOAD_TIMESTAMP_COLUMN};

// 重导出 Trait 接口
pub use store_trait::{AnalyticalStore, LoadAuditSink};
