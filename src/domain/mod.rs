// ==========================================
// NFL 数据 ETL - 领域模型层
// ==========================================
// 职责: 定义数据集、清单、装载状态等领域类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod dataset;
pub mod load;
pub mod manifest;
pub mod types;

// 重导出核心类型
pub use dataset::{DatasetEntry, PathSpec};
pub use load::{BatchReport, DatasetOutcome, LoadReport, LoadRequest, LoadStage, LoadState};
pub use manifest::Manifest;
pub use types::{FileFormat, TableRef, YearSpec, YearValue};
