// ==========================================
// NFL 数据 ETL - 仓储层
// ==========================================
// 职责: 审计台账持久化（ETL_AUDIT.LOAD_LOG）
// 红线: Repository 不含业务规则，只做数据映射
// ==========================================

pub mod error;
pub mod load_log_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use load_log_repo::{LoadLogEntry, LoadLogRepository};
