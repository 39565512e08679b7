// ==========================================
// NFL 数据 ETL - 分析型存储 Trait
// ==========================================
// 职责: 定义装载管道依赖的外部存储接口（不包含实现）
// 实现者: DuckDbStore；测试中为记录型 Mock
// ==========================================

use crate::domain::load::DatasetOutcome;
use crate::domain::manifest::Manifest;
use crate::domain::types::TableRef;
use crate::pipeline::error::{PipelineResult, StoreResult};
use chrono::{DateTime, Utc};
use uuid::Uuid;

// ==========================================
// AnalyticalStore Trait
// ==========================================
// 单线程同步使用；连接由调用方在进程内打开一次并按引用传入
pub trait AnalyticalStore {
    /// 将清单中所有资源作为一个合并关系读入暂存表（阶段: Extract）
    ///
    /// # 返回
    /// - Ok(u64): 暂存行数
    /// - Err: 资源不存在、各文件 schema 不一致等
    fn stage_manifest(&self, staging: &str, manifest: &Manifest) -> StoreResult<u64>;

    /// 为暂存表追加装载时间列（阶段: Transform）
    fn append_timestamp_column(
        &self,
        staging: &str,
        column: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// 以暂存表整体替换目标表（阶段: Load）
    ///
    /// 建 schema → 删旧表 → 建新表 在同一事务内完成；
    /// 失败时回滚，旧表保持为当前表
    ///
    /// # 返回
    /// - Ok(u64): 目标表行数
    fn replace_table(&self, target: &TableRef, staging: &str) -> StoreResult<u64>;

    /// 删除暂存表（不存在时不报错）
    fn drop_staging(&self, staging: &str) -> StoreResult<()>;

    /// 关闭连接
    fn release(self) -> StoreResult<()>
    where
        Self: Sized;
}

// ==========================================
// LoadAuditSink Trait
// ==========================================
// 用途: 记录批次中每个数据集的装载结局
// 实现者: LoadLogRepository
pub trait LoadAuditSink {
    fn record(&self, run_id: Uuid, outcome: &DatasetOutcome) -> PipelineResult<()>;
}
