// ==========================================
// NFL 数据 ETL - 装载管道错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::load::LoadStage;
use crate::engine::error::ResolveError;
use thiserror::Error;

// ==========================================
// StoreError - 分析型存储错误
// ==========================================
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("数据库连接失败: {0}")]
    Connection(String),

    #[error("数据库事务失败: {0}")]
    Transaction(String),

    #[error("数据库查询失败: {0}")]
    Query(String),
}

// 实现 From<duckdb::Error>
impl From<duckdb::Error> for StoreError {
    fn from(err: duckdb::Error) -> Self {
        StoreError::Query(err.to_string())
    }
}

/// Result 类型别名
pub type StoreResult<T> = Result<T, StoreError>;

// ==========================================
// PipelineError - 装载管道错误
// ==========================================
#[derive(Error, Debug)]
pub enum PipelineError {
    // ===== 解析阶段 =====
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    // ===== 装载阶段 =====
    #[error("读取清单失败 ({} 个资源): {message}", .manifest.len())]
    Extraction {
        manifest: Vec<String>,
        message: String,
    },

    #[error("追加装载时间列失败: {message}")]
    Transform { message: String },

    #[error("替换目标表失败 ({table}): {message}")]
    Load { table: String, message: String },

    // ===== 基础设施 =====
    #[error("审计记录写入失败: {0}")]
    Audit(String),

    #[error("连接释放失败: {0}")]
    Release(String),
}

impl PipelineError {
    /// 出错所在阶段
    pub fn stage(&self) -> LoadStage {
        match self {
            PipelineError::Resolve(_) => LoadStage::Resolve,
            PipelineError::Extraction { .. } => LoadStage::Extract,
            PipelineError::Transform { .. } => LoadStage::Transform,
            PipelineError::Load { .. } | PipelineError::Audit(_) => LoadStage::Load,
            PipelineError::Release(_) => LoadStage::Release,
        }
    }
}

/// Result 类型别名
pub type PipelineResult<T> = Result<T, PipelineError>;
