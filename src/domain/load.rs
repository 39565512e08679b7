// ==========================================
// NFL 数据 ETL - 装载领域模型
// ==========================================
// 职责: 装载请求、状态机、单表报告、批次报告
// ==========================================

use crate::domain::manifest::Manifest;
use crate::domain::types::TableRef;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

// ==========================================
// LoadStage - 装载阶段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadStage {
    Resolve,   // 年份解析 / 清单构建
    Extract,   // 读取清单资源
    Transform, // 追加装载时间列
    Load,      // 替换目标表
    Release,   // 释放连接
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStage::Resolve => write!(f, "RESOLVE"),
            LoadStage::Extract => write!(f, "EXTRACT"),
            LoadStage::Transform => write!(f, "TRANSFORM"),
            LoadStage::Load => write!(f, "LOAD"),
            LoadStage::Release => write!(f, "RELEASE"),
        }
    }
}

// ==========================================
// LoadState - 装载状态机
// ==========================================
// Pending → Extracted → Transformed → Loaded（终态）
// 任一阶段失败 → Failed（终态），后续阶段不再执行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadState {
    Pending,
    Extracted,
    Transformed,
    Loaded,
    Failed(LoadStage),
}

impl LoadState {
    /// 成功推进到下一状态；终态不可推进
    pub fn advance(self) -> Option<LoadState> {
        match self {
            LoadState::Pending => Some(LoadState::Extracted),
            LoadState::Extracted => Some(LoadState::Transformed),
            LoadState::Transformed => Some(LoadState::Loaded),
            LoadState::Loaded | LoadState::Failed(_) => None,
        }
    }

    /// 当前状态下正在执行的阶段
    pub fn next_stage(self) -> Option<LoadStage> {
        match self {
            LoadState::Pending => Some(LoadStage::Extract),
            LoadState::Extracted => Some(LoadStage::Transform),
            LoadState::Transformed => Some(LoadStage::Load),
            LoadState::Loaded | LoadState::Failed(_) => None,
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Pending => write!(f, "PENDING"),
            LoadState::Extracted => write!(f, "EXTRACTED"),
            LoadState::Transformed => write!(f, "TRANSFORMED"),
            LoadState::Loaded => write!(f, "LOADED"),
            LoadState::Failed(stage) => write!(f, "FAILED({})", stage),
        }
    }
}

// ==========================================
// LoadRequest - 单表装载请求
// ==========================================
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub dataset: String,
    pub manifest: Manifest,
    pub target: TableRef,
}

// ==========================================
// LoadReport - 单表装载结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub dataset: String,
    pub target: TableRef,
    pub manifest_size: usize,
    pub row_count: u64,
    pub loaded_at: DateTime<Utc>,
    pub state: LoadState,
}

// ==========================================
// DatasetOutcome - 批次中单个数据集的结局
// ==========================================
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatasetOutcome {
    Succeeded(LoadReport),
    Failed {
        dataset: String,
        target: Option<TableRef>,
        stage: LoadStage,
        manifest_size: usize,
        error: String,
    },
}

impl DatasetOutcome {
    pub fn dataset(&self) -> &str {
        match self {
            DatasetOutcome::Succeeded(report) => &report.dataset,
            DatasetOutcome::Failed { dataset, .. } => dataset,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DatasetOutcome::Succeeded(_))
    }

    /// 失败阶段（成功时为 None）
    pub fn failed_stage(&self) -> Option<LoadStage> {
        match self {
            DatasetOutcome::Succeeded(_) => None,
            DatasetOutcome::Failed { stage, .. } => Some(*stage),
        }
    }
}

// ==========================================
// BatchReport - 批次报告
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub outcomes: Vec<DatasetOutcome>,
}

impl BatchReport {
    pub fn start() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            outcomes: Vec::new(),
        }
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.succeeded_count()
    }

    pub fn outcome(&self, dataset: &str) -> Option<&DatasetOutcome> {
        self.outcomes.iter().find(|o| o.dataset() == dataset)
    }
}
