// ==========================================
// NFL 数据 ETL - 解析层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 年份解析 / 清单构建 / 目录查询错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    // ===== 解析错误 =====
    #[error("年份无法转换为整数: {value:?}")]
    Parse { value: String },

    #[error("年份列表为空")]
    EmptySelection,

    // ===== 范围错误 =====
    #[error("年份 {year} 超出最新赛季 {latest_year}")]
    ExceedsLatest { year: i32, latest_year: i32 },

    #[error("年份 {year} 早于联盟首个赛季 {earliest}")]
    BeforeEarliest { year: i32, earliest: i32 },

    #[error("数据最早自 {min_year} 年起可用，请求的年份（最大 {requested_max}）全部早于该年份")]
    BelowFloor { min_year: i32, requested_max: i32 },

    // ===== 目录错误 =====
    #[error("未知数据集: {0}")]
    UnknownDataset(String),
}

impl ResolveError {
    /// 是否属于范围错误（超出最新赛季 / 早于首个赛季 / 全部早于最早年份）
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            ResolveError::ExceedsLatest { .. }
                | ResolveError::BeforeEarliest { .. }
                | ResolveError::BelowFloor { .. }
        )
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, ResolveError::Parse { .. } | ResolveError::EmptySelection)
    }
}

/// Result 类型别名
pub type ResolveResult<T> = Result<T, ResolveError>;
