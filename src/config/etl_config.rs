// ==========================================
// NFL 数据 ETL - 运行配置
// ==========================================
// 格式: JSON 文件，所有字段均有默认值
// 职责: 配置加载、校验、数据库路径解析、组装批次执行器
// ==========================================

use crate::config::default_catalog::default_catalog;
use crate::domain::dataset::DatasetEntry;
use crate::domain::types::FileFormat;
use crate::engine::catalog::{DatasetCatalog, LoadJob};
use crate::engine::manifest::ManifestBuilder;
use crate::engine::season::{FixedSeason, LatestSeason, WallClockSeason};
use crate::engine::year_range::YearRangeResolver;
use crate::pipeline::batch::BatchRunner;
use crate::{DEFAULT_SCHEMA, NFLVERSE_DATA_URL};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "NFL_ETL_DB_PATH";

const DB_FILE_NAME: &str = "nfl_etl.duckdb";

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("读取配置文件失败 ({path}): {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置校验失败: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// EtlConfig - 运行配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    /// DuckDB 文件路径；None 时按环境变量 / 用户数据目录推导
    pub db_path: Option<String>,

    /// 目标 schema
    pub schema: String,

    /// nflverse Release 根地址（也可以是本地目录）
    pub base_url: String,

    pub filetype: FileFormat,

    /// 最新赛季覆写；None 时按挂钟推导
    pub latest_year: Option<i32>,

    /// 是否写入 ETL_AUDIT.LOAD_LOG
    pub audit: bool,

    pub catalog: Vec<DatasetEntry>,

    /// 装载任务；为空时目录中每个数据集一个任务
    pub jobs: Vec<LoadJob>,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            schema: DEFAULT_SCHEMA.to_string(),
            base_url: NFLVERSE_DATA_URL.to_string(),
            filetype: FileFormat::default(),
            latest_year: None,
            audit: true,
            catalog: default_catalog(),
            jobs: Vec::new(),
        }
    }
}

impl EtlConfig {
    /// 从 JSON 文件加载并校验
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&raw).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        debug!(path = %path.display(), datasets = config.catalog.len(), "配置已加载");
        Ok(config)
    }

    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let config: EtlConfig = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置
    ///
    /// # 规则
    /// - schema / base_url 非空
    /// - 目录条目名唯一，且至少有一个路径片段
    /// - 任务引用的数据集必须在目录中
    pub fn validate(&self) -> ConfigResult<()> {
        if self.schema.trim().is_empty() {
            return Err(ConfigError::Invalid("schema 不能为空".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url 不能为空".to_string()));
        }

        let mut names = HashSet::new();
        for entry in &self.catalog {
            if !names.insert(entry.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "数据集重复定义: {}",
                    entry.name
                )));
            }
            if entry.paths.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "数据集 {} 未配置路径片段",
                    entry.name
                )));
            }
        }

        for job in &self.jobs {
            if !names.contains(job.dataset.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "装载任务引用了未知数据集: {}",
                    job.dataset
                )));
            }
        }
        Ok(())
    }

    /// 实际执行的任务列表
    pub fn effective_jobs(&self) -> Vec<LoadJob> {
        if self.jobs.is_empty() {
            self.catalog.iter().map(|e| LoadJob::new(&e.name)).collect()
        } else {
            self.jobs.clone()
        }
    }

    /// 数据库路径: 环境变量 → 配置 → 用户数据目录 → 当前目录
    pub fn resolved_db_path(&self) -> String {
        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }

        if let Some(path) = self.db_path.as_deref().map(str::trim) {
            if !path.is_empty() {
                return path.to_string();
            }
        }

        let mut path = PathBuf::from(".").join(DB_FILE_NAME);
        if let Some(data_dir) = dirs::data_dir() {
            let dir = data_dir.join("nfl-etl");
            // 目录创建失败时退回当前目录
            if std::fs::create_dir_all(&dir).is_ok() {
                path = dir.join(DB_FILE_NAME);
            }
        }
        path.to_string_lossy().to_string()
    }

    /// 最新赛季策略
    pub fn latest_season(&self) -> Box<dyn LatestSeason> {
        match self.latest_year {
            Some(year) => Box::new(FixedSeason(year)),
            None => Box::new(WallClockSeason),
        }
    }

    /// 组装批次执行器（目录构造后只读）
    pub fn build_runner(&self) -> BatchRunner {
        let season = self.latest_season();
        let resolver = YearRangeResolver::from_season(season.as_ref());
        let builder = ManifestBuilder::new(&self.base_url, self.filetype, resolver);
        BatchRunner::new(
            DatasetCatalog::new(self.catalog.clone()),
            builder,
            &self.schema,
        )
    }
}
