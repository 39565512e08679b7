// ==========================================
// NFL 数据 ETL - 配置层
// ==========================================
// 职责: 运行配置加载与校验，内置数据集目录
// ==========================================

pub mod default_catalog;
pub mod etl_config;

pub use default_catalog::default_catalog;
pub use etl_config::{ConfigError, ConfigResult, EtlConfig, DB_PATH_ENV};
