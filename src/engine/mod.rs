// ==========================================
// NFL 数据 ETL - 解析引擎层
// ==========================================
// 数据流: DatasetCatalog → YearRangeResolver → ManifestBuilder
// 红线: 纯数据计算，不接触外部存储
// ==========================================

pub mod catalog;
pub mod error;
pub mod manifest;
pub mod season;
pub mod year_range;

pub use catalog::{DatasetCatalog, LoadJob};
pub use error::{ResolveError, ResolveResult};
pub use manifest::ManifestBuilder;
pub use season::{season_for_date, FixedSeason, LatestSeason, WallClockSeason};
pub use year_range::{ResolvedYears, YearRangeResolver};
