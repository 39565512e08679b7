// ==========================================
// NFL 数据 ETL - 数据集目录
// ==========================================
// 职责: 逻辑数据集名 → 路径规格展开；装载任务 → 装载请求
// 红线: 纯查找与组合展开，不做任何网络/IO
// 已知限制: 同名条目无法混用不同的展开方式（后缀展开 vs 仅年份），
//           这类冲突由调用方避免，目录不做检测
// ==========================================

use crate::domain::dataset::{DatasetEntry, PathSpec};
use crate::domain::load::LoadRequest;
use crate::domain::types::{TableRef, YearSpec};
use crate::engine::error::{ResolveError, ResolveResult};
use crate::engine::manifest::ManifestBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// LoadJob - 装载任务
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadJob {
    /// 目录中的数据集名
    pub dataset: String,

    /// 目标表名（缺省为数据集名），装载时统一大写
    #[serde(default)]
    pub table_name: Option<String>,

    /// 请求的年份；缺省时若数据集有 min_year 则装载 [min_year, 最新赛季]
    #[serde(default)]
    pub years: Option<YearSpec>,
}

impl LoadJob {
    pub fn new(dataset: &str) -> Self {
        Self {
            dataset: dataset.to_string(),
            table_name: None,
            years: None,
        }
    }

    pub fn with_table(mut self, table_name: &str) -> Self {
        self.table_name = Some(table_name.to_string());
        self
    }

    pub fn with_years(mut self, years: impl Into<YearSpec>) -> Self {
        self.years = Some(years.into());
        self
    }

    pub fn table_name(&self) -> &str {
        self.table_name.as_deref().unwrap_or(&self.dataset)
    }
}

// ==========================================
// DatasetCatalog - 数据集目录（只读）
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct DatasetCatalog {
    entries: Vec<DatasetEntry>,
    index: HashMap<String, usize>,
}

impl DatasetCatalog {
    /// 由配置构造；同名条目以先出现者为准
    pub fn new(entries: Vec<DatasetEntry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.name.clone()).or_insert(i);
        }
        Self { entries, index }
    }

    pub fn get(&self, name: &str) -> ResolveResult<&DatasetEntry> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| ResolveError::UnknownDataset(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// 按配置顺序遍历
    pub fn entries(&self) -> &[DatasetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 展开为路径规格: 路径片段 × 元数据后缀（路径片段优先）
    pub fn expand(&self, name: &str) -> ResolveResult<Vec<PathSpec>> {
        let entry = self.get(name)?;
        let mut specs = Vec::new();
        for fragment in &entry.paths {
            if entry.metadata.is_empty() {
                specs.push(PathSpec {
                    fragment: fragment.clone(),
                    min_year: entry.min_year,
                    metadata: None,
                });
            } else {
                for meta in &entry.metadata {
                    specs.push(PathSpec {
                        fragment: fragment.clone(),
                        min_year: entry.min_year,
                        metadata: Some(meta.clone()),
                    });
                }
            }
        }
        Ok(specs)
    }

    /// 装载任务 → 装载请求（目录 → 年份解析 → 清单）
    pub fn plan(
        &self,
        job: &LoadJob,
        builder: &ManifestBuilder,
        schema: &str,
    ) -> ResolveResult<LoadRequest> {
        let entry = self.get(&job.dataset)?;
        let specs = self.expand(&job.dataset)?;

        // 未指定年份但有最早年份: 装载完整可用窗口
        let default_window = match (&job.years, entry.min_year) {
            (None, Some(floor)) => Some(YearSpec::span(floor, builder.resolver().latest_year())),
            _ => None,
        };
        let years = job.years.as_ref().or(default_window.as_ref());

        let manifest = builder.build_for_paths(entry.category(), &specs, years)?;
        Ok(LoadRequest {
            dataset: job.dataset.clone(),
            manifest,
            target: TableRef::new(schema, job.table_name()),
        })
    }
}
