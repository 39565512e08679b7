// ==========================================
// NFL 数据 ETL - 数据集目录条目
// ==========================================
// 职责: 逻辑数据集 → 路径片段 + 最早年份 + 元数据后缀
// 红线: 进程启动后只读，不可变更
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// DatasetEntry - 目录条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
    /// 逻辑名（同时作为默认目标表名）
    pub name: String,

    /// URL 中的类别目录；缺省时等于 name
    #[serde(default)]
    pub category: Option<String>,

    /// 路径片段（文件基名），按顺序展开
    pub paths: Vec<String>,

    /// 数据最早可用年份；None 表示不按年份分区
    #[serde(default)]
    pub min_year: Option<i32>,

    /// 元数据后缀（如 "passing"），拼接在年份之后
    #[serde(default)]
    pub metadata: Vec<String>,
}

impl DatasetEntry {
    pub fn new(name: &str, paths: &[&str], min_year: Option<i32>) -> Self {
        Self {
            name: name.to_string(),
            category: None,
            paths: paths.iter().map(|p| p.to_string()).collect(),
            min_year,
            metadata: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_metadata(mut self, suffixes: &[&str]) -> Self {
        self.metadata = suffixes.iter().map(|s| s.to_string()).collect();
        self
    }

    /// URL 类别目录
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(&self.name)
    }
}

// ==========================================
// PathSpec - 展开后的单个路径规格
// ==========================================
// 一个 (路径片段, 元数据后缀) 组合，携带该数据集的最早年份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSpec {
    pub fragment: String,
    pub min_year: Option<i32>,
    pub metadata: Option<String>,
}

impl PathSpec {
    /// 拼接文件基名: {fragment}[_{year}][_{metadata}]
    pub fn file_stem(&self, year: Option<i32>) -> String {
        let mut stem = self.fragment.clone();
        if let Some(y) = year {
            stem.push_str(&format!("_{}", y));
        }
        if let Some(meta) = &self.metadata {
            stem.push_str(&format!("_{}", meta));
        }
        stem
    }
}
