// ==========================================
// NFL 数据 ETL - 清单 (Manifest)
// ==========================================
// 一次逻辑装载对应的远端资源定位符有序列表
// 顺序: 路径片段 → 年份升序 → 元数据后缀；无重复
// ==========================================

use crate::domain::types::FileFormat;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    locators: Vec<String>,
    format: FileFormat,
}

impl Manifest {
    /// 构造清单（保序去重）
    pub fn new(locators: Vec<String>, format: FileFormat) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(locators.len());
        for loc in locators {
            if !unique.contains(&loc) {
                unique.push(loc);
            }
        }
        Self {
            locators: unique,
            format,
        }
    }

    pub fn locators(&self) -> &[String] {
        &self.locators
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.locators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    /// 是否包含需要 HTTP 访问的定位符
    pub fn is_remote(&self) -> bool {
        self.locators
            .iter()
            .any(|l| l.starts_with("http://") || l.starts_with("https://"))
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.locators.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_dedup_keeps_first_position() {
        let m = Manifest::new(
            vec!["a".into(), "b".into(), "a".into(), "c".into()],
            FileFormat::Parquet,
        );
        assert_eq!(m.locators(), &["a", "b", "c"]);
        assert!(!m.is_remote());
    }

    #[test]
    fn test_manifest_remote_detection() {
        let m = Manifest::new(
            vec!["https://example.com/x.parquet".into()],
            FileFormat::Parquet,
        );
        assert!(m.is_remote());
    }
}
