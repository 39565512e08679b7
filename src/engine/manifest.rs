// ==========================================
// NFL 数据 ETL - 清单构建器
// ==========================================
// 职责: 类别 + 文件基名 + 年份 + 基础 URL → 远端定位符列表
// URL 形态:
//   非分区: {base_url}/{category}/{file}.{filetype}
//   按年份: {base_url}/{category}/{file}_{year}.{filetype}
// ==========================================

use crate::domain::dataset::PathSpec;
use crate::domain::manifest::Manifest;
use crate::domain::types::{FileFormat, YearSpec};
use crate::engine::error::ResolveResult;
use crate::engine::year_range::YearRangeResolver;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    base_url: String,
    format: FileFormat,
    resolver: YearRangeResolver,
}

impl ManifestBuilder {
    pub fn new(base_url: &str, format: FileFormat, resolver: YearRangeResolver) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            format,
            resolver,
        }
    }

    pub fn resolver(&self) -> &YearRangeResolver {
        &self.resolver
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// 单个文件基名的清单
    ///
    /// # 参数
    /// - category: URL 类别目录
    /// - file: 文件基名
    /// - years: None 表示非分区数据集（恰好一个定位符）
    /// - min_year: 数据最早可用年份
    ///
    /// # 返回
    /// - Err(BelowFloor): 请求窗口完全早于 min_year
    pub fn build(
        &self,
        category: &str,
        file: &str,
        years: Option<&YearSpec>,
        min_year: Option<i32>,
    ) -> ResolveResult<Manifest> {
        let spec = PathSpec {
            fragment: file.to_string(),
            min_year,
            metadata: None,
        };
        self.build_for_paths(category, std::slice::from_ref(&spec), years)
    }

    /// 多路径片段 / 元数据后缀的清单（笛卡尔积）
    ///
    /// 排序: 路径片段 → 年份 → 后缀，保证多次运行结果一致
    pub fn build_for_paths(
        &self,
        category: &str,
        paths: &[PathSpec],
        years: Option<&YearSpec>,
    ) -> ResolveResult<Manifest> {
        // 按路径片段首次出现顺序分组（同一片段的不同后缀归为一组）
        let mut groups: Vec<(&str, Vec<&PathSpec>)> = Vec::new();
        for spec in paths {
            match groups.iter_mut().find(|(f, _)| *f == spec.fragment) {
                Some((_, specs)) => specs.push(spec),
                None => groups.push((spec.fragment.as_str(), vec![spec])),
            }
        }

        let mut locators = Vec::new();
        for (_, specs) in &groups {
            match years {
                None => {
                    for spec in specs {
                        locators.push(self.locator(category, &spec.file_stem(None)));
                    }
                }
                Some(requested) => {
                    let resolved = self.resolver.resolve(requested, specs[0].min_year)?;
                    for &year in resolved.as_slice() {
                        for spec in specs {
                            locators.push(self.locator(category, &spec.file_stem(Some(year))));
                        }
                    }
                }
            }
        }

        debug!(category, count = locators.len(), "清单构建完成");
        Ok(Manifest::new(locators, self.format))
    }

    fn locator(&self, category: &str, stem: &str) -> String {
        format!(
            "{}/{}/{}.{}",
            self.base_url,
            category,
            stem,
            self.format.extension()
        )
    }
}
