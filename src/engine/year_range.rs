// ==========================================
// NFL 数据 ETL - 年份区间解析器
// ==========================================
// 职责: 将 YearSpec 规范化为连续、升序、去重的年份序列
// 红线: 不得请求未来赛季；早于最早年份的部分只截断不报错
// ==========================================

use crate::domain::types::{YearSpec, YearValue};
use crate::engine::error::{ResolveError, ResolveResult};
use crate::engine::season::LatestSeason;
use serde::Serialize;
use tracing::{debug, warn};

// ==========================================
// ResolvedYears - 解析结果
// ==========================================
// 不变量: 非空、严格升序、无缺口、全部 ≤ latest_year、全部 ≥ min_year（若有）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedYears {
    years: Vec<i32>,
    truncated_at: Option<i32>,
}

impl ResolvedYears {
    pub fn as_slice(&self) -> &[i32] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// 若发生了最早年份截断，返回截断所依据的年份
    pub fn truncated_at(&self) -> Option<i32> {
        self.truncated_at
    }
}

impl PartialEq<Vec<i32>> for ResolvedYears {
    fn eq(&self, other: &Vec<i32>) -> bool {
        &self.years == other
    }
}

/// 联盟首个赛季；更早的年份视为输入错误
pub const EARLIEST_SEASON: i32 = 1920;

// ==========================================
// YearRangeResolver - 年份区间解析器
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct YearRangeResolver {
    latest_year: i32,
}

impl YearRangeResolver {
    pub fn new(latest_year: i32) -> Self {
        Self { latest_year }
    }

    /// 从最新赛季策略创建（策略只在构造时读取一次）
    pub fn from_season(season: &dyn LatestSeason) -> Self {
        Self::new(season.latest_season())
    }

    pub fn latest_year(&self) -> i32 {
        self.latest_year
    }

    /// 解析年份规格
    ///
    /// # 流程
    /// 1. 标量 → 单元素列表
    /// 2. 字符串转整数（失败 → Parse）
    /// 3. 去重升序
    /// 4. 最大值 > latest_year → ExceedsLatest；最小值 < EARLIEST_SEASON → BeforeEarliest
    /// 5. 跨度 > 0 时替换为 [min, max] 闭区间
    /// 6. 按 min_year 截断（警告）；全部被截断 → BelowFloor
    pub fn resolve(
        &self,
        years: &YearSpec,
        min_year: Option<i32>,
    ) -> ResolveResult<ResolvedYears> {
        let values = years.values();
        if values.is_empty() {
            return Err(ResolveError::EmptySelection);
        }

        let mut parsed = values
            .into_iter()
            .map(parse_year)
            .collect::<ResolveResult<Vec<i32>>>()?;

        parsed.sort_unstable();
        parsed.dedup();

        let first = parsed[0];
        let last = parsed[parsed.len() - 1];

        // 检查未来赛季
        if last > self.latest_year {
            return Err(ResolveError::ExceedsLatest {
                year: last,
                latest_year: self.latest_year,
            });
        }
        // 区间下界，避免补齐时展开出异常大的序列
        if first < EARLIEST_SEASON {
            return Err(ResolveError::BeforeEarliest {
                year: first,
                earliest: EARLIEST_SEASON,
            });
        }

        let mut years: Vec<i32> = if last > first {
            (first..=last).collect()
        } else {
            parsed
        };

        let mut truncated_at = None;
        if let Some(floor) = min_year {
            if years[0] < floor {
                warn!(min_year = floor, "数据最早自 {} 年起可用，移除之前的年份", floor);
                years.retain(|&y| y >= floor);
                truncated_at = Some(floor);
            }
            if years.is_empty() {
                return Err(ResolveError::BelowFloor {
                    min_year: floor,
                    requested_max: last,
                });
            }
        }

        debug!(first = years[0], count = years.len(), "年份解析完成");
        Ok(ResolvedYears {
            years,
            truncated_at,
        })
    }
}

fn parse_year(value: &YearValue) -> ResolveResult<i32> {
    match value {
        YearValue::Int(v) => Ok(*v),
        YearValue::Text(s) => s.trim().parse::<i32>().map_err(|_| ResolveError::Parse {
            value: s.clone(),
        }),
    }
}
