// ==========================================
// NFL 数据 ETL - 最新赛季策略
// ==========================================
// 规则: 当年 9 月之前，最新赛季为上一自然年
// 注入方式: LatestSeason trait（挂钟推导 / 固定常量）
// ==========================================

use chrono::{Datelike, Local, NaiveDate};

/// 赛季开赛月份
pub const SEASON_START_MONTH: u32 = 9;

/// 根据日期推导最新已开赛赛季
pub fn season_for_date(date: NaiveDate) -> i32 {
    if date.month() < SEASON_START_MONTH {
        date.year() - 1
    } else {
        date.year()
    }
}

// ==========================================
// LatestSeason Trait
// ==========================================
// 实现者: WallClockSeason, FixedSeason
pub trait LatestSeason: Send + Sync {
    fn latest_season(&self) -> i32;
}

/// 按本地挂钟推导
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClockSeason;

impl LatestSeason for WallClockSeason {
    fn latest_season(&self) -> i32 {
        season_for_date(Local::now().date_naive())
    }
}

/// 固定赛季（配置覆写 / 测试）
#[derive(Debug, Clone, Copy)]
pub struct FixedSeason(pub i32);

impl LatestSeason for FixedSeason {
    fn latest_season(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_before_september_uses_previous_year() {
        assert_eq!(season_for_date(date(2025, 1, 15)), 2024);
        assert_eq!(season_for_date(date(2025, 8, 31)), 2024);
    }

    #[test]
    fn test_from_september_uses_current_year() {
        assert_eq!(season_for_date(date(2025, 9, 1)), 2025);
        assert_eq!(season_for_date(date(2025, 12, 31)), 2025);
    }

    #[test]
    fn test_fixed_season() {
        assert_eq!(FixedSeason(2024).latest_season(), 2024);
    }
}
