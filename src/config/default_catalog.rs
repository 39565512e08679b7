// ==========================================
// NFL 数据 ETL - 内置 nflverse 数据集目录
// ==========================================
// 来源: nflverse-data GitHub Release 资产命名
// 说明: 条目名即默认目标表名（大写后）
// ==========================================

use crate::domain::dataset::DatasetEntry;

/// pfr 高级统计的四个口径
const PFR_SIDES: [&str; 4] = ["pass", "rec", "rush", "def"];

/// 内置目录（顺序即默认装载顺序）
pub fn default_catalog() -> Vec<DatasetEntry> {
    let mut entries = vec![
        DatasetEntry::new("ftn_charting", &["ftn_charting"], Some(2022)),
        DatasetEntry::new("snap_counts", &["snap_counts"], Some(2012)),
        DatasetEntry::new("qbr_season", &["qbr_season_level"], None).with_category("espn_data"),
        DatasetEntry::new("qbr_weekly", &["qbr_week_level"], None).with_category("espn_data"),
        DatasetEntry::new("weekly_rosters", &["roster_weekly"], Some(2002)),
        DatasetEntry::new("players", &["players"], None),
        DatasetEntry::new("officials", &["officials"], None),
        DatasetEntry::new("draft_picks", &["draft_picks"], None),
        DatasetEntry::new("contracts", &["historical_contracts"], None),
        DatasetEntry::new("player_stats", &["player_stats"], Some(1999)),
        DatasetEntry::new("nextgen_stats", &["ngs_rushing"], None),
        DatasetEntry::new("injuries", &["injuries"], Some(2009)),
        DatasetEntry::new("combine", &["combine"], None),
    ];

    // 赛季口径不分年份；周口径自 2018 起按年份分文件
    for side in PFR_SIDES {
        entries.push(
            DatasetEntry::new(
                &format!("pfr_advstats_{}_season", side),
                &[format!("advstats_season_{}", side).as_str()],
                None,
            )
            .with_category("pfr_advstats"),
        );
    }
    for side in PFR_SIDES {
        entries.push(
            DatasetEntry::new(
                &format!("pfr_advstats_{}_week", side),
                &[format!("advstats_week_{}", side).as_str()],
                Some(2018),
            )
            .with_category("pfr_advstats"),
        );
    }

    entries
}
