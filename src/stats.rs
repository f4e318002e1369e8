//! 分析集計モジュール
//!
//! 月別件数と駅別の記録数・平均点を記録リストから計算する純粋関数。
//! 平均点は「そのグループの全記録・全項目の点数をならした平均」で、
//! 記録ごとの平均をさらに平均する方式ではない（項目数の多い記録ほど
//! 重みが大きくなる）。

use chrono::Datelike;
use std::collections::BTreeMap;

use crate::record::VisitRecord;

/// 月別の記録数（"YYYY-MM" キー）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCount {
    pub month: String,
    pub count: usize,
}

/// 月別に件数を集計する
///
/// 日付のない記録は対象外。結果は "YYYY-MM" の昇順で、
/// 記録のない月の行は作らない。
pub fn monthly_counts(records: &[VisitRecord]) -> Vec<MonthlyCount> {
    let mut groups: BTreeMap<String, usize> = BTreeMap::new();
    for date in records.iter().filter_map(|r| r.date) {
        let key = format!("{:04}-{:02}", date.year(), date.month());
        *groups.entry(key).or_insert(0) += 1;
    }
    groups
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}

/// 駅別の記録数と平均点
#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub station: String,
    pub count: usize,
    pub average: f64,
}

/// 駅別の平均点のみ
#[derive(Debug, Clone, PartialEq)]
pub struct StationAverage {
    pub station: String,
    pub average: f64,
}

/// 駅別の記録数・平均点を集計する（記録数の多い順）
///
/// 駅名が空の記録は対象外。採点が1つもない駅の平均点は 0.0。
/// 記録数が同じ駅同士は駅名順。
pub fn station_stats(records: &[VisitRecord]) -> Vec<StationStats> {
    let mut stats: Vec<StationStats> = group_by_station(records)
        .into_iter()
        .map(|(station, group)| {
            let scores = all_scores(&group);
            let average = if scores.is_empty() {
                0.0
            } else {
                scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64
            };
            StationStats {
                station: station.to_string(),
                count: group.len(),
                average,
            }
        })
        .collect();

    // 安定ソートなので同数の駅はグループ化時の駅名順のまま
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// 駅別の平均点を集計する（平均点の高い順）
///
/// 駅名が空の記録に加え、採点が1つもない駅も対象外。
pub fn station_averages(records: &[VisitRecord]) -> Vec<StationAverage> {
    let mut averages: Vec<StationAverage> = group_by_station(records)
        .into_iter()
        .filter_map(|(station, group)| {
            let scores = all_scores(&group);
            if scores.is_empty() {
                return None;
            }
            let average = scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64;
            Some(StationAverage {
                station: station.to_string(),
                average,
            })
        })
        .collect();

    averages.sort_by(|a, b| b.average.total_cmp(&a.average));
    averages
}

fn group_by_station<'a>(records: &'a [VisitRecord]) -> BTreeMap<&'a str, Vec<&'a VisitRecord>> {
    let mut groups: BTreeMap<&str, Vec<&VisitRecord>> = BTreeMap::new();
    for record in records {
        if record.station_name.is_empty() {
            continue;
        }
        groups
            .entry(record.station_name.as_str())
            .or_default()
            .push(record);
    }
    groups
}

/// グループ内の全記録・全項目の点数をフラットに集める
fn all_scores(group: &[&VisitRecord]) -> Vec<u8> {
    group
        .iter()
        .flat_map(|r| r.ratings.values().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_month_key_zero_padded() {
        let record = VisitRecord {
            date: Some(Local.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap()),
            ..VisitRecord::default()
        };
        let counts = monthly_counts(&[record]);
        assert_eq!(counts[0].month, "2025-07");
    }

    #[test]
    fn test_station_group_skips_empty_name() {
        let with_station = VisitRecord {
            station_name: "渋谷".to_string(),
            ..VisitRecord::default()
        };
        let without_station = VisitRecord::default();

        let stats = station_stats(&[with_station, without_station]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].station, "渋谷");
    }
}
