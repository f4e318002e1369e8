//! 外食記録のデータモデル

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::{GohanLogError, Result};

/// 総合評価の予約項目名（常に先頭に表示される）
pub const OVERALL_RATING: &str = "総合";

/// 採点の既定値（新規記録・未採点項目に使う）
pub const DEFAULT_SCORE: u8 = 3;

/// 1件の外食記録
///
/// `id` と `date` は作成時に確定し、以後変更しない。
/// それ以外のフィールドは編集で自由に変更できる。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub id: Uuid,

    /// 記録日時。古いデータでは欠損していることがあり、
    /// その場合は日付フィルタ・月別集計の対象外になる
    #[serde(default)]
    pub date: Option<DateTime<Local>>,

    #[serde(default)]
    pub shop_name: String,        // 店名

    #[serde(default)]
    pub station_name: String,     // 駅名・地名

    #[serde(default)]
    pub station_line: String,     // 路線

    #[serde(default)]
    pub memo: String,

    #[serde(default)]
    pub photo: Option<String>,    // photos/ 配下のファイル名

    #[serde(default)]
    pub revisit: bool,            // 再訪あり

    #[serde(default)]
    pub ratings: BTreeMap<String, u8>,
}

impl Default for VisitRecord {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            date: None,
            shop_name: String::new(),
            station_name: String::new(),
            station_line: String::new(),
            memo: String::new(),
            photo: None,
            revisit: false,
            ratings: BTreeMap::new(),
        }
    }
}

impl VisitRecord {
    /// 新規記録を作成する
    ///
    /// 日時は現在時刻で確定し、採点マップには「総合」と
    /// 採点項目リストの全項目を既定値で入れておく。
    pub fn new(categories: &[String]) -> Self {
        let mut ratings = BTreeMap::new();
        ratings.insert(OVERALL_RATING.to_string(), DEFAULT_SCORE);
        for name in categories {
            ratings.insert(name.clone(), DEFAULT_SCORE);
        }

        Self {
            id: Uuid::new_v4(),
            date: Some(Local::now()),
            ratings,
            ..Self::default()
        }
    }

    /// 採点を設定する（書き込み境界での検証）
    ///
    /// 項目名は前後の空白を除いた上で空なら拒否、点数は1〜5のみ許可。
    pub fn set_rating(&mut self, name: &str, score: u8) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GohanLogError::EmptyRatingName);
        }
        if !(1..=5).contains(&score) {
            return Err(GohanLogError::InvalidScore(score));
        }
        self.ratings.insert(name.to_string(), score);
        Ok(())
    }

    /// 表示順の採点エントリ（「総合」が先頭、残りは項目名順）
    pub fn rating_entries(&self) -> Vec<(&str, u8)> {
        let mut entries = Vec::with_capacity(self.ratings.len());
        if let Some(&score) = self.ratings.get(OVERALL_RATING) {
            entries.push((OVERALL_RATING, score));
        }
        for (name, &score) in &self.ratings {
            if name != OVERALL_RATING {
                entries.push((name.as_str(), score));
            }
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_prepopulates_ratings() {
        let categories = vec!["味".to_string(), "コスパ".to_string()];
        let record = VisitRecord::new(&categories);

        assert!(record.date.is_some());
        assert_eq!(record.ratings.len(), 3);
        assert_eq!(record.ratings.get(OVERALL_RATING), Some(&DEFAULT_SCORE));
        assert_eq!(record.ratings.get("味"), Some(&DEFAULT_SCORE));
    }

    #[test]
    fn test_set_rating_validates_score() {
        let mut record = VisitRecord::default();
        assert!(record.set_rating("味", 0).is_err());
        assert!(record.set_rating("味", 6).is_err());
        assert!(record.set_rating("味", 5).is_ok());
        assert_eq!(record.ratings.get("味"), Some(&5));
    }

    #[test]
    fn test_set_rating_rejects_empty_name() {
        let mut record = VisitRecord::default();
        assert!(record.set_rating("  ", 3).is_err());
        assert!(record.ratings.is_empty());
    }

    #[test]
    fn test_rating_entries_overall_first() {
        let mut record = VisitRecord::default();
        record.set_rating("味", 5).unwrap();
        record.set_rating(OVERALL_RATING, 4).unwrap();
        record.set_rating("コスパ", 2).unwrap();

        let entries = record.rating_entries();
        assert_eq!(entries[0], (OVERALL_RATING, 4));
        // 残りは項目名順
        assert_eq!(entries[1].0, "コスパ");
        assert_eq!(entries[2].0, "味");
    }
}
