//! 路線・駅マスタモジュール
//!
//! 記録に付ける駅名は、この固定マスタから選ぶか自由入力する。
//! マスタは路線名→駅名リストの静的テーブル。

use dialoguer::{Input, Select};
use lazy_static::lazy_static;
use std::collections::BTreeMap;

use crate::error::{GohanLogError, Result};

lazy_static! {
    /// 路線名→駅名リスト（路線名はBTreeMapにより常にソート順）
    pub static ref TRAIN_LINES: BTreeMap<&'static str, Vec<&'static str>> = {
        let mut lines = BTreeMap::new();
        lines.insert(
            "山手線",
            vec![
                "東京", "神田", "秋葉原", "御徒町", "上野", "鶯谷", "日暮里", "西日暮里",
                "田端", "駒込", "巣鴨", "大塚", "池袋", "目白", "高田馬場", "新大久保",
                "新宿", "代々木", "原宿", "渋谷", "恵比寿", "目黒", "五反田", "大崎",
                "品川", "田町", "浜松町", "新橋", "有楽町",
            ],
        );
        lines.insert(
            "中央線",
            vec![
                "東京", "神田", "御茶ノ水", "四ツ谷", "新宿", "中野", "高円寺", "阿佐ヶ谷",
                "荻窪", "西荻窪", "吉祥寺", "三鷹", "武蔵境", "東小金井", "武蔵小金井",
                "国分寺", "西国分寺", "国立", "立川", "日野", "豊田", "八王子",
            ],
        );
        lines.insert(
            "京浜東北線",
            vec![
                "大宮", "さいたま新都心", "与野", "北浦和", "浦和", "南浦和", "蕨",
                "西川口", "川口", "赤羽", "東十条", "王子", "上中里", "田端", "西日暮里",
                "日暮里", "鶯谷", "上野", "御徒町", "秋葉原", "神田", "東京", "有楽町",
                "新橋", "浜松町", "田町", "高輪ゲートウェイ", "品川", "大井町", "大森",
                "蒲田",
            ],
        );
        lines
    };
}

/// 路線名の一覧（ソート順）
pub fn line_names() -> Vec<&'static str> {
    TRAIN_LINES.keys().copied().collect()
}

/// 路線の駅名リスト。未知の路線なら None
pub fn stations_on(line: &str) -> Option<&'static [&'static str]> {
    TRAIN_LINES.get(line).map(|v| v.as_slice())
}

/// 駅名登録の選択結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationChoice {
    /// マスタから選択
    Selected { line: String, station: String },
    /// 自由入力（地名など）
    Custom(String),
    /// 登録しない
    None,
}

/// 対話式で駅名・地名を登録する
///
/// 元の記録の値（あれば）が既定の選択肢になる。
pub fn prompt_station(current: Option<(&str, &str)>) -> Result<StationChoice> {
    const MODE_REGISTER: usize = 0;
    const MODE_CUSTOM: usize = 1;
    const MODE_NONE: usize = 2;

    let mode = Select::new()
        .with_prompt("地名・駅名の登録方法")
        .items(&["駅を登録", "その他（自由入力）", "登録しない"])
        .default(if current.is_some() { MODE_REGISTER } else { MODE_NONE })
        .interact()
        .map_err(|e| GohanLogError::Prompt(e.to_string()))?;

    match mode {
        MODE_REGISTER => {
            let lines = line_names();
            let default_line = current
                .and_then(|(line, _)| lines.iter().position(|l| *l == line))
                .unwrap_or(0);
            let line_index = Select::new()
                .with_prompt("路線")
                .items(&lines)
                .default(default_line)
                .interact()
                .map_err(|e| GohanLogError::Prompt(e.to_string()))?;
            let line = lines[line_index];

            let stations = stations_on(line).unwrap_or(&[]);
            let default_station = current
                .and_then(|(_, station)| stations.iter().position(|s| *s == station))
                .unwrap_or(0);
            let station_index = Select::new()
                .with_prompt("駅名")
                .items(stations)
                .default(default_station)
                .interact()
                .map_err(|e| GohanLogError::Prompt(e.to_string()))?;

            Ok(StationChoice::Selected {
                line: line.to_string(),
                station: stations[station_index].to_string(),
            })
        }
        MODE_CUSTOM => {
            let name: String = Input::new()
                .with_prompt("駅名・地名（任意）")
                .allow_empty(true)
                .interact_text()
                .map_err(|e| GohanLogError::Prompt(e.to_string()))?;
            let name = name.trim();
            if name.is_empty() {
                Ok(StationChoice::None)
            } else {
                Ok(StationChoice::Custom(name.to_string()))
            }
        }
        _ => Ok(StationChoice::None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_names_sorted() {
        let names = line_names();
        assert_eq!(names, vec!["中央線", "京浜東北線", "山手線"]);
    }

    #[test]
    fn test_stations_on_known_line() {
        let stations = stations_on("山手線").expect("山手線がマスタにない");
        assert!(stations.contains(&"渋谷"));
        assert!(stations.contains(&"新宿"));
        assert_eq!(stations.len(), 29);
    }

    #[test]
    fn test_stations_on_unknown_line() {
        assert!(stations_on("存在しない線").is_none());
    }
}
