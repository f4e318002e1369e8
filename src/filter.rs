//! 検索フィルタモジュール
//!
//! 一覧の検索条件（テキスト・日付・再訪）を記録リストへ適用する。
//! すべて純粋関数で、入力の並び順をそのまま保つ。
//! 単一ライター前提のため、フィルタ実行中に記録が書き換わることはない。

use chrono::{Datelike, Local, NaiveDate};

use crate::record::VisitRecord;

/// 日付フィルタの3モード
///
/// どのモードでも、日付のない記録は一致しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFilter {
    /// 開始日〜終了日（両端含む、片側だけでも可）
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    /// 年ごと
    Year(i32),
    /// 月ごと
    Month { year: i32, month: u32 },
}

/// 検索条件
///
/// 各条件はANDで合成される。テキストが空白のみ・日付フィルタなし・
/// `revisit_only` が false なら、その条件は全件一致。
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    pub text: String,
    pub date: Option<DateFilter>,
    pub revisit_only: bool,
}

/// 検索条件に一致する記録を入力順のまま返す
pub fn filter(records: &[VisitRecord], spec: &FilterSpec) -> Vec<VisitRecord> {
    records
        .iter()
        .filter(|r| matches(r, spec))
        .cloned()
        .collect()
}

fn matches(record: &VisitRecord, spec: &FilterSpec) -> bool {
    matches_text(record, &spec.text)
        && matches_date(record, spec.date.as_ref())
        && (!spec.revisit_only || record.revisit)
}

/// 店名・メモ・駅名のどれかに部分一致すればOK（大文字小文字を無視）
fn matches_text(record: &VisitRecord, text: &str) -> bool {
    let query = text.trim();
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    [&record.shop_name, &record.memo, &record.station_name]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

fn matches_date(record: &VisitRecord, date_filter: Option<&DateFilter>) -> bool {
    let Some(date_filter) = date_filter else {
        return true;
    };
    // 日付フィルタが有効なら、日付のない記録は常に不一致
    let Some(date) = record.date else {
        return false;
    };

    match date_filter {
        DateFilter::Range { start, end } => {
            let day = date.date_naive();
            start.is_none_or(|s| day >= s) && end.is_none_or(|e| day <= e)
        }
        DateFilter::Year(year) => date.year() == *year,
        DateFilter::Month { year, month } => date.year() == *year && date.month() == *month,
    }
}

/// 記録に含まれる年の範囲（最小年〜最大年）を返す
///
/// 年フィルタの選択肢に使う。日付のある記録が1件もなければ今年だけ。
/// 記録が増減したら再計算すること。
pub fn year_range(records: &[VisitRecord]) -> Vec<i32> {
    let years: Vec<i32> = records
        .iter()
        .filter_map(|r| r.date)
        .map(|d| d.year())
        .collect();

    match (years.iter().min(), years.iter().max()) {
        (Some(&min), Some(&max)) => (min..=max).collect(),
        _ => vec![Local::now().year()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_text(shop: &str, memo: &str, station: &str) -> VisitRecord {
        VisitRecord {
            shop_name: shop.to_string(),
            memo: memo.to_string(),
            station_name: station.to_string(),
            ..VisitRecord::default()
        }
    }

    #[test]
    fn test_text_match_any_field() {
        let record = record_with_text("ラーメン二郎", "また行きたい", "渋谷");
        assert!(matches_text(&record, "二郎"));
        assert!(matches_text(&record, "行きたい"));
        assert!(matches_text(&record, "渋谷"));
        assert!(!matches_text(&record, "新宿"));
    }

    #[test]
    fn test_text_match_case_insensitive() {
        let record = record_with_text("Cafe MOCHA", "", "");
        assert!(matches_text(&record, "cafe mocha"));
        assert!(matches_text(&record, "MoCh"));
    }

    #[test]
    fn test_text_blank_matches_everything() {
        let record = record_with_text("", "", "");
        assert!(matches_text(&record, ""));
        assert!(matches_text(&record, "   "));
    }
}
