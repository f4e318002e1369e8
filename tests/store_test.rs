//! 記録ストアテスト
//!
//! JSONファイルへの保存・読み込み・並び順・ID検索を検証

use chrono::{DateTime, Local, TimeZone};
use gohan_log::error::GohanLogError;
use gohan_log::record::VisitRecord;
use gohan_log::store::{RecordStore, SortOrder};
use tempfile::tempdir;

fn at(year: i32, month: u32, day: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

fn record(date: Option<DateTime<Local>>, shop: &str) -> VisitRecord {
    VisitRecord {
        date,
        shop_name: shop.to_string(),
        ..VisitRecord::default()
    }
}

/// ファイルがなければ空のストア
#[test]
fn test_open_missing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = RecordStore::open(dir.path());
    assert!(store.is_empty());
}

/// 保存して読み直すと全フィールドが残る
#[test]
fn test_save_and_reload_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut store = RecordStore::open(dir.path());
    let mut record = record(Some(at(2025, 7, 1)), "ラーメン二郎");
    record.station_name = "渋谷".to_string();
    record.station_line = "山手線".to_string();
    record.memo = "また行きたい".to_string();
    record.photo = Some("abc123.jpg".to_string());
    record.revisit = true;
    record.set_rating("総合", 4).unwrap();
    record.set_rating("味", 5).unwrap();
    let id = record.id;
    store.upsert(record).unwrap();

    let reloaded = RecordStore::open(dir.path());
    assert_eq!(reloaded.len(), 1);
    let loaded = reloaded.find(&id.to_string()).unwrap();
    assert_eq!(loaded.shop_name, "ラーメン二郎");
    assert_eq!(loaded.station_name, "渋谷");
    assert_eq!(loaded.station_line, "山手線");
    assert_eq!(loaded.memo, "また行きたい");
    assert_eq!(loaded.photo.as_deref(), Some("abc123.jpg"));
    assert!(loaded.revisit);
    assert_eq!(loaded.ratings.get("味"), Some(&5));
    assert!(loaded.date.is_some());
}

/// 同じIDのupsertは置き換え
#[test]
fn test_upsert_replaces_by_id() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = RecordStore::open(dir.path());

    let mut record = record(Some(at(2025, 7, 1)), "旧店名");
    let id = record.id;
    store.upsert(record.clone()).unwrap();

    record.shop_name = "新店名".to_string();
    store.upsert(record).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.find(&id.to_string()).unwrap().shop_name, "新店名");
}

/// 削除とその永続化
#[test]
fn test_delete() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = RecordStore::open(dir.path());

    let record = record(Some(at(2025, 7, 1)), "消える店");
    let id = record.id;
    store.upsert(record).unwrap();
    store.delete(id).unwrap();

    assert!(store.is_empty());
    let reloaded = RecordStore::open(dir.path());
    assert!(reloaded.is_empty());
}

/// 存在しないIDの削除はエラー
#[test]
fn test_delete_unknown_id() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = RecordStore::open(dir.path());

    let result = store.delete(uuid::Uuid::new_v4());
    assert!(matches!(result, Err(GohanLogError::RecordNotFound(_))));
}

/// 日付順の並び: 降順・昇順、日付なしはどちらでも末尾
#[test]
fn test_list_sort_order() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = RecordStore::open(dir.path());

    store.upsert(record(Some(at(2025, 7, 1)), "7月")).unwrap();
    store.upsert(record(None, "日付なし")).unwrap();
    store.upsert(record(Some(at(2025, 8, 1)), "8月")).unwrap();

    let desc: Vec<String> = store
        .list(SortOrder::Descending)
        .iter()
        .map(|r| r.shop_name.clone())
        .collect();
    assert_eq!(desc, vec!["8月", "7月", "日付なし"]);

    let asc: Vec<String> = store
        .list(SortOrder::Ascending)
        .iter()
        .map(|r| r.shop_name.clone())
        .collect();
    assert_eq!(asc, vec!["7月", "8月", "日付なし"]);
}

/// IDの前方一致検索
#[test]
fn test_find_by_prefix() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = RecordStore::open(dir.path());

    let record = record(Some(at(2025, 7, 1)), "前方一致の店");
    let id = record.id.to_string();
    store.upsert(record).unwrap();

    let found = store.find(&id[..8]).unwrap();
    assert_eq!(found.id.to_string(), id);

    let result = store.find("zzzzzzzz");
    assert!(matches!(result, Err(GohanLogError::RecordNotFound(_))));
}

/// 壊れたファイルは空のストアとして開く（エラーにしない）
#[test]
fn test_open_corrupt_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("records.json"), "not json at all").unwrap();

    let store = RecordStore::open(dir.path());
    assert!(store.is_empty());
}
