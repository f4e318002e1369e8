//! 記録ストアモジュール
//!
//! records.json をまるごとメモリへ読み込み、操作のたびに保存し直す。
//! 同時に書き込むのはCLIプロセス1つだけという前提（単一ライター）で、
//! ロックは持たない。

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{GohanLogError, Result};
use crate::record::VisitRecord;

const STORE_FILE_NAME: &str = "records.json";

/// 一覧の並び順（日付キー、日付なしは常に末尾）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// 古い順（分析タブ用）
    Ascending,
    /// 新しい順（一覧タブ用）
    Descending,
}

/// ストアファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFile {
    /// バージョン（互換性チェック用）
    version: u32,
    records: Vec<VisitRecord>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            version: RecordStore::CURRENT_VERSION,
            records: Vec::new(),
        }
    }
}

/// 記録ストア
pub struct RecordStore {
    path: PathBuf,
    records: Vec<VisitRecord>,
}

impl RecordStore {
    const CURRENT_VERSION: u32 = 1;

    /// データディレクトリのストアファイルを開く
    ///
    /// ファイルがない・壊れている・バージョンが合わない場合は
    /// 警告を出して空のストアから始める（記録を消しはしない）。
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(STORE_FILE_NAME);
        let records = Self::load_records(&path);
        Self { path, records }
    }

    fn load_records(path: &Path) -> Vec<VisitRecord> {
        if !path.exists() {
            return Vec::new();
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("記録ファイルを開けません: {}", e);
                return Vec::new();
            }
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, StoreFile>(reader) {
            Ok(store) => {
                if store.version != Self::CURRENT_VERSION {
                    eprintln!("記録ファイルのバージョン不一致、空のストアで開始します");
                    return Vec::new();
                }
                store.records
            }
            Err(e) => {
                eprintln!("記録ファイルの読み込みエラー: {}", e);
                Vec::new()
            }
        }
    }

    /// ストアをファイルへ保存
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        let store = StoreFile {
            version: Self::CURRENT_VERSION,
            records: self.records.clone(),
        };
        serde_json::to_writer_pretty(writer, &store)?;
        Ok(())
    }

    /// 全記録を日付順で返す
    pub fn list(&self, order: SortOrder) -> Vec<VisitRecord> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| compare_dates(a, b, order));
        records
    }

    pub fn records(&self) -> &[VisitRecord] {
        &self.records
    }

    /// 一括更新用（項目名変更の反映など）。変更後は `save` を呼ぶこと。
    pub fn records_mut(&mut self) -> &mut [VisitRecord] {
        &mut self.records
    }

    /// 記録を追加または置き換えて保存する
    pub fn upsert(&mut self, record: VisitRecord) -> Result<()> {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        self.save()
    }

    /// 記録を削除して保存する
    pub fn delete(&mut self, id: Uuid) -> Result<()> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Err(GohanLogError::RecordNotFound(id.to_string()));
        }
        self.save()
    }

    /// IDまたはその前方一致で記録を探す
    ///
    /// 前方一致が複数に当たる場合はエラー（どれか選べないため）。
    pub fn find(&self, query: &str) -> Result<&VisitRecord> {
        if let Ok(id) = Uuid::parse_str(query) {
            return self
                .records
                .iter()
                .find(|r| r.id == id)
                .ok_or_else(|| GohanLogError::RecordNotFound(query.to_string()));
        }

        let matches: Vec<&VisitRecord> = self
            .records
            .iter()
            .filter(|r| r.id.to_string().starts_with(query))
            .collect();

        match matches.len() {
            0 => Err(GohanLogError::RecordNotFound(query.to_string())),
            1 => Ok(matches[0]),
            _ => Err(GohanLogError::AmbiguousRecordId(query.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn compare_dates(a: &VisitRecord, b: &VisitRecord, order: SortOrder) -> Ordering {
    match (a.date, b.date) {
        (Some(da), Some(db)) => match order {
            SortOrder::Ascending => da.cmp(&db),
            SortOrder::Descending => db.cmp(&da),
        },
        // 日付なしはどちらの順でも末尾
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
