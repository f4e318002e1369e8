//! 採点項目ストア
//!
//! 採点項目名のリスト（追加順を保持）を categories.json に永続化する。
//! 初回起動時は既定の3項目で始める。項目名の変更は過去の記録の
//! 採点マップへも反映する（`propagate_rename`）。

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::{GohanLogError, Result};
use crate::record::VisitRecord;

const CATEGORY_FILE_NAME: &str = "categories.json";

/// 初回起動時の採点項目
pub const DEFAULT_CATEGORIES: [&str; 3] = ["味", "コスパ", "静かさ"];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryFile {
    items: Vec<String>,
}

/// 採点項目リストのストア
pub struct CategoryStore {
    path: PathBuf,
    items: Vec<String>,
}

impl CategoryStore {
    /// データディレクトリの項目ファイルを開く（なければ既定値）
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(CATEGORY_FILE_NAME);
        let items = Self::load_items(&path);
        Self { path, items }
    }

    fn load_items(path: &Path) -> Vec<String> {
        if !path.exists() {
            return Self::default_items();
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("採点項目ファイルを開けません: {}", e);
                return Self::default_items();
            }
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, CategoryFile>(reader) {
            Ok(file) => file.items,
            Err(e) => {
                eprintln!("採点項目ファイルの読み込みエラー: {}", e);
                Self::default_items()
            }
        }
    }

    fn default_items() -> Vec<String> {
        DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        let contents = CategoryFile {
            items: self.items.clone(),
        };
        serde_json::to_writer_pretty(writer, &contents)?;
        Ok(())
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// 項目を追加する
    ///
    /// 空白のみ・重複は何もせず false を返す（エラーにしない）。
    pub fn add(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() || self.items.iter().any(|i| i == name) {
            return Ok(false);
        }
        self.items.push(name.to_string());
        self.save()?;
        Ok(true)
    }

    /// 項目名を変更する
    ///
    /// 空白のみの新名称は何もせず Ok(None)。成功時は旧名称を返すので、
    /// 呼び出し側は `propagate_rename` で記録へ反映してからストアを
    /// 保存し直すこと。
    pub fn rename(&mut self, index: usize, new_name: &str) -> Result<Option<String>> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Ok(None);
        }
        if index >= self.items.len() {
            return Err(GohanLogError::CategoryIndexOutOfRange(index));
        }
        let old = std::mem::replace(&mut self.items[index], new_name.to_string());
        self.save()?;
        Ok(Some(old))
    }

    /// 項目を削除する（過去の記録の採点マップはそのまま残す）
    pub fn remove(&mut self, index: usize) -> Result<String> {
        if index >= self.items.len() {
            return Err(GohanLogError::CategoryIndexOutOfRange(index));
        }
        let removed = self.items.remove(index);
        self.save()?;
        Ok(removed)
    }
}

/// 項目名変更を全記録へ反映する
///
/// 旧名称の採点を持つ記録だけ、点数を保ったまま新名称へ移す
/// （新名称の採点が既にある場合は上書き）。変更した記録数を返す。
/// 反映後の永続化は呼び出し側が記録ストアを一度だけ保存して行う。
pub fn propagate_rename(records: &mut [VisitRecord], old: &str, new: &str) -> usize {
    let mut changed = 0;
    for record in records.iter_mut() {
        if let Some(score) = record.ratings.remove(old) {
            record.ratings.insert(new.to_string(), score);
            changed += 1;
        }
    }
    changed
}
