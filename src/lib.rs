//! gohan-log コアライブラリ
//!
//! 外食記録（店名・駅・メモ・写真・採点・再訪）のJSONストアと、
//! 一覧用の検索フィルタ・分析用の集計を提供する。
//! すべて同期・単一ライター前提で動く。

pub mod category;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod photo;
pub mod record;
pub mod station;
pub mod stats;
pub mod store;

pub use error::{GohanLogError, Result};
pub use record::VisitRecord;
