use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gohan-log")]
#[command(about = "外食記録・採点・分析CLIツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 外食記録を追加
    Add {
        /// 店名
        #[arg(short, long)]
        shop: Option<String>,

        /// メモ
        #[arg(short, long)]
        memo: Option<String>,

        /// 取り込む写真ファイルのパス
        #[arg(short, long)]
        photo: Option<PathBuf>,

        /// 再訪ありにする
        #[arg(short, long)]
        revisit: bool,

        /// 対話入力を省略する（駅なし・採点は既定値）
        #[arg(long)]
        no_prompt: bool,
    },

    /// 記録の一覧・検索
    List {
        /// 検索テキスト（店名・メモ・駅名の部分一致）
        #[arg(short, long)]
        search: Option<String>,

        /// 開始日 (YYYY-MM-DD)
        #[arg(long, conflicts_with_all = ["year", "month"])]
        from: Option<NaiveDate>,

        /// 終了日 (YYYY-MM-DD)
        #[arg(long, conflicts_with_all = ["year", "month"])]
        to: Option<NaiveDate>,

        /// 年で絞り込み
        #[arg(short, long)]
        year: Option<i32>,

        /// 月で絞り込み（--year と併用）
        #[arg(short, long, requires = "year")]
        month: Option<u32>,

        /// 再訪ありのみ
        #[arg(long)]
        revisit_only: bool,
    },

    /// 記録の詳細を表示
    Show {
        /// 記録ID（前方一致可）
        #[arg(required = true)]
        id: String,
    },

    /// 記録を編集（IDと日付以外）
    Edit {
        /// 記録ID（前方一致可）
        #[arg(required = true)]
        id: String,
    },

    /// 記録を削除
    Delete {
        /// 記録ID（前方一致可）
        #[arg(required = true)]
        id: String,
    },

    /// 月別・駅別の集計を表示
    Stats {
        /// 上位何駅まで表示するか
        #[arg(short, long, default_value = "10")]
        top: usize,

        /// 平均点の高い順で表示
        #[arg(long)]
        by_average: bool,
    },

    /// 採点項目の管理
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// 設定を表示/編集
    Config {
        /// データディレクトリを設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// 項目一覧を表示
    List,

    /// 項目を追加
    Add {
        /// 項目名
        name: String,
    },

    /// 項目名を変更（過去の記録の採点にも反映）
    Rename {
        /// `category list` で表示される番号
        index: usize,
        /// 新しい項目名
        name: String,
    },

    /// 項目を削除（過去の記録の採点はそのまま）
    Remove {
        /// `category list` で表示される番号
        index: usize,
    },
}
