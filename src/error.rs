use thiserror::Error;

#[derive(Error, Debug)]
pub enum GohanLogError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("記録が見つかりません: {0}")]
    RecordNotFound(String),

    #[error("IDが一意に決まりません（候補が複数あります）: {0}")]
    AmbiguousRecordId(String),

    #[error("採点項目のインデックスが範囲外です: {0}")]
    CategoryIndexOutOfRange(usize),

    #[error("採点は1〜5で指定してください: {0}")]
    InvalidScore(u8),

    #[error("採点項目名が空です")]
    EmptyRatingName,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("写真の読み込みエラー: {0}")]
    PhotoLoad(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GohanLogError>;
