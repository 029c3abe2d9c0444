use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("入力エラー: {0}")]
    Validation(String),

    #[error("指定された項目が存在しません: {position}番目（全{len}件）。一覧を更新してください")]
    Index { position: usize, len: usize },

    #[error("編集中の劣化項目がありません")]
    NoActiveEdit,

    #[error("保存エラー: {0}")]
    Persistence(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("マスタファイルが不正: {0}")]
    InvalidMaster(String),

    #[error("エクスポートエラー: {0}")]
    Export(String),

    #[error("入力プロンプトエラー: {0}")]
    Prompt(String),

    #[error("検索パターンが不正: {0}")]
    Regex(#[from] regex::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] inspect_common::Error),
}

pub type Result<T> = std::result::Result<T, InspectError>;
