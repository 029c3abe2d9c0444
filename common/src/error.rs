//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV error (line {line}): {message}")]
    Csv { line: usize, message: String },

    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
