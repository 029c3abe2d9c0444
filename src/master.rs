//! 選択肢マスタの読み込み
//!
//! ファイルが無ければ初期値で作成する（Shift_JISで保存）。

use crate::error::{InspectError, Result};
use crate::store::encoding::{self, TextEncoding, CANDIDATES};
use inspect_common::{MasterKind, MasterVocabulary};
use std::path::Path;

/// 初期値ファイルの文字コード
const SEED_ENCODING: TextEncoding = TextEncoding::ShiftJis;

/// マスタを読み込む（無ければ初期値を書き出してから返す）
pub fn load_or_seed(path: &Path, kind: MasterKind) -> Result<MasterVocabulary> {
    if !path.exists() {
        return seed(path, kind);
    }

    let bytes = std::fs::read(path)?;
    let (content, detected) = encoding::decode(&bytes, CANDIDATES)
        .map_err(|e| InspectError::InvalidMaster(format!("{}: {}", path.display(), e)))?;
    let master = MasterVocabulary::from_csv_str(kind, &content)
        .map_err(|e| InspectError::InvalidMaster(format!("{}: {}", path.display(), e)))?;

    tracing::debug!(
        path = %path.display(),
        encoding = detected.label(),
        count = master.len(),
        "master loaded"
    );
    Ok(master)
}

/// 初期値でマスタを作成
pub fn seed(path: &Path, kind: MasterKind) -> Result<MasterVocabulary> {
    let master = MasterVocabulary::with_defaults(kind);
    let bytes = encoding::encode(&master.to_csv_string(), SEED_ENCODING)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;

    tracing::info!(path = %path.display(), column = kind.column(), "master seeded with defaults");
    Ok(master)
}
