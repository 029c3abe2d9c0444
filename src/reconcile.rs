//! 下書きリストとストアの突き合わせ
//!
//! 保存済みキーに無い劣化項目だけを点検データに追記する。
//! キーは内容全体から作るので、保存後に編集した項目は同じ劣化番号の
//! 新しい行として追記され、前の行は残る（上書き保存はしない）。

use crate::error::Result;
use crate::store::RecordStore;
use chrono::Local;
use inspect_common::{CompositeKey, Finding, InspectionMetadata, PersistedRecord, SavedKeySet};

/// 作成日時の書式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 未保存の劣化項目をストアに追記し、追記した件数を返す
pub fn commit<S: RecordStore + ?Sized>(
    findings: &[Finding],
    metadata: &InspectionMetadata,
    saved: &mut SavedKeySet,
    store: &mut S,
) -> Result<usize> {
    let now = Local::now().format(TIMESTAMP_FORMAT).to_string();
    commit_at(findings, metadata, saved, store, &now)
}

/// 作成日時を指定して保存
pub fn commit_at<S: RecordStore + ?Sized>(
    findings: &[Finding],
    metadata: &InspectionMetadata,
    saved: &mut SavedKeySet,
    store: &mut S,
    written_at: &str,
) -> Result<usize> {
    let mut staged = Vec::new();
    let mut staged_keys = Vec::new();

    for finding in findings {
        let key = CompositeKey::of(finding);
        if saved.contains(&key) {
            continue;
        }
        staged.push(PersistedRecord::new(metadata, finding, written_at));
        staged_keys.push(key);
    }

    // 追記するものが無ければストアには触れない
    if staged.is_empty() {
        tracing::debug!(draft = findings.len(), "nothing to commit");
        return Ok(0);
    }

    store.append_all(&staged)?;

    for key in staged_keys {
        tracing::debug!(sequence_id = key.sequence_id(), key = %key, "marked saved");
        saved.insert(key);
    }

    tracing::info!(committed = staged.len(), draft = findings.len(), "commit finished");
    Ok(staged.len())
}

/// 未保存の劣化項目
pub fn pending<'a>(findings: &'a [Finding], saved: &SavedKeySet) -> Vec<&'a Finding> {
    findings.iter().filter(|f| !saved.is_saved(f)).collect()
}
