//! 点検セッション
//!
//! 1回の点検の間だけ有効な状態（基本情報・下書きリスト・保存済みキー）をまとめて持つ。

pub mod draft;
pub mod interactive;

pub use draft::{DraftRegistry, PendingInput};

use crate::error::Result;
use crate::reconcile;
use crate::store::RecordStore;
use inspect_common::{Finding, InspectionMetadata, SavedKeySet};
use std::collections::BTreeSet;

/// 保存結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// 追記した件数
    pub written: usize,
    /// 既に別の内容で保存していた劣化番号（同じ番号の行が増えたもの）
    pub duplicated_ids: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct InspectionSession {
    metadata: InspectionMetadata,
    draft: DraftRegistry,
    saved: SavedKeySet,
    /// このセッションで一度でも書き込んだ劣化番号
    written_ids: BTreeSet<u32>,
}

impl InspectionSession {
    pub fn new(metadata: InspectionMetadata) -> Self {
        Self {
            metadata,
            draft: DraftRegistry::new(),
            saved: SavedKeySet::new(),
            written_ids: BTreeSet::new(),
        }
    }

    pub fn metadata(&self) -> &InspectionMetadata {
        &self.metadata
    }

    /// 基本情報を変更（以降に保存する行から反映）
    pub fn set_metadata(&mut self, metadata: InspectionMetadata) {
        self.metadata = metadata;
    }

    pub fn draft(&self) -> &DraftRegistry {
        &self.draft
    }

    pub fn add_finding(&mut self, location: &str, deterioration_type: &str, photo_reference: &str) -> Result<Finding> {
        self.draft.add_finding(location, deterioration_type, photo_reference)
    }

    pub fn begin_edit(&mut self, position: usize) -> Result<Finding> {
        self.draft.begin_edit(position)
    }

    pub fn commit_edit(&mut self, location: &str, deterioration_type: &str, photo_reference: &str) -> Result<Finding> {
        self.draft
            .commit_edit(location, deterioration_type, photo_reference, &mut self.saved)
    }

    pub fn cancel_edit(&mut self) {
        self.draft.cancel_edit();
    }

    pub fn remove_finding(&mut self, position: usize) -> Result<Finding> {
        self.draft.remove_finding(position, &mut self.saved)
    }

    /// 現在の内容で保存済みか
    pub fn is_saved(&self, finding: &Finding) -> bool {
        self.saved.is_saved(finding)
    }

    /// 未保存の件数
    pub fn unsaved_count(&self) -> usize {
        reconcile::pending(self.draft.findings(), &self.saved).len()
    }

    /// 未保存の劣化項目をストアに追記
    pub fn commit<S: RecordStore + ?Sized>(&mut self, store: &mut S) -> Result<CommitReport> {
        let duplicated_ids = self.duplicated_ids();
        let written = reconcile::commit(self.draft.findings(), &self.metadata, &mut self.saved, store)?;
        Ok(self.record_written(written, duplicated_ids))
    }

    /// 作成日時を指定して保存
    pub fn commit_at<S: RecordStore + ?Sized>(&mut self, store: &mut S, written_at: &str) -> Result<CommitReport> {
        let duplicated_ids = self.duplicated_ids();
        let written = reconcile::commit_at(
            self.draft.findings(),
            &self.metadata,
            &mut self.saved,
            store,
            written_at,
        )?;
        Ok(self.record_written(written, duplicated_ids))
    }

    /// 未保存かつ以前に書き込み済みの劣化番号
    fn duplicated_ids(&self) -> Vec<u32> {
        reconcile::pending(self.draft.findings(), &self.saved)
            .into_iter()
            .map(|f| f.sequence_id)
            .filter(|id| self.written_ids.contains(id))
            .collect()
    }

    fn record_written(&mut self, written: usize, duplicated_ids: Vec<u32>) -> CommitReport {
        if written > 0 {
            self.written_ids
                .extend(self.draft.findings().iter().map(|f| f.sequence_id));
        }
        if !duplicated_ids.is_empty() {
            tracing::warn!(ids = ?duplicated_ids, "edited findings appended as additional rows");
        }
        CommitReport { written, duplicated_ids }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_new_session_is_empty() {
        let session = InspectionSession::new(InspectionMetadata::default());
        assert!(session.draft().is_empty());
        assert_eq!(session.draft().next_sequence_id(), 1);
        assert_eq!(session.unsaved_count(), 0);
    }

    #[test]
    fn test_commit_reports_duplicated_ids() {
        let mut session = InspectionSession::new(InspectionMetadata::default());
        let mut store = MemoryStore::new();
        session.add_finding("屋上", "漏水", "P-1").unwrap();
        session.add_finding("外壁", "剥離", "P-2").unwrap();

        let first = session.commit(&mut store).unwrap();
        assert_eq!(first, CommitReport { written: 2, duplicated_ids: vec![] });

        session.begin_edit(1).unwrap();
        session.commit_edit("外壁", "剥離", "P-3").unwrap();
        assert_eq!(session.unsaved_count(), 1);

        let second = session.commit(&mut store).unwrap();
        assert_eq!(second.written, 1);
        assert_eq!(second.duplicated_ids, vec![2]);
        assert_eq!(session.unsaved_count(), 0);
    }

    #[test]
    fn test_edit_before_first_save_is_not_duplicate() {
        let mut session = InspectionSession::new(InspectionMetadata::default());
        let mut store = MemoryStore::new();
        session.add_finding("屋上", "漏水", "P-1").unwrap();
        session.begin_edit(0).unwrap();
        session.commit_edit("屋上", "漏水", "P-9").unwrap();

        let report = session.commit(&mut store).unwrap();
        assert_eq!(report.written, 1);
        assert!(report.duplicated_ids.is_empty());
    }
}
