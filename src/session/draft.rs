//! 劣化項目の下書きリスト
//!
//! 追加・編集・削除を受け付け、劣化番号を採番する。
//! 劣化番号は1から始まり、削除しても再利用しない。

use crate::error::{InspectError, Result};
use inspect_common::{CompositeKey, Finding, SavedKeySet};

/// 入力欄の内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingInput {
    pub location: String,
    pub deterioration_type: String,
    pub photo_reference: String,
}

impl PendingInput {
    fn from_finding(finding: &Finding) -> Self {
        Self {
            location: finding.location.clone(),
            deterioration_type: finding.deterioration_type.clone(),
            photo_reference: finding.photo_reference.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DraftRegistry {
    findings: Vec<Finding>,
    next_id: u32,
    editing: Option<usize>,
    pending: PendingInput,
}

impl Default for DraftRegistry {
    fn default() -> Self {
        Self {
            findings: Vec::new(),
            next_id: 1,
            editing: None,
            pending: PendingInput::default(),
        }
    }
}

impl DraftRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 劣化項目を追加
    ///
    /// 編集中だった場合、その編集は破棄される。
    pub fn add_finding(
        &mut self,
        location: &str,
        deterioration_type: &str,
        photo_reference: &str,
    ) -> Result<Finding> {
        validate(location, deterioration_type)?;

        let finding = Finding {
            sequence_id: self.next_id,
            location: location.trim().to_string(),
            deterioration_type: deterioration_type.trim().to_string(),
            photo_reference: photo_reference.trim().to_string(),
        };
        self.next_id += 1;
        self.findings.push(finding.clone());
        self.editing = None;
        self.pending = PendingInput::default();

        tracing::debug!(sequence_id = finding.sequence_id, "finding added");
        Ok(finding)
    }

    /// 編集を開始（入力欄に現在の内容を読み込む）
    ///
    /// 別の項目を編集中でも黙って切り替える。
    pub fn begin_edit(&mut self, position: usize) -> Result<Finding> {
        let finding = self.get(position)?.clone();
        self.pending = PendingInput::from_finding(&finding);
        self.editing = Some(position);
        Ok(finding)
    }

    /// 編集内容を反映
    ///
    /// 劣化番号はそのまま。反映前に現在の内容のキーを保存済みから外すので、
    /// 保存済みの項目を編集すると次回の保存で新しい行が追記される。
    pub fn commit_edit(
        &mut self,
        location: &str,
        deterioration_type: &str,
        photo_reference: &str,
        saved: &mut SavedKeySet,
    ) -> Result<Finding> {
        let position = self.editing.ok_or(InspectError::NoActiveEdit)?;
        validate(location, deterioration_type)?;
        let len = self.findings.len();
        let finding = self
            .findings
            .get_mut(position)
            .ok_or(InspectError::Index { position, len })?;

        let was_saved = saved.discard(&CompositeKey::of(finding));
        finding.location = location.trim().to_string();
        finding.deterioration_type = deterioration_type.trim().to_string();
        finding.photo_reference = photo_reference.trim().to_string();
        let updated = finding.clone();

        self.editing = None;
        self.pending = PendingInput::default();

        tracing::debug!(sequence_id = updated.sequence_id, was_saved, "finding edited");
        Ok(updated)
    }

    /// 編集をやめる
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.pending = PendingInput::default();
    }

    /// 劣化項目を削除
    ///
    /// 保存済みキーは外すが、ストアに書き込んだ行はそのまま残る。
    pub fn remove_finding(&mut self, position: usize, saved: &mut SavedKeySet) -> Result<Finding> {
        let key = CompositeKey::of(self.get(position)?);
        let was_saved = saved.discard(&key);
        let removed = self.findings.remove(position);

        // 編集対象は同じ項目を指し続ける
        self.editing = match self.editing {
            Some(target) if target == position => {
                self.pending = PendingInput::default();
                None
            }
            Some(target) if target > position => Some(target - 1),
            other => other,
        };

        tracing::debug!(sequence_id = removed.sequence_id, was_saved, "finding removed");
        Ok(removed)
    }

    pub fn get(&self, position: usize) -> Result<&Finding> {
        self.findings.get(position).ok_or(InspectError::Index {
            position,
            len: self.findings.len(),
        })
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// 次に採番する劣化番号
    pub fn next_sequence_id(&self) -> u32 {
        self.next_id
    }

    /// 編集中の位置
    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    pub fn pending(&self) -> &PendingInput {
        &self.pending
    }
}

fn validate(location: &str, deterioration_type: &str) -> Result<()> {
    if location.trim().is_empty() || deterioration_type.trim().is_empty() {
        return Err(InspectError::Validation("場所と劣化名は必須項目です".into()));
    }
    Ok(())
}
