//! 保存済み判定用の複合キー
//!
//! 劣化番号だけでなく、場所・劣化名・写真番号を含めた内容全体をキーにする。
//! 保存済みの項目を編集するとキーが変わるため、次回保存時には
//! 同じ劣化番号の行が新しい内容で追記される（既存行は書き換えない）。

use crate::types::Finding;
use std::collections::HashSet;
use std::fmt;

const SEPARATOR: char = '_';
const ESCAPE: char = '\\';

/// 劣化項目の内容全体から導出したキー
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey {
    sequence_id: u32,
    location: String,
    deterioration_type: String,
    photo_reference: String,
}

impl CompositeKey {
    pub fn of(finding: &Finding) -> Self {
        Self {
            sequence_id: finding.sequence_id,
            location: finding.location.clone(),
            deterioration_type: finding.deterioration_type.clone(),
            photo_reference: finding.photo_reference.clone(),
        }
    }

    pub fn sequence_id(&self) -> u32 {
        self.sequence_id
    }

    /// 文字列表現（`番号_場所_劣化名_写真番号`）
    ///
    /// 各フィールド内の `_` と `\` はエスケープするので、
    /// 異なるキーが同じ文字列になることはない。
    pub fn encode(&self) -> String {
        let mut out = self.sequence_id.to_string();
        for field in [&self.location, &self.deterioration_type, &self.photo_reference] {
            out.push(SEPARATOR);
            push_escaped(&mut out, field);
        }
        out
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<&Finding> for CompositeKey {
    fn from(finding: &Finding) -> Self {
        Self::of(finding)
    }
}

fn push_escaped(out: &mut String, field: &str) {
    for c in field.chars() {
        if c == SEPARATOR || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
}

/// 保存済みキーの集合
///
/// 1回の点検セッションに閉じた状態で、ストアとは同期しない。
#[derive(Debug, Clone, Default)]
pub struct SavedKeySet {
    keys: HashSet<CompositeKey>,
}

impl SavedKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &CompositeKey) -> bool {
        self.keys.contains(key)
    }

    /// 現在の内容で保存済みか
    pub fn is_saved(&self, finding: &Finding) -> bool {
        self.contains(&CompositeKey::of(finding))
    }

    /// 追加（新規ならtrue）
    pub fn insert(&mut self, key: CompositeKey) -> bool {
        self.keys.insert(key)
    }

    /// 削除（存在していたらtrue）
    pub fn discard(&mut self, key: &CompositeKey) -> bool {
        self.keys.remove(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(id: u32, location: &str, kind: &str, photo: &str) -> Finding {
        Finding {
            sequence_id: id,
            location: location.into(),
            deterioration_type: kind.into(),
            photo_reference: photo.into(),
        }
    }

    #[test]
    fn test_same_fields_same_key() {
        let a = finding(1, "屋上", "漏水", "P-1");
        let b = finding(1, "屋上", "漏水", "P-1");
        assert_eq!(CompositeKey::of(&a), CompositeKey::of(&b));
        assert_eq!(CompositeKey::of(&a).encode(), CompositeKey::of(&b).encode());
    }

    #[test]
    fn test_any_field_change_changes_key() {
        let base = CompositeKey::of(&finding(1, "屋上", "漏水", "P-1"));
        assert_ne!(base, CompositeKey::of(&finding(2, "屋上", "漏水", "P-1")));
        assert_ne!(base, CompositeKey::of(&finding(1, "外壁", "漏水", "P-1")));
        assert_ne!(base, CompositeKey::of(&finding(1, "屋上", "腐食", "P-1")));
        assert_ne!(base, CompositeKey::of(&finding(1, "屋上", "漏水", "")));
    }

    #[test]
    fn test_encode_escapes_separator() {
        // 素朴な連結だとどちらも "1_a_b_c_" になる組み合わせ
        let a = CompositeKey::of(&finding(1, "a_b", "c", ""));
        let b = CompositeKey::of(&finding(1, "a", "b_c", ""));
        assert_ne!(a.encode(), b.encode());
        assert_eq!(a.encode(), "1_a\\_b_c_");
    }

    #[test]
    fn test_encode_plain() {
        let key = CompositeKey::of(&finding(12, "1階廊下", "ひび割れ", "P-001"));
        assert_eq!(key.to_string(), "12_1階廊下_ひび割れ_P-001");
    }

    #[test]
    fn test_saved_key_set_insert_discard() {
        let mut saved = SavedKeySet::new();
        let f = finding(1, "屋上", "漏水", "P-1");
        assert!(!saved.is_saved(&f));

        assert!(saved.insert(CompositeKey::of(&f)));
        assert!(!saved.insert(CompositeKey::of(&f)));
        assert!(saved.is_saved(&f));
        assert_eq!(saved.len(), 1);

        assert!(saved.discard(&CompositeKey::of(&f)));
        assert!(!saved.discard(&CompositeKey::of(&f)));
        assert!(saved.is_empty());
    }
}
