//! 選択肢マスタ（場所・劣化名）
//!
//! 1列のCSV（ヘッダー + 値）で管理する。

use crate::csv::{format_record, parse_records};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// マスタの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MasterKind {
    /// 場所
    Location,
    /// 劣化名
    Deterioration,
}

impl MasterKind {
    /// CSVの列名
    pub fn column(&self) -> &'static str {
        match self {
            MasterKind::Location => "場所",
            MasterKind::Deterioration => "劣化名",
        }
    }

    /// ファイルが無いときに書き出す初期値
    pub fn default_values(&self) -> &'static [&'static str] {
        match self {
            MasterKind::Location => &[
                "1階廊下", "2階廊下", "屋上", "外壁", "階段", "玄関", "機械室", "駐車場",
            ],
            MasterKind::Deterioration => &[
                "ひび割れ", "剥離", "漏水", "腐食", "変形", "欠損", "さび", "変色",
            ],
        }
    }
}

/// 選択肢マスタ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterVocabulary {
    kind: MasterKind,
    values: Vec<String>,
}

impl MasterVocabulary {
    /// 初期値のマスタ
    pub fn with_defaults(kind: MasterKind) -> Self {
        Self {
            kind,
            values: kind.default_values().iter().map(|s| s.to_string()).collect(),
        }
    }

    /// CSV文字列から読み込み
    ///
    /// 1行目はヘッダーとして読み飛ばす。2列目以降・空欄・重複は無視する。
    pub fn from_csv_str(kind: MasterKind, content: &str) -> Result<Self> {
        let mut seen = HashSet::new();
        let values = parse_records(content)?
            .into_iter()
            .skip(1)
            .filter_map(|(_, fields)| fields.into_iter().next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && seen.insert(v.clone()))
            .collect();

        Ok(Self { kind, values })
    }

    /// CSV文字列に変換
    pub fn to_csv_string(&self) -> String {
        let mut out = format_record(&[self.kind.column()]);
        for value in &self.values {
            out.push_str(&format_record(&[value]));
        }
        out
    }

    pub fn kind(&self) -> MasterKind {
        self.kind
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
