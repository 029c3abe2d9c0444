//! 点検データの型定義
//!
//! - Finding: 劣化項目（下書きリストの1件）
//! - InspectionMetadata: 点検の基本情報
//! - PersistedRecord: 点検データCSVの1行

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 点検日の保存形式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Excelで保存し直されたファイルに現れる形式も読み込み時だけ受け付ける
const DATE_READ_FORMATS: [&str; 2] = [DATE_FORMAT, "%Y/%m/%d"];

/// 点検データCSVの列名（この順で保存する）
pub const RECORD_COLUMNS: [&str; 10] = [
    "点検日",
    "点検者名",
    "現場名",
    "棟名",
    "備考",
    "劣化番号",
    "場所",
    "劣化名",
    "写真番号",
    "作成日時",
];

/// 劣化項目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub sequence_id: u32,         // 劣化番号
    pub location: String,         // 場所
    pub deterioration_type: String, // 劣化名
    #[serde(default)]
    pub photo_reference: String,  // 写真番号
}

/// 点検の基本情報
///
/// 1回の点検セッションで一度だけ入力し、保存する全行に共通で使う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionMetadata {
    /// 点検日（CSVでは YYYY-MM-DD）
    pub inspection_date: NaiveDate,
    pub inspector_name: String,
    pub site_name: String,
    pub building_name: String,
    pub remarks: String,
}

/// 点検データの1行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord {
    #[serde(flatten)]
    pub metadata: InspectionMetadata,
    #[serde(flatten)]
    pub finding: Finding,
    /// 作成日時（YYYY-MM-DD HH:MM:SS）
    pub written_at: String,
}

impl PersistedRecord {
    pub fn new(metadata: &InspectionMetadata, finding: &Finding, written_at: &str) -> Self {
        Self {
            metadata: metadata.clone(),
            finding: finding.clone(),
            written_at: written_at.to_string(),
        }
    }

    /// CSV列順のフィールド列に変換
    pub fn to_fields(&self) -> Vec<String> {
        vec![
            self.metadata.inspection_date.format(DATE_FORMAT).to_string(),
            self.metadata.inspector_name.clone(),
            self.metadata.site_name.clone(),
            self.metadata.building_name.clone(),
            self.metadata.remarks.clone(),
            self.finding.sequence_id.to_string(),
            self.finding.location.clone(),
            self.finding.deterioration_type.clone(),
            self.finding.photo_reference.clone(),
            self.written_at.clone(),
        ]
    }

    /// CSVの1行から復元
    ///
    /// `line` はエラーメッセージ用の行番号。
    pub fn from_fields(fields: &[String], line: usize) -> Result<Self> {
        if fields.len() != RECORD_COLUMNS.len() {
            return Err(Error::Csv {
                line,
                message: format!(
                    "列数が不正です（{}列、期待値{}列）",
                    fields.len(),
                    RECORD_COLUMNS.len()
                ),
            });
        }

        let sequence_id = fields[5].trim().parse::<u32>().map_err(|_| Error::Csv {
            line,
            message: format!("劣化番号が数値ではありません: {}", fields[5]),
        })?;

        let inspection_date = parse_date(&fields[0]).ok_or_else(|| Error::Csv {
            line,
            message: format!("点検日の形式が不正です: {}", fields[0]),
        })?;

        Ok(Self {
            metadata: InspectionMetadata {
                inspection_date,
                inspector_name: fields[1].clone(),
                site_name: fields[2].clone(),
                building_name: fields[3].clone(),
                remarks: fields[4].clone(),
            },
            finding: Finding {
                sequence_id,
                location: fields[6].clone(),
                deterioration_type: fields[7].clone(),
                photo_reference: fields[8].clone(),
            },
            written_at: fields[9].clone(),
        })
    }

    /// いずれかの列に検索語を含むか（大文字小文字を区別しない）
    pub fn contains_text(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.to_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_READ_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text.trim(), format).ok())
}
