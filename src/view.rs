//! 点検データの閲覧（検索・絞り込み）

use crate::error::Result;
use inspect_common::PersistedRecord;
use regex::{Regex, RegexBuilder};

/// 検索条件
#[derive(Debug, Clone, Default)]
pub enum RecordFilter {
    /// 絞り込みなし
    #[default]
    All,
    /// いずれかの列に部分一致（大文字小文字を区別しない）
    Text(String),
    /// いずれかの列が正規表現に一致（大文字小文字を区別しない）
    Pattern(Regex),
}

impl RecordFilter {
    /// 検索語から作成（空なら絞り込みなし）
    pub fn new(term: Option<&str>, use_regex: bool) -> Result<Self> {
        let term = match term.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return Ok(RecordFilter::All),
        };

        if use_regex {
            let regex = RegexBuilder::new(term).case_insensitive(true).build()?;
            Ok(RecordFilter::Pattern(regex))
        } else {
            Ok(RecordFilter::Text(term.to_string()))
        }
    }

    pub fn matches(&self, record: &PersistedRecord) -> bool {
        match self {
            RecordFilter::All => true,
            RecordFilter::Text(term) => record.contains_text(term),
            RecordFilter::Pattern(regex) => record.to_fields().iter().any(|f| regex.is_match(f)),
        }
    }

    /// 条件に合う行を保存順のまま返す
    pub fn apply(&self, records: Vec<PersistedRecord>) -> Vec<PersistedRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// 一覧表示用の1行
pub fn format_row(record: &PersistedRecord) -> String {
    let photo = if record.finding.photo_reference.is_empty() {
        "-"
    } else {
        record.finding.photo_reference.as_str()
    };
    format!(
        "{} | {} | {} {} | No.{} {} / {} | 写真: {} | {}",
        record.metadata.inspection_date,
        record.metadata.inspector_name,
        record.metadata.site_name,
        record.metadata.building_name,
        record.finding.sequence_id,
        record.finding.location,
        record.finding.deterioration_type,
        photo,
        record.written_at,
    )
}

/// 一覧を表示
pub fn print_records(records: &[PersistedRecord]) {
    if records.is_empty() {
        println!("保存された点検データがありません。");
        return;
    }

    println!("合計 {} 件のデータがあります\n", records.len());
    println!("点検日 | 点検者名 | 現場名 棟名 | 劣化番号 場所 / 劣化名 | 写真番号 | 作成日時");
    println!("{}", "-".repeat(72));
    for record in records {
        println!("{}", format_row(record));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspect_common::{Finding, InspectionMetadata};

    fn record(id: u32, site: &str, photo: &str) -> PersistedRecord {
        PersistedRecord::new(
            &InspectionMetadata {
                inspection_date: "2026-10-19".parse().unwrap(),
                site_name: site.into(),
                ..Default::default()
            },
            &Finding {
                sequence_id: id,
                location: "屋上".into(),
                deterioration_type: "漏水".into(),
                photo_reference: photo.into(),
            },
            "2026-10-19 10:00:00",
        )
    }

    #[test]
    fn test_empty_term_is_all() {
        assert!(matches!(RecordFilter::new(None, false).unwrap(), RecordFilter::All));
        assert!(matches!(RecordFilter::new(Some("  "), true).unwrap(), RecordFilter::All));
    }

    #[test]
    fn test_text_filter_matches_any_column() {
        let records = vec![record(1, "中央団地", "P-001"), record(2, "北団地", "p-002")];
        let filter = RecordFilter::new(Some("P-00"), false).unwrap();
        assert_eq!(filter.apply(records.clone()).len(), 2);

        let filter = RecordFilter::new(Some("北"), false).unwrap();
        let hits = filter.apply(records);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].finding.sequence_id, 2);
    }

    #[test]
    fn test_regex_filter() {
        let records = vec![record(1, "中央団地", "P-001"), record(2, "北団地", "X-9")];
        let filter = RecordFilter::new(Some("^p-\\d+$"), true).unwrap();
        let hits = filter.apply(records);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].finding.photo_reference, "P-001");
    }

    #[test]
    fn test_invalid_regex_is_error() {
        assert!(RecordFilter::new(Some("("), true).is_err());
    }

    #[test]
    fn test_format_row_without_photo() {
        let row = format_row(&record(3, "中央団地", ""));
        assert!(row.contains("No.3 屋上 / 漏水"));
        assert!(row.contains("写真: -"));
    }
}
