//! CSV出力（BOM付きUTF-8、Excelでそのまま開ける形式）

use crate::error::{InspectError, Result};
use crate::store::encoding::{self, TextEncoding};
use inspect_common::csv::format_record;
use inspect_common::{PersistedRecord, RECORD_COLUMNS};
use std::path::Path;

/// CSV文字列を生成
pub fn to_csv_string(records: &[PersistedRecord]) -> String {
    let mut out = format_record(&RECORD_COLUMNS);
    for record in records {
        out.push_str(&format_record(record.to_fields().as_slice()));
    }
    out
}

pub fn write_csv(records: &[PersistedRecord], output_path: &Path) -> Result<()> {
    let bytes = encoding::encode(&to_csv_string(records), TextEncoding::Utf8Bom)
        .map_err(|e| InspectError::Export(format!("CSV生成エラー: {}", e)))?;
    std::fs::write(output_path, bytes)
        .map_err(|e| InspectError::Export(format!("CSV保存エラー: {}", e)))?;
    Ok(())
}
