//! Excel生成（CLI版）

use crate::error::{InspectError, Result};
use inspect_common::export::excel_core::generate_records_excel_buffer;
use inspect_common::PersistedRecord;
use std::path::Path;

pub fn generate_excel(records: &[PersistedRecord], output_path: &Path) -> Result<()> {
    let buffer = generate_records_excel_buffer(records)
        .map_err(|e| InspectError::Export(format!("Excel生成エラー: {}", e)))?;
    std::fs::write(output_path, buffer)
        .map_err(|e| InspectError::Export(format!("Excel保存エラー: {}", e)))?;
    Ok(())
}
