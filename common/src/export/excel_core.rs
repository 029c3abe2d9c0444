//! Excel生成（共通ライブラリ）
//!
//! 点検データを1シートの一覧表として出力する

use crate::types::{PersistedRecord, RECORD_COLUMNS};
use rust_xlsxwriter::*;

/// 列幅（文字数ベース）
const COLUMN_WIDTHS: [f64; 10] = [12.0, 12.0, 20.0, 12.0, 24.0, 9.0, 16.0, 14.0, 12.0, 20.0];

const SHEET_NAME: &str = "点検データ";

/// 劣化番号の列
const SEQUENCE_COLUMN: usize = 5;

/// Excelをバッファに生成
pub fn generate_records_excel_buffer(records: &[PersistedRecord]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_font_size(10.0)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, (label, width)) in RECORD_COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet.write_string_with_format(0, col, *label, &header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, value) in record.to_fields().iter().enumerate() {
            if col == SEQUENCE_COLUMN {
                worksheet.write_number_with_format(
                    row,
                    col as u16,
                    f64::from(record.finding.sequence_id),
                    &value_format,
                )
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
            } else {
                worksheet.write_string_with_format(row, col as u16, value, &value_format)
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;
    if !records.is_empty() {
        worksheet.autofilter(0, 0, records.len() as u32, (RECORD_COLUMNS.len() - 1) as u16)
            .map_err(|e| format!("フィルタ設定エラー: {}", e))?;
    }

    workbook.save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
