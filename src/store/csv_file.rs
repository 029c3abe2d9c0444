//! CSVファイルによる点検データストア
//!
//! 既存の行は読み込んだテキストのまま残し、その後ろに新しい行を追記する。
//! 書き込みは一時ファイル経由で置き換えるので、失敗しても元のファイルは壊れない。

use super::encoding::{self, TextEncoding, CANDIDATES};
use super::RecordStore;
use crate::error::{InspectError, Result};
use inspect_common::csv::{format_record, parse_records};
use inspect_common::{PersistedRecord, RECORD_COLUMNS};
use std::path::{Path, PathBuf};

/// 保存時の文字コード
const WRITE_ENCODING: TextEncoding = TextEncoding::Utf8Bom;

#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイルを読み込んでデコード（無ければNone）
    fn read_text(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = std::fs::read(&self.path).map_err(|e| self.persistence("読み込み", e))?;
        let (text, detected) = encoding::decode(&bytes, CANDIDATES)
            .map_err(|e| self.persistence("読み込み", e))?;
        tracing::debug!(
            path = %self.path.display(),
            encoding = detected.label(),
            bytes = bytes.len(),
            "store file read"
        );
        Ok(Some(text))
    }

    fn parse(&self, text: &str) -> Result<Vec<PersistedRecord>> {
        let mut records = parse_records(text).map_err(|e| self.persistence("解析", e))?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let (_, header) = records.remove(0);
        let header_matches = header.len() == RECORD_COLUMNS.len()
            && header.iter().zip(RECORD_COLUMNS).all(|(h, c)| h.trim() == c);
        if !header_matches {
            return Err(InspectError::Persistence(format!(
                "{}: 列構成が一致しません（{}）",
                self.path.display(),
                header.join(",")
            )));
        }

        records
            .iter()
            .map(|(line, fields)| {
                PersistedRecord::from_fields(fields, *line).map_err(|e| self.persistence("解析", e))
            })
            .collect()
    }

    fn write_atomically(&self, text: &str) -> Result<()> {
        let bytes = encoding::encode(text, WRITE_ENCODING).map_err(|e| self.persistence("書き込み", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.persistence("書き込み", e))?;
            }
        }

        let mut temp_name = self.path.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".tmp");
        let temp_path = self.path.with_file_name(temp_name);

        std::fs::write(&temp_path, &bytes).map_err(|e| self.persistence("書き込み", e))?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            std::fs::remove_file(&temp_path).ok();
            return Err(self.persistence("書き込み", e));
        }
        Ok(())
    }

    fn persistence(&self, action: &str, err: impl std::fmt::Display) -> InspectError {
        InspectError::Persistence(format!("{}の{}に失敗: {}", self.path.display(), action, err))
    }
}

impl RecordStore for CsvFileStore {
    fn read_all(&self) -> Result<Vec<PersistedRecord>> {
        match self.read_text()? {
            Some(text) => self.parse(&text),
            None => Ok(Vec::new()),
        }
    }

    fn append_all(&mut self, records: &[PersistedRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let existing = self.read_text()?.unwrap_or_default();
        // 追記前に既存内容が壊れていないことを確認
        let existing_count = self.parse(&existing)?.len();

        let crlf = uses_crlf(&existing);
        let mut content = existing;
        if content.trim().is_empty() {
            content.clear();
            push_line(&mut content, format_record(&RECORD_COLUMNS), crlf);
        } else if !content.ends_with('\n') {
            content.push_str(if crlf { "\r\n" } else { "\n" });
        }

        for record in records {
            push_line(&mut content, format_record(record.to_fields().as_slice()), crlf);
        }

        self.write_atomically(&content)?;
        tracing::info!(
            path = %self.path.display(),
            existing = existing_count,
            appended = records.len(),
            "store file written"
        );
        Ok(())
    }
}

/// 先頭行（ヘッダー）の行末がCRLFか。クォート内の改行は行末とみなさない
fn uses_crlf(text: &str) -> bool {
    let mut in_quotes = false;
    let mut prev = '\0';
    for c in text.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\n' if !in_quotes => return prev == '\r',
            _ => {}
        }
        prev = c;
    }
    false
}

/// 行末を既存ファイルに合わせて追加
fn push_line(content: &mut String, line: String, crlf: bool) {
    match line.strip_suffix('\n') {
        Some(body) if crlf => {
            content.push_str(body);
            content.push_str("\r\n");
        }
        _ => content.push_str(&line),
    }
}
