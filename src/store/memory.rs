//! メモリ上の点検データストア
//!
//! ファイルを使わずに保存処理を動かすためのストア。書き込み回数を数え、
//! 失敗を注入できる。

use super::RecordStore;
use crate::error::{InspectError, Result};
use inspect_common::PersistedRecord;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<PersistedRecord>,
    write_count: usize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存行を持った状態で作成
    pub fn with_records(records: Vec<PersistedRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// 以降の書き込みを失敗させる
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// `append_all` で実際に書き込んだ回数
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    pub fn records(&self) -> &[PersistedRecord] {
        &self.records
    }
}

impl RecordStore for MemoryStore {
    fn read_all(&self) -> Result<Vec<PersistedRecord>> {
        Ok(self.records.clone())
    }

    fn append_all(&mut self, records: &[PersistedRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        if self.fail_writes {
            return Err(InspectError::Persistence("書き込みが無効化されています".into()));
        }
        self.records.extend_from_slice(records);
        self.write_count += 1;
        Ok(())
    }
}
