//! 点検データストア
//!
//! 保存処理は `RecordStore` だけを通してストアに触れる。

pub mod encoding;
mod csv_file;
mod memory;

pub use csv_file::CsvFileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use inspect_common::PersistedRecord;

/// 追記専用のレコードストア
pub trait RecordStore {
    /// 全行を保存順に読み込む
    fn read_all(&self) -> Result<Vec<PersistedRecord>>;

    /// 既存行の後ろに追記する
    ///
    /// 失敗した場合は1行も追記されない。
    fn append_all(&mut self, records: &[PersistedRecord]) -> Result<()>;
}
