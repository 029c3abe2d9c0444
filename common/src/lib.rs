//! 12条点検 Common Library
//!
//! CLIで共有される型とユーティリティ

pub mod types;
pub mod key;
pub mod csv;
pub mod master;
pub mod error;
pub mod export;

pub use types::{Finding, InspectionMetadata, PersistedRecord, DATE_FORMAT, RECORD_COLUMNS};
pub use key::{CompositeKey, SavedKeySet};
pub use master::{MasterKind, MasterVocabulary};
pub use error::{Error, Result};
