//! 12条点検 劣化項目記録ツール
//!
//! 劣化項目の下書きリストを編集し、未保存の項目だけを点検データCSVに追記する。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod master;
pub mod reconcile;
pub mod session;
pub mod store;
pub mod view;
