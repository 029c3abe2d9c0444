use crate::export::ExportFormat;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inspect")]
#[command(about = "12条点検 劣化項目記録ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// データフォルダ（設定ファイルより優先）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話式で点検情報と劣化項目を入力して保存
    Session {
        /// 点検日 (YYYY-MM-DD、省略時は今日)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// 点検者名
        #[arg(short, long)]
        inspector: Option<String>,

        /// 現場名
        #[arg(short, long)]
        site: Option<String>,

        /// 棟名
        #[arg(short, long)]
        building: Option<String>,

        /// 備考
        #[arg(short, long)]
        remarks: Option<String>,
    },

    /// 保存済みの点検データを表示
    View {
        /// 検索語（点検日、現場名、劣化番号、写真番号など）
        #[arg(short, long)]
        search: Option<String>,

        /// 検索語を正規表現として扱う
        #[arg(long)]
        regex: bool,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 点検データをCSV/Excelに書き出し
    Export {
        /// 検索語（指定時は一致する行のみ）
        #[arg(short, long)]
        search: Option<String>,

        /// 検索語を正規表現として扱う
        #[arg(long)]
        regex: bool,

        /// 出力形式 (csv/excel)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 選択肢マスタ（場所・劣化名）を表示/作成
    Master {
        /// マスタファイルが無ければ初期値で作成
        #[arg(long)]
        init: bool,

        /// マスタの内容を表示
        #[arg(long)]
        show: bool,
    },

    /// 設定を表示/編集
    Config {
        /// データフォルダを設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 既定の点検者名を設定
        #[arg(long)]
        set_inspector: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_session_date() {
        let cli = Cli::parse_from(["inspect", "session", "--date", "2026-10-19", "-s", "中央団地"]);
        match cli.command {
            Commands::Session { date, site, .. } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 19));
                assert_eq!(site.as_deref(), Some("中央団地"));
            }
            _ => panic!("session として解析されていない"),
        }
    }

    #[test]
    fn test_parse_export_format() {
        let cli = Cli::parse_from(["inspect", "--data-dir", "/tmp/d", "export", "-f", "xlsx"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/d")));
        assert!(matches!(cli.command, Commands::Export { format: ExportFormat::Excel, .. }));
    }
}
