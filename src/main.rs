use chrono::Local;
use clap::Parser;
use inspect_common::{InspectionMetadata, MasterKind};
use inspect_rust::{cli, config, error, export, master, session, store, view};
use cli::{Cli, Commands};
use config::Config;
use error::{InspectError, Result};
use session::interactive::{self, Vocabularies};
use store::{CsvFileStore, RecordStore};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut config = Config::load()?;
    config.apply_data_dir_flag(cli.data_dir.clone());

    match cli.command {
        Commands::Session { date, inspector, site, building, remarks } => {
            println!("📋 12条点検 - 点検入力\n");
            config.ensure_data_dir()?;

            let vocabularies = Vocabularies {
                locations: master::load_or_seed(&config.location_master_path(), MasterKind::Location)?,
                deteriorations: master::load_or_seed(
                    &config.deterioration_master_path(),
                    MasterKind::Deterioration,
                )?,
            };
            println!(
                "✔ マスタ読み込み: 場所 {}件 / 劣化名 {}件",
                vocabularies.locations.len(),
                vocabularies.deteriorations.len()
            );

            let mut store = CsvFileStore::new(config.store_path());
            println!("✔ 保存先: {}\n", store.path().display());

            let initial = InspectionMetadata {
                inspection_date: date.unwrap_or_else(|| Local::now().date_naive()),
                inspector_name: inspector
                    .or_else(|| config.default_inspector.clone())
                    .unwrap_or_default(),
                site_name: site.unwrap_or_default(),
                building_name: building.unwrap_or_default(),
                remarks: remarks.unwrap_or_default(),
            };

            interactive::run_session(initial, &vocabularies, &mut store)?;
            println!("\n✅ 点検入力を終了しました");
        }

        Commands::View { search, regex, json } => {
            let store = CsvFileStore::new(config.store_path());
            let filter = view::RecordFilter::new(search.as_deref(), regex)?;
            let records = filter.apply(store.read_all()?);

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                println!("📑 12条点検 - 点検データ閲覧\n");
                view::print_records(&records);
            }
        }

        Commands::Export { search, regex, format, output } => {
            println!("📄 12条点検 - エクスポート\n");

            let store = CsvFileStore::new(config.store_path());
            let filter = view::RecordFilter::new(search.as_deref(), regex)?;
            let records = filter.apply(store.read_all()?);
            println!("- 対象: {}件", records.len());

            let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
            let path = export::export_records(&records, format, &output_dir, "inspection_data")?;
            println!("✔ 出力: {}", path.display());

            println!("\n✅ エクスポート完了");
        }

        Commands::Master { init, show } => {
            let targets = [
                (MasterKind::Location, config.location_master_path()),
                (MasterKind::Deterioration, config.deterioration_master_path()),
            ];

            for (kind, path) in &targets {
                if init {
                    if path.exists() {
                        println!("- 既に存在します: {}", path.display());
                    } else {
                        master::seed(path, *kind)?;
                        println!("✔ 初期値で作成しました: {}", path.display());
                    }
                }

                if show || !init {
                    if !path.exists() {
                        println!("{}: マスタファイルが存在しません（{}）", kind.column(), path.display());
                        continue;
                    }
                    let vocabulary = master::load_or_seed(path, *kind)?;
                    println!("{} ({}件): {}", kind.column(), vocabulary.len(), vocabulary.values().join(", "));
                }
            }
        }

        Commands::Config { set_data_dir, set_inspector, show } => {
            // 保存するのはファイル上の設定（--data-dir・環境変数の上書きは含めない）
            let mut stored = Config::load_from(&Config::config_path()?)?;
            let mut changed = false;

            if let Some(dir) = set_data_dir {
                stored.data_dir = dir.clone();
                config.data_dir = dir;
                changed = true;
            }
            if let Some(name) = set_inspector {
                stored.default_inspector = Some(name.clone());
                config.default_inspector = Some(name);
                changed = true;
            }
            if changed {
                stored.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  データフォルダ: {}", config.data_dir.display());
                println!("  点検データ: {}", config.store_path().display());
                println!("  場所マスタ: {}", config.location_master_path().display());
                println!("  劣化名マスタ: {}", config.deterioration_master_path().display());
                println!(
                    "  既定の点検者名: {}",
                    config.default_inspector.as_deref().unwrap_or("未設定")
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("INSPECT_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| InspectError::Config(format!("ログ初期化エラー: {}", e)))
}
