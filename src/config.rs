use crate::error::{InspectError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DATA_DIR_ENV: &str = "INSPECT_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub default_inspector: Option<String>,
    pub store_file: String,
    pub location_master_file: String,
    pub deterioration_master_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            default_inspector: None,
            store_file: "inspection_data.csv".into(),
            location_master_file: "location_master.csv".into(),
            deterioration_master_file: "deterioration_master.csv".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(std::env::var(DATA_DIR_ENV).ok());
        Ok(config)
    }

    /// 環境変数の値で設定ファイルのデータフォルダを上書き（空白のみは無視）
    fn apply_env(&mut self, value: Option<String>) {
        if let Some(dir) = value.filter(|v| !v.trim().is_empty()) {
            tracing::debug!(dir = %dir, "data dir overridden by {}", DATA_DIR_ENV);
            self.data_dir = PathBuf::from(dir);
        }
    }

    /// `--data-dir` 指定は環境変数より優先
    pub fn apply_data_dir_flag(&mut self, dir: Option<PathBuf>) {
        if let Some(dir) = dir {
            self.data_dir = dir;
        }
    }

    /// 指定パスから読み込み（無ければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %path.display(), "config loaded");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| InspectError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("inspect-rust").join("config.json"))
    }

    /// データフォルダを作成して返す
    pub fn ensure_data_dir(&self) -> Result<&Path> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(&self.data_dir)
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file)
    }

    pub fn location_master_path(&self) -> PathBuf {
        self.data_dir.join(&self.location_master_file)
    }

    pub fn deterioration_master_path(&self) -> PathBuf {
        self.data_dir.join(&self.deterioration_master_file)
    }
}
