pub mod csv;
pub mod excel;

use crate::error::Result;
use inspect_common::PersistedRecord;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            _ => Err(format!("Unknown format: {}. Use csv or excel", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
        }
    }
}

/// 出力先がフォルダ（または拡張子なし）ならファイル名を補う
fn output_path_for_format(output: &Path, file_stem: &str, format: ExportFormat) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", file_stem, format.extension()))
    } else {
        output.to_path_buf()
    }
}

/// 点検データを書き出し、出力したパスを返す
pub fn export_records(
    records: &[PersistedRecord],
    format: ExportFormat,
    output: &Path,
    file_stem: &str,
) -> Result<PathBuf> {
    let output_path = output_path_for_format(output, file_stem, format);

    match format {
        ExportFormat::Csv => {
            println!("- CSVを生成中...");
            csv::write_csv(records, &output_path)?;
        }
        ExportFormat::Excel => {
            println!("- Excelを生成中...");
            excel::generate_excel(records, &output_path)?;
        }
    }

    tracing::info!(path = %output_path.display(), rows = records.len(), format = %format, "exported");
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("xlsx".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_output_path_for_directory() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = output_path_for_format(dir.path(), "inspection_data", ExportFormat::Excel);
        assert_eq!(path, dir.path().join("inspection_data.xlsx"));

        let explicit = dir.path().join("out.csv");
        assert_eq!(output_path_for_format(&explicit, "x", ExportFormat::Csv), explicit);
    }
}
