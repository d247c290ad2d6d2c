pub mod excel;

use crate::error::Result;
use crate::migrate::MigrationReport;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Json,
    Excel,
    Both,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            "both" => Ok(ReportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use json, excel, or both", s)),
        }
    }
}

fn with_extension(output: &Path, extension: &str) -> PathBuf {
    if output.is_dir() {
        output.join(format!("report.{}", extension))
    } else {
        output.with_extension(extension)
    }
}

/// Writes the run report, returning the files created.
pub fn export_report(report: &MigrationReport, format: ReportFormat, output: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if matches!(format, ReportFormat::Json | ReportFormat::Both) {
        let path = with_extension(output, "json");
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;
        written.push(path);
    }

    if matches!(format, ReportFormat::Excel | ReportFormat::Both) {
        let path = with_extension(output, "xlsx");
        excel::generate_excel(report, &path)?;
        written.push(path);
    }

    Ok(written)
}
