use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use vitalwatch_analysis::period::PeriodReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Txt,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Txt => "txt",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "txt" | "text" => Ok(ReportFormat::Txt),
            _ => Err(format!("unknown report format: {s}")),
        }
    }
}

/// Renders `report` as pretty JSON or as localized plain text.
pub fn render_report(report: &PeriodReport, format: ReportFormat, locale: &str) -> Result<String> {
    match format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize period report")
        }
        ReportFormat::Txt => Ok(report.render_text(locale)),
    }
}

/// Writes the rendered report into `dir` under [`PeriodReport::file_name`],
/// creating the directory if needed. Returns the written path.
pub fn write_report(
    report: &PeriodReport,
    dir: &Path,
    format: ReportFormat,
    locale: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory '{}'", dir.display()))?;
    let path = dir.join(report.file_name(format.extension()));
    let content = render_report(report, format, locale)?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write report '{}'", path.display()))?;
    Ok(path)
}
