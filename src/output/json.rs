//! JSON report output

use crate::output::traits::{OutputResult, ReportSink};
use crate::report::Report;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Envelope handed to the orchestrator alongside the report
#[derive(Debug, Serialize)]
struct Delivery<'a> {
    message: &'a str,
    report: &'a Report,
}

/// Serializes a report and its message as pretty-printed JSON
pub fn format_json_report(message: &str, report: &Report) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(&Delivery { message, report })?)
}

/// Writes the JSON form of a report to a file
pub fn write_json_report(message: &str, report: &Report, output_path: &Path) -> OutputResult<()> {
    let json = format_json_report(message, report)?;

    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;

    Ok(())
}

/// Sink that writes the report as JSON to a file
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for JsonFileSink {
    fn report(&self, message: &str, report: &Report) -> OutputResult<()> {
        write_json_report(message, report, &self.path)?;
        tracing::info!("Report written to: {}", self.path.display());
        Ok(())
    }
}
