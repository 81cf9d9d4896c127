//! CLI command for data export
//!
//! Writes one month's rows as CSV or the whole month report as JSON, to a
//! file or to stdout.

use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{DashboardError, DashboardResult};
use crate::models::MonthPeriod;
use crate::reports::MonthDashboard;
use crate::services::LedgerService;

/// Export format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One line per row of every table
    #[default]
    Csv,
    /// The full month report
    Json,
}

/// Arguments of `findash export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Month (YYYY-MM, defaults to the current month)
    #[arg(short, long, value_parser = MonthPeriod::parse)]
    pub period: Option<MonthPeriod>,
}

/// Handle the export command
pub fn handle_export_command(ledger: &LedgerService, args: ExportArgs) -> DashboardResult<()> {
    let period = args.period.unwrap_or_else(MonthPeriod::current);
    let data = ledger.load_month(period)?;
    if data.is_empty() {
        return Err(DashboardError::Export(format!(
            "nothing to export for {}",
            period.friendly()
        )));
    }
    let report = MonthDashboard::generate(period, &data);

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                DashboardError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            write_report(&report, args.format, BufWriter::new(file))?;
            println!("Exported {} to {}", period.friendly(), path.display());
        }
        None => {
            let stdout = io::stdout();
            write_report(&report, args.format, stdout.lock())?;
        }
    }

    Ok(())
}

fn write_report<W: Write>(
    report: &MonthDashboard,
    format: ExportFormat,
    mut writer: W,
) -> DashboardResult<()> {
    match format {
        ExportFormat::Csv => report.export_csv(&mut writer)?,
        ExportFormat::Json => {
            report.export_json(&mut writer)?;
            writeln!(writer)?;
        }
    }
    writer
        .flush()
        .map_err(|e| DashboardError::Export(e.to_string()))
}
