//! Raw summary dump command.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use operant_eval::{AnalysisConfig, AnalysisSession};

pub fn run(
    folders: Vec<PathBuf>,
    filters: &[String],
    date_filter: Option<&str>,
    start_date: Option<&str>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    if folders.is_empty() {
        bail!("at least one data folder is required");
    }

    let config = AnalysisConfig::new(folders)
        .with_filter(super::build_filter(filters, date_filter, start_date)?);
    let session = AnalysisSession::open(config).context("failed to open analysis session")?;
    if verbose {
        eprintln!("Ingested {} trials", session.raw_data().len());
    }

    // No grouping: per-trial rows.
    let table = session.analyze()?;
    match output {
        Some(path) => {
            table.write_csv_path(&path)?;
            eprintln!("Wrote {} trials to {}", table.len(), path.display());
        }
        None => table.write_csv(std::io::stdout().lock())?,
    }
    Ok(())
}
