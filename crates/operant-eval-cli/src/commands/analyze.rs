//! Analyze command.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use operant_eval::{AnalysisConfig, AnalysisSession, GroupKey};

#[allow(clippy::too_many_arguments)]
pub fn run(
    folders: Vec<PathBuf>,
    group_by: &[String],
    every: Option<u32>,
    drop: &[String],
    filters: &[String],
    date_filter: Option<&str>,
    start_date: Option<&str>,
    output: Option<PathBuf>,
    report_name: String,
    verbose: bool,
) -> Result<()> {
    if folders.is_empty() {
        bail!("at least one data folder is required");
    }

    let mut keys = Vec::new();
    if let Some(n) = every {
        keys.push(GroupKey::Every(n));
    }
    for name in group_by {
        let field = name.parse().map_err(|e: String| anyhow!(e))?;
        keys.push(GroupKey::Field(field));
    }

    let config = AnalysisConfig::new(folders)
        .with_filter(super::build_filter(filters, date_filter, start_date)?)
        .with_group_by(keys)
        .with_drop_columns(super::parse_fields(drop)?)
        .with_report_name(report_name);

    let session = AnalysisSession::open(config).context("failed to open analysis session")?;
    if verbose {
        eprintln!("Ingested {} trials", session.raw_data().len());
    }

    let path = match output {
        Some(path) => {
            let table = session.analyze()?;
            table.write_csv_path(&path)?;
            path
        }
        None => session.run()?,
    };
    println!("Report written to {}", path.display());
    Ok(())
}
