//! Trial-data ingestion.
//!
//! Scans experiment data folders for trial CSVs, resolves each file's
//! companion settings JSON, classifies every row, and produces the unified
//! [`TrialTable`] sorted by trial date. Columns are addressed by fixed
//! position; header text is never consulted.
//!
//! Recovery policy: a folder that fails validation is skipped with a warning
//! (the first such error is returned only if every folder fails); a file with
//! missing or unreadable settings is skipped with a warning; a malformed row
//! is skipped with a warning.

pub mod settings;

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::trial::{Response, TrialClass, TrialRecord, TrialTable, classify};

/// Subfolder holding the per-session trial CSVs.
const TRIAL_SUBFOLDER: &str = "trialdata";
/// Subfolder holding the companion settings JSONs.
const SETTINGS_SUBFOLDER: &str = "settings_files";
/// Timestamp format written by the experiment runner.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Fixed column positions in the trial CSV, a contract with the experiment
// runner's log format.
const COL_SESSION: usize = 0;
const COL_INDEX: usize = 1;
const COL_STIMULUS: usize = 3;
const COL_CLASS: usize = 4;
const COL_RESPONSE: usize = 5;
const COL_RT: usize = 7;
const COL_REWARD: usize = 8;
const COL_PUNISH: usize = 9;
const COL_TIME: usize = 10;

/// Ingest every trial file under the given data folders into one table.
///
/// Folders are processed in the order given; within a folder, trial files are
/// processed in sorted name order. The final table is sorted by trial date
/// (stable, so within a date the file order is preserved).
///
/// Returns an error only when no folder could be ingested at all.
pub fn ingest(folders: &[PathBuf]) -> Result<TrialTable> {
    if folders.is_empty() {
        warn!("no data folders given, nothing to ingest");
    }
    let mut rows = Vec::new();
    let mut first_error = None;
    let mut ingested = 0_usize;
    for folder in folders {
        match ingest_folder(folder, &mut rows) {
            Ok(()) => ingested += 1,
            Err(e) => {
                warn!(folder = %folder.display(), error = %e, "skipping data folder");
                first_error.get_or_insert(e);
            }
        }
    }
    if ingested == 0 {
        if let Some(e) = first_error {
            return Err(e);
        }
    }
    rows.sort_by_key(|r| r.date());
    debug!(trials = rows.len(), folders = ingested, "ingest complete");
    Ok(TrialTable { rows })
}

/// Validate one data folder and append its trials to `rows`.
pub fn ingest_folder(folder: &Path, rows: &mut Vec<TrialRecord>) -> Result<()> {
    let invalid = |reason: &str| Error::DataFolder {
        path: folder.to_path_buf(),
        reason: reason.to_string(),
    };
    if !folder.is_dir() {
        return Err(invalid("not a directory"));
    }
    let trial_dir = folder.join(TRIAL_SUBFOLDER);
    let settings_dir = folder.join(SETTINGS_SUBFOLDER);
    if !trial_dir.is_dir() {
        return Err(invalid("missing trialdata subfolder"));
    }
    if !settings_dir.is_dir() {
        return Err(invalid("missing settings_files subfolder"));
    }

    let mut csv_files: Vec<PathBuf> = std::fs::read_dir(&trial_dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    // A valid but not-yet-used folder contributes nothing; only missing
    // structure is a configuration error.
    if csv_files.is_empty() {
        warn!(folder = %folder.display(), "no trial CSV files");
        return Ok(());
    }
    csv_files.sort();

    for csv_path in &csv_files {
        if let Err(e) = ingest_file(csv_path, &settings_dir, rows) {
            warn!(file = %csv_path.display(), error = %e, "skipping trial file");
        }
    }
    Ok(())
}

/// Ingest one trial CSV, resolving its settings from `settings_dir`.
fn ingest_file(csv_path: &Path, settings_dir: &Path, rows: &mut Vec<TrialRecord>) -> Result<()> {
    let file_name = csv_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(csv_path)?;
    let records: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;

    // A header-only file carries no trials; skip it before touching settings,
    // since runs aborted at startup often leave both files empty.
    if records.is_empty() {
        debug!(file = %file_name, "empty trial file");
        return Ok(());
    }

    let settings_path = settings_dir.join(settings_file_name(&file_name));
    let blocks = settings::load_block_names(&settings_path)?;
    let subject = subject_name(&file_name);

    for (i, record) in records.iter().enumerate() {
        // Line 1 is the header row.
        let line = i + 2;
        match decode_row(record, &file_name, subject, &blocks, csv_path, line) {
            Ok(row) => rows.push(row),
            Err(e) => warn!(error = %e, "skipping trial row"),
        }
    }
    Ok(())
}

/// Decode one CSV record into a classified trial.
pub fn decode_row(
    record: &csv::StringRecord,
    file: &str,
    subject: &str,
    blocks: &[String],
    path: &Path,
    line: usize,
) -> Result<TrialRecord> {
    let bad = |reason: String| Error::TrialRow {
        path: path.to_path_buf(),
        line,
        reason,
    };
    let get = |i: usize| record.get(i).unwrap_or("");

    let session: u32 = get(COL_SESSION)
        .trim()
        .parse()
        .map_err(|_| bad(format!("unparseable session {:?}", get(COL_SESSION))))?;
    let index: u32 = get(COL_INDEX)
        .trim()
        .parse()
        .map_err(|_| bad(format!("unparseable trial index {:?}", get(COL_INDEX))))?;
    let time = NaiveDateTime::parse_from_str(get(COL_TIME), TIME_FORMAT)
        .map_err(|_| bad(format!("unparseable timestamp {:?}", get(COL_TIME))))?;
    let block = session
        .checked_sub(1)
        .and_then(|i| blocks.get(i as usize))
        .ok_or_else(|| bad(format!("session {session} has no block in settings")))?
        .clone();

    let class = TrialClass::parse(get(COL_CLASS));
    let response = Response::parse(get(COL_RESPONSE));
    let response_type = classify(&response, &class);

    // Last path segment of the stimulus file.
    let stimulus = get(COL_STIMULUS)
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();

    // Blank or malformed reaction times become NaN and are excluded from
    // means downstream.
    let rt_text = get(COL_RT).trim();
    let rt = if rt_text.is_empty() {
        f64::NAN
    } else {
        rt_text.parse().unwrap_or(f64::NAN)
    };

    Ok(TrialRecord {
        subject: subject.to_string(),
        file: file.to_string(),
        session,
        file_count: 1,
        block,
        index,
        time,
        response_type,
        stimulus,
        class,
        response,
        rt,
        reward: u32::from(get(COL_REWARD) == "True"),
        punish: u32::from(get(COL_PUNISH) == "True"),
    })
}

/// Companion settings file name for a trial CSV name.
fn settings_file_name(csv_name: &str) -> String {
    let stem = csv_name.strip_suffix(".csv").unwrap_or(csv_name);
    format!("{}.json", stem.replace("trialdata", "settings"))
}

/// Subject identifier from a trial file name (prefix before the first `_`).
fn subject_name(file_name: &str) -> &str {
    file_name.split('_').next().unwrap_or(file_name)
}
