//! End-to-end analysis sessions.
//!
//! [`AnalysisConfig`] gathers everything one run needs (data folders, filter,
//! grouping, column drops, report name); [`AnalysisSession`] ingests once and
//! serves the raw, filtered, and analyzed views of that data.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::analyze::{self, GroupKey, ReportTable, SummaryTable};
use crate::error::{Error, Result};
use crate::fields::Field;
use crate::filter::FilterSpec;
use crate::ingest;
use crate::trial::TrialTable;

/// Default file name for the written performance report.
pub const DEFAULT_REPORT_NAME: &str = "performanceSummary.csv";

/// Configuration for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    folders: Vec<PathBuf>,
    filter: FilterSpec,
    group_by: Vec<GroupKey>,
    drop_columns: Vec<Field>,
    report_name: String,
}

impl AnalysisConfig {
    /// Config over the given data folders, with no filter and no grouping.
    #[must_use]
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self {
            folders,
            filter: FilterSpec::new(),
            group_by: Vec::new(),
            drop_columns: Vec::new(),
            report_name: DEFAULT_REPORT_NAME.to_string(),
        }
    }

    /// Restrict the run to trials passing the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    /// Group the analysis by the given keys.
    #[must_use]
    pub fn with_group_by(mut self, group_by: Vec<GroupKey>) -> Self {
        self.group_by = group_by;
        self
    }

    /// Omit the given columns from the output.
    #[must_use]
    pub fn with_drop_columns(mut self, drop_columns: Vec<Field>) -> Self {
        self.drop_columns = drop_columns;
        self
    }

    /// Override the report file name.
    #[must_use]
    pub fn with_report_name(mut self, report_name: impl Into<String>) -> Self {
        self.report_name = report_name.into();
        self
    }

    /// The configured data folders.
    #[must_use]
    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }
}

/// One opened analysis session: the ingested data plus its configuration.
#[derive(Debug)]
pub struct AnalysisSession {
    config: AnalysisConfig,
    raw: TrialTable,
}

impl AnalysisSession {
    /// Ingest the configured folders and open a session over them.
    pub fn open(config: AnalysisConfig) -> Result<Self> {
        if config.folders.is_empty() {
            return Err(Error::Report("no data folders given".into()));
        }
        let raw = ingest::ingest(&config.folders)?;
        info!(trials = raw.len(), "session opened");
        Ok(Self { config, raw })
    }

    /// The unfiltered trial table.
    #[must_use]
    pub fn raw_data(&self) -> &TrialTable {
        &self.raw
    }

    /// The trial table after applying the configured filter.
    #[must_use]
    pub fn filtered(&self) -> TrialTable {
        self.config.filter.apply(&self.raw)
    }

    /// Summary of the filtered data.
    #[must_use]
    pub fn summary(&self) -> SummaryTable {
        analyze::summarize(&self.filtered())
    }

    /// Analyzed report per the configured grouping and column drops.
    pub fn analyze(&self) -> Result<ReportTable> {
        analyze::analyze(&self.summary(), &self.config.group_by, &self.config.drop_columns)
    }

    /// Run the analysis and write the report CSV into the first data folder.
    ///
    /// Returns the path of the written report.
    pub fn run(&self) -> Result<PathBuf> {
        let table = self.analyze()?;
        let folder: &Path = self
            .config
            .folders
            .first()
            .ok_or_else(|| Error::Report("no data folders given".into()))?;
        let path = folder.join(&self.config.report_name);
        table.write_csv_path(&path)?;
        info!(report = %path.display(), rows = table.len(), "report written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::Value;
    use crate::filter::FieldFilter;

    const HEADER: &str = "Session,Trial,Epoch,File,Class,Response,Result,RT,Reward,Punish,Time\n";

    fn fixture_folder() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let trial_dir = dir.path().join("trialdata");
        let settings_dir = dir.path().join("settings_files");
        std::fs::create_dir_all(&trial_dir).unwrap();
        std::fs::create_dir_all(&settings_dir).unwrap();

        let mut body = HEADER.to_string();
        for i in 0..8 {
            body.push_str(&format!(
                "1,{i},e,/s/a.wav,sPlus,sPlus,r,0.2,True,False,2018-01-01 09:00:{i:02}\n"
            ));
        }
        for i in 8..12 {
            body.push_str(&format!(
                "1,{i},e,/s/b.wav,sMinus,sMinus,r,,False,False,2018-01-01 09:01:{:02}\n",
                i - 8
            ));
        }
        std::fs::write(trial_dir.join("y1_trialdata_1.csv"), body).unwrap();
        std::fs::write(
            settings_dir.join("y1_settings_1.json"),
            r#"{"block_design": {"order": ["training 1"]}}"#,
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_open_requires_folders() {
        assert!(AnalysisSession::open(AnalysisConfig::new(Vec::new())).is_err());
    }

    #[test]
    fn test_run_writes_report_to_first_folder() {
        let dir = fixture_folder();
        let config = AnalysisConfig::new(vec![dir.path().to_path_buf()])
            .with_group_by(vec![GroupKey::Field(Field::Block)]);
        let session = AnalysisSession::open(config).unwrap();
        assert_eq!(session.raw_data().len(), 12);

        let path = session.run().unwrap();
        assert_eq!(path, dir.path().join(DEFAULT_REPORT_NAME));

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Time,Block,RT"));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn test_filtered_analysis() {
        let dir = fixture_folder();
        let filter = FilterSpec::new()
            .with_field(Field::Class, FieldFilter::AnyOf(vec!["sPlus".into()]))
            .unwrap();
        let config = AnalysisConfig::new(vec![dir.path().to_path_buf()])
            .with_filter(filter)
            .with_group_by(vec![GroupKey::Field(Field::Block)]);
        let session = AnalysisSession::open(config).unwrap();

        let table = session.analyze().unwrap();
        assert_eq!(table.cell(0, "Hit"), Some(&Value::Int(8)));
        assert_eq!(table.cell(0, "CR"), Some(&Value::Int(0)));
        assert_eq!(table.cell(0, "Trials"), Some(&Value::Int(8)));
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let dir = fixture_folder();
        let config = AnalysisConfig::new(vec![dir.path().to_path_buf()])
            .with_group_by(vec![GroupKey::Field(Field::Block)]);
        let session = AnalysisSession::open(config).unwrap();

        let first = session.analyze().unwrap();
        let second = session.analyze().unwrap();
        assert_eq!(first.columns, second.columns);
        assert_eq!(first.rows, second.rows);

        let mut first_csv = Vec::new();
        let mut second_csv = Vec::new();
        first.write_csv(&mut first_csv).unwrap();
        second.write_csv(&mut second_csv).unwrap();
        assert_eq!(first_csv, second_csv);
    }

    #[test]
    fn test_analysis_leaves_baseline_untouched() {
        let dir = fixture_folder();
        let filter = FilterSpec::new()
            .with_field(Field::Class, FieldFilter::AnyOf(vec!["sPlus".into()]))
            .unwrap();
        let config = AnalysisConfig::new(vec![dir.path().to_path_buf()])
            .with_filter(filter)
            .with_group_by(vec![GroupKey::Field(Field::Block)]);
        let session = AnalysisSession::open(config).unwrap();

        let snapshot = |table: &crate::trial::TrialTable| -> Vec<(String, u32, String)> {
            table
                .rows
                .iter()
                .map(|r| (r.file.clone(), r.index, r.response_type.to_string()))
                .collect()
        };
        let before = snapshot(session.raw_data());

        // Repeated filter/summarize/analyze cycles build fresh tables only.
        session.analyze().unwrap();
        session.analyze().unwrap();
        assert_eq!(session.filtered().len(), 8);

        assert_eq!(snapshot(session.raw_data()), before);
        assert_eq!(session.raw_data().len(), 12);
    }

    #[test]
    fn test_custom_report_name() {
        let dir = fixture_folder();
        let config = AnalysisConfig::new(vec![dir.path().to_path_buf()])
            .with_report_name("blockSummary.csv");
        let session = AnalysisSession::open(config).unwrap();
        let path = session.run().unwrap();
        assert!(path.ends_with("blockSummary.csv"));
        assert!(path.exists());
    }
}
