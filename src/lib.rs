//! # operant-eval
//!
//! Trial-data aggregation and signal-detection analysis for operant
//! conditioning experiments.
//!
//! The library ingests the per-session trial CSVs and settings JSONs written
//! by an experiment runner, unifies them into one date-sorted trial table,
//! and computes grouped performance reports (d-prime, bias, proportion
//! correct) suitable for CSV output.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use operant_eval::{AnalysisConfig, AnalysisSession, Field, GroupKey};
//!
//! let config = AnalysisConfig::new(vec!["/data/y18r8".into()])
//!     .with_group_by(vec![
//!         GroupKey::Field(Field::Date),
//!         GroupKey::Field(Field::Block),
//!     ]);
//!
//! let session = AnalysisSession::open(config)?;
//! let report_path = session.run()?;
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`fields`]: Reportable column catalog
//! - [`trial`]: Trial records and response classification
//! - [`stats`]: Signal-detection statistics over confusion matrices
//! - [`ingest`]: Trial CSV and settings ingestion
//! - [`filter`]: Trial-table filtering
//! - [`analyze`]: Grouped summaries and derived statistics
//! - [`session`]: End-to-end analysis sessions

pub mod analyze;
pub mod error;
pub mod fields;
pub mod filter;
pub mod ingest;
pub mod session;
pub mod stats;
pub mod trial;

// Re-export commonly used types
pub use analyze::{GroupKey, ReportTable, SummaryTable, Value, summarize};
pub use error::{Error, Result};
pub use fields::{AggKind, Field, FilterKind};
pub use filter::{DateOp, FieldFilter, FilterSpec};
pub use session::{AnalysisConfig, AnalysisSession, DEFAULT_REPORT_NAME};
pub use stats::{Analysis, ConfusionMatrix};
pub use trial::{Response, ResponseType, TrialClass, TrialRecord, TrialTable, classify};
