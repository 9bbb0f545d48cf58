//! Summary aggregation and per-group signal-detection statistics.
//!
//! [`summarize`] narrows a trial table to the reportable columns;
//! [`analyze`] optionally groups the summary and computes the derived
//! statistics (d-prime, bias, proportion-correct family) per group. Both
//! produce a [`ReportTable`] ready for CSV output.

pub mod report;

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{Error, Result};
use crate::fields::{AggKind, Field};
use crate::stats::{self, ConfusionMatrix};
use crate::trial::{TrialRecord, TrialTable};

pub use report::{ReportTable, Value};

/// Bookkeeping columns dropped from every summary before analysis.
pub const SUMMARY_DROPPED: [Field; 4] = [
    Field::Reward,
    Field::Punish,
    Field::Session,
    Field::FileCount,
];

/// Header of the synthetic bucket column produced by [`GroupKey::Every`].
pub const BIN_COLUMN: &str = "Bin";

/// Below this many trials in a family, bias is reported as `n/a`.
const MIN_TRIALS_FOR_BIAS: u32 = 10;

/// Stand-in for an outcome count of zero when forming training proportions,
/// so a flawless run reports ~1.0 instead of an empty cell.
const ZERO_COUNT_STANDIN: f64 = 0.001;

/// One grouping dimension for [`analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    /// Group by a categorical column (must be index-kind).
    Field(Field),
    /// Group every N consecutive trials into a bucket, reported in a
    /// synthetic leading `Bin` column.
    Every(u32),
}

/// A trial table narrowed to the reportable columns.
///
/// Row content is untouched; the summary records which columns downstream
/// reports may show. Rows stay in the source table's date order.
#[derive(Debug, Clone, Default)]
pub struct SummaryTable {
    /// Trial rows in date order.
    pub rows: Vec<TrialRecord>,
}

impl SummaryTable {
    /// Number of trials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the summary holds no trials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Narrow a trial table to its reportable summary.
#[must_use]
pub fn summarize(table: &TrialTable) -> SummaryTable {
    SummaryTable {
        rows: table.rows.clone(),
    }
}

/// Hashable per-row grouping key component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyValue {
    Text(String),
    Date(NaiveDate),
    Bin(u32),
}

/// Per-family outcome counters summed over one group.
#[derive(Debug, Clone, Copy, Default)]
struct Counts {
    hit: u32,
    miss: u32,
    miss_nr: u32,
    fa: u32,
    cr: u32,
    cr_nr: u32,
    trials: u32,
    probe_hit: u32,
    probe_miss: u32,
    probe_miss_nr: u32,
    probe_fa: u32,
    probe_cr: u32,
    probe_cr_nr: u32,
    probe_trials: u32,
}

impl Counts {
    fn add(&mut self, row: &TrialRecord) {
        let r = row.response_type;
        self.hit += r.indicator(Field::Hit);
        self.miss += r.indicator(Field::Miss);
        self.miss_nr += r.indicator(Field::MissNr);
        self.fa += r.indicator(Field::FalseAlarm);
        self.cr += r.indicator(Field::CorrectRejection);
        self.cr_nr += r.indicator(Field::CorrectRejectionNr);
        self.trials += r.indicator(Field::Trials);
        self.probe_hit += r.indicator(Field::ProbeHit);
        self.probe_miss += r.indicator(Field::ProbeMiss);
        self.probe_miss_nr += r.indicator(Field::ProbeMissNr);
        self.probe_fa += r.indicator(Field::ProbeFalseAlarm);
        self.probe_cr += r.indicator(Field::ProbeCorrectRejection);
        self.probe_cr_nr += r.indicator(Field::ProbeCorrectRejectionNr);
        self.probe_trials += r.indicator(Field::ProbeTrials);
    }

    fn get(&self, field: Field) -> u32 {
        match field {
            Field::Hit => self.hit,
            Field::Miss => self.miss,
            Field::MissNr => self.miss_nr,
            Field::FalseAlarm => self.fa,
            Field::CorrectRejection => self.cr,
            Field::CorrectRejectionNr => self.cr_nr,
            Field::Trials => self.trials,
            Field::ProbeHit => self.probe_hit,
            Field::ProbeMiss => self.probe_miss,
            Field::ProbeMissNr => self.probe_miss_nr,
            Field::ProbeFalseAlarm => self.probe_fa,
            Field::ProbeCorrectRejection => self.probe_cr,
            Field::ProbeCorrectRejectionNr => self.probe_cr_nr,
            Field::ProbeTrials => self.probe_trials,
            _ => 0,
        }
    }
}

/// Running aggregates for one group.
#[derive(Debug, Clone)]
struct GroupAccum {
    min_time: NaiveDateTime,
    rt_sum: f64,
    rt_count: u32,
    counts: Counts,
}

impl GroupAccum {
    fn new(row: &TrialRecord) -> Self {
        let mut accum = Self {
            min_time: row.time,
            rt_sum: 0.0,
            rt_count: 0,
            counts: Counts::default(),
        };
        accum.add(row);
        accum
    }

    fn add(&mut self, row: &TrialRecord) {
        self.min_time = self.min_time.min(row.time);
        if !row.rt.is_nan() {
            self.rt_sum += row.rt;
            self.rt_count += 1;
        }
        self.counts.add(row);
    }

    /// Mean reaction time over responded trials; NaN when none responded.
    fn rt_mean(&self) -> f64 {
        if self.rt_count == 0 {
            f64::NAN
        } else {
            self.rt_sum / f64::from(self.rt_count)
        }
    }
}

/// Rounded quotient, or `Null` on a zero denominator.
fn ratio(numerator: f64, denominator: f64, places: u32) -> Value {
    if denominator == 0.0 {
        Value::Null
    } else {
        Value::Float(stats::round_to(numerator / denominator, places))
    }
}

fn dprime3(m: [[f64; 2]; 2]) -> Value {
    stats::dprime(&ConfusionMatrix::from_binary(m))
        .map_or(Value::Null, |v| Value::Float(stats::round_to(v, 3)))
}

fn bias3(m: [[f64; 2]; 2], family_trials: u32) -> Value {
    if family_trials < MIN_TRIALS_FOR_BIAS {
        return Value::NotApplicable;
    }
    stats::bias(&ConfusionMatrix::from_binary(m))
        .map_or(Value::Null, |v| Value::Float(stats::round_to(v, 3)))
}

fn standin(count: u32) -> f64 {
    if count == 0 {
        ZERO_COUNT_STANDIN
    } else {
        f64::from(count)
    }
}

/// Derived statistic for one group.
fn derived(c: &Counts, field: Field) -> Value {
    let (hit, miss, miss_nr) = (f64::from(c.hit), f64::from(c.miss), f64::from(c.miss_nr));
    let (fa, cr, cr_nr) = (f64::from(c.fa), f64::from(c.cr), f64::from(c.cr_nr));
    let (p_hit, p_miss, p_miss_nr) = (
        f64::from(c.probe_hit),
        f64::from(c.probe_miss),
        f64::from(c.probe_miss_nr),
    );
    let (p_fa, p_cr, p_cr_nr) = (
        f64::from(c.probe_fa),
        f64::from(c.probe_cr),
        f64::from(c.probe_cr_nr),
    );
    // Zero training miss/FA counts are replaced with a small stand-in for the
    // proportion columns only; d-prime and bias use the true counts (they
    // have their own edge correction), as do all probe proportions.
    let miss_s = standin(c.miss);
    let miss_nr_s = standin(c.miss_nr);
    let fa_s = standin(c.fa);

    match field {
        Field::DPrime => dprime3([[hit, miss], [fa, cr]]),
        Field::DPrimeNr => dprime3([[hit, miss + miss_nr], [fa, cr + cr_nr]]),
        Field::Beta => bias3([[hit, miss], [fa, cr]], c.trials),
        Field::BetaNr => bias3([[hit, miss + miss_nr], [fa, cr + cr_nr]], c.trials),
        Field::SPlus => ratio(hit, hit + miss_s, 5),
        Field::SPlusNr => ratio(hit, hit + miss_s + miss_nr_s, 5),
        Field::SMinus => ratio(cr, cr + fa_s, 5),
        Field::SMinusNr => ratio(cr + cr_nr, fa_s + cr + cr_nr, 5),
        Field::TotalCorrect => ratio(hit + cr, hit + cr + miss_s + fa_s, 5),
        Field::TotalCorrectNr => ratio(hit + cr + cr_nr, f64::from(c.trials), 5),
        Field::PropCrResets => ratio(cr, cr + cr_nr, 5),
        Field::ProbeDPrime => dprime3([[p_hit, p_miss], [p_fa, p_cr]]),
        Field::ProbeDPrimeNr => {
            dprime3([[p_hit, p_miss + p_miss_nr], [p_fa, p_cr + p_cr_nr]])
        }
        Field::ProbeBeta => bias3([[p_hit, p_miss], [p_fa, p_cr]], c.probe_trials),
        Field::ProbeBetaNr => bias3(
            [[p_hit, p_miss + p_miss_nr], [p_fa, p_cr + p_cr_nr]],
            c.probe_trials,
        ),
        Field::ProbeSPlus => ratio(p_hit, p_hit + p_miss, 5),
        Field::ProbeSPlusNr => ratio(p_hit, p_hit + p_miss + p_miss_nr, 5),
        Field::ProbeSMinus => ratio(p_cr, p_cr + p_fa, 5),
        Field::ProbeSMinusNr => ratio(p_cr + p_cr_nr, p_fa + p_cr + p_cr_nr, 5),
        Field::ProbeTotalCorrect => {
            ratio(p_hit + p_cr, p_hit + p_cr + p_miss + p_fa, 5)
        }
        Field::ProbeTotalCorrectNr => {
            ratio(p_hit + p_cr + p_cr_nr, f64::from(c.probe_trials), 5)
        }
        _ => Value::Null,
    }
}

/// Per-trial cell for the ungrouped (raw) report.
fn raw_value(row: &TrialRecord, field: Field) -> Value {
    match field {
        Field::Subject => Value::Text(row.subject.clone()),
        Field::File => Value::Text(row.file.clone()),
        Field::Session => Value::Int(i64::from(row.session)),
        Field::FileCount => Value::Int(i64::from(row.file_count)),
        Field::Date => Value::Date(row.date()),
        Field::Time => Value::Time(row.time),
        Field::Block => Value::Text(row.block.clone()),
        Field::Index => Value::Int(i64::from(row.index)),
        Field::Stimulus => Value::Text(row.stimulus.clone()),
        Field::Class => Value::Text(row.class.to_string()),
        Field::ResponseType => Value::Text(row.response_type.to_string()),
        Field::Response => Value::Text(row.response.to_string()),
        Field::ReactionTime => Value::Float(row.rt),
        Field::Reward => Value::Int(i64::from(row.reward)),
        Field::Punish => Value::Int(i64::from(row.punish)),
        other => Value::Int(i64::from(row.response_type.indicator(other))),
    }
}

/// Output column source after grouping.
enum Column {
    Bin,
    Key(usize, Field),
    Agg(Field),
}

/// Analyze a summary, optionally grouped.
///
/// Without group keys this renders the per-trial summary (derived columns are
/// undefined per trial and omitted). With group keys, rows are bucketed in
/// first-encountered order, aggregated (`Time` by minimum, reaction time by
/// NaN-skipping mean, counters by sum), re-sorted chronologically by each
/// group's earliest trial, and extended with the derived statistics.
///
/// Columns named in `drop` are omitted from the output.
pub fn analyze(summary: &SummaryTable, group_by: &[GroupKey], drop: &[Field]) -> Result<ReportTable> {
    if group_by.is_empty() {
        return Ok(raw_report(&summary.rows, drop));
    }

    for key in group_by {
        match *key {
            GroupKey::Field(field) if field.kind() != AggKind::Index => {
                return Err(Error::Report(format!(
                    "column {field} cannot be used as a grouping key"
                )));
            }
            GroupKey::Every(0) => {
                return Err(Error::Report("bucket size must be at least 1".into()));
            }
            _ => {}
        }
    }
    if group_by
        .iter()
        .filter(|k| matches!(k, GroupKey::Every(_)))
        .count()
        > 1
    {
        return Err(Error::Report("at most one trial bucket key is allowed".into()));
    }

    // Bucket rows, keeping groups in first-encountered order.
    let mut order: HashMap<Vec<KeyValue>, usize> = HashMap::new();
    let mut groups: Vec<(Vec<KeyValue>, GroupAccum)> = Vec::new();
    for (i, row) in summary.rows.iter().enumerate() {
        let key: Vec<KeyValue> = group_by
            .iter()
            .map(|k| match *k {
                GroupKey::Field(Field::Date) => KeyValue::Date(row.date()),
                GroupKey::Field(field) => {
                    KeyValue::Text(row.text_value(field).unwrap_or_default())
                }
                GroupKey::Every(n) => KeyValue::Bin((i / n as usize) as u32),
            })
            .collect();
        match order.get(&key) {
            Some(&at) => groups[at].1.add(row),
            None => {
                order.insert(key.clone(), groups.len());
                groups.push((key, GroupAccum::new(row)));
            }
        }
    }
    // Stable, so groups sharing an earliest instant keep encounter order.
    groups.sort_by_key(|(_, accum)| accum.min_time);
    debug!(groups = groups.len(), trials = summary.len(), "grouped summary");

    let key_position = |field: Field| {
        group_by
            .iter()
            .position(|k| *k == GroupKey::Field(field))
    };
    let bin_position = group_by
        .iter()
        .position(|k| matches!(k, GroupKey::Every(_)));

    let mut columns = Vec::new();
    if bin_position.is_some() {
        columns.push((BIN_COLUMN.to_string(), Column::Bin));
    }
    for field in Field::ALL {
        if drop.contains(&field) {
            continue;
        }
        if let Some(pos) = key_position(field) {
            columns.push((field.name().to_string(), Column::Key(pos, field)));
        } else if field == Field::Time
            || field == Field::ReactionTime
            || field.kind() == AggKind::Derived
            || (field.kind() == AggKind::Sum && !SUMMARY_DROPPED.contains(&field))
        {
            columns.push((field.name().to_string(), Column::Agg(field)));
        }
    }

    let rows = groups
        .iter()
        .map(|(key, accum)| {
            columns
                .iter()
                .map(|(_, source)| match source {
                    Column::Bin => match bin_position.map(|p| &key[p]) {
                        Some(&KeyValue::Bin(bin)) => Value::Int(i64::from(bin)),
                        _ => Value::Null,
                    },
                    Column::Key(pos, _) => match &key[*pos] {
                        KeyValue::Text(s) => Value::Text(s.clone()),
                        KeyValue::Date(d) => Value::Date(*d),
                        KeyValue::Bin(b) => Value::Int(i64::from(*b)),
                    },
                    Column::Agg(field) => match field {
                        Field::Time => Value::Time(accum.min_time),
                        Field::ReactionTime => Value::Float(accum.rt_mean()),
                        f if f.kind() == AggKind::Sum => {
                            Value::Int(i64::from(accum.counts.get(*f)))
                        }
                        f => derived(&accum.counts, *f),
                    },
                })
                .collect()
        })
        .collect();

    Ok(ReportTable {
        columns: columns.into_iter().map(|(name, _)| name).collect(),
        rows,
    })
}

/// Ungrouped per-trial report.
fn raw_report(rows: &[TrialRecord], drop: &[Field]) -> ReportTable {
    let fields: Vec<Field> = Field::ALL
        .into_iter()
        .filter(|f| {
            !SUMMARY_DROPPED.contains(f) && f.kind() != AggKind::Derived && !drop.contains(f)
        })
        .collect();
    ReportTable {
        columns: fields.iter().map(|f| f.name().to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| fields.iter().map(|f| raw_value(row, *f)).collect())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial::{Response, ResponseType, TrialClass, classify};

    fn record(day: u32, second: u32, block: &str, class: TrialClass, response: Response) -> TrialRecord {
        let response_type = classify(&response, &class);
        TrialRecord {
            subject: "y1".into(),
            file: "y1_trialdata.csv".into(),
            session: 1,
            file_count: 1,
            block: block.into(),
            index: second,
            time: NaiveDate::from_ymd_opt(2018, 1, day)
                .unwrap()
                .and_hms_opt(9, 0, second)
                .unwrap(),
            response_type,
            stimulus: "a.wav".into(),
            class,
            response,
            rt: 0.2,
            reward: 0,
            punish: 0,
        }
    }

    /// 8 hits, 2 misses, 1 FA, 9 CRs in one block on one day.
    fn training_day(day: u32, block: &str) -> Vec<TrialRecord> {
        let mut rows = Vec::new();
        let mut second = 0;
        let mut push = |class: TrialClass, response: Response, n: u32| {
            for _ in 0..n {
                rows.push(record(day, second, block, class.clone(), response.clone()));
                second += 1;
            }
        };
        push(TrialClass::SPlus, Response::SPlus, 8);
        push(TrialClass::SPlus, Response::SMinus, 2);
        push(TrialClass::SMinus, Response::SPlus, 1);
        push(TrialClass::SMinus, Response::SMinus, 9);
        rows
    }

    fn float(v: &Value) -> f64 {
        match v {
            Value::Float(f) => *f,
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn test_grouped_counters_and_dprime() {
        let summary = SummaryTable {
            rows: training_day(1, "training 125"),
        };
        let table = analyze(&summary, &[GroupKey::Field(Field::Block)], &[]).unwrap();
        assert_eq!(table.len(), 1);

        assert_eq!(table.cell(0, "Block"), Some(&Value::Text("training 125".into())));
        assert_eq!(table.cell(0, "Hit"), Some(&Value::Int(8)));
        assert_eq!(table.cell(0, "Miss"), Some(&Value::Int(2)));
        assert_eq!(table.cell(0, "FA"), Some(&Value::Int(1)));
        assert_eq!(table.cell(0, "CR"), Some(&Value::Int(9)));
        assert_eq!(table.cell(0, "Trials"), Some(&Value::Int(20)));

        // hit rate 0.8, fa rate 0.1
        assert_eq!(table.cell(0, "d'"), Some(&Value::Float(2.123)));
        assert_eq!(table.cell(0, "d' (NR)"), Some(&Value::Float(2.123)));
        let beta = float(table.cell(0, "Beta").unwrap());
        assert!((beta - 1.595).abs() < 1e-9);

        assert_eq!(table.cell(0, "S+"), Some(&Value::Float(0.8)));
        assert_eq!(table.cell(0, "S-"), Some(&Value::Float(0.9)));
        assert_eq!(table.cell(0, "Total Corr"), Some(&Value::Float(0.85)));
        assert_eq!(table.cell(0, "Total Corr (NR)"), Some(&Value::Float(0.85)));
        assert_eq!(table.cell(0, "Prop CR Resets"), Some(&Value::Float(1.0)));
    }

    #[test]
    fn test_bias_requires_ten_trials() {
        let mut rows = training_day(1, "training 125");
        rows.truncate(9);
        let summary = SummaryTable { rows };
        let table = analyze(&summary, &[GroupKey::Field(Field::Block)], &[]).unwrap();
        assert_eq!(table.cell(0, "Beta"), Some(&Value::NotApplicable));
        assert_eq!(table.cell(0, "Beta (NR)"), Some(&Value::NotApplicable));
        // d' has no minimum-trial rule.
        assert!(matches!(table.cell(0, "d'"), Some(Value::Float(_))));
    }

    #[test]
    fn test_bias_numeric_at_exactly_ten_trials() {
        // 8 hits + 2 misses: right at the minimum, never below it.
        let mut rows = training_day(1, "training 125");
        rows.truncate(10);
        let summary = SummaryTable { rows };
        let table = analyze(&summary, &[GroupKey::Field(Field::Block)], &[]).unwrap();
        assert_eq!(table.cell(0, "Trials"), Some(&Value::Int(10)));
        assert!(matches!(table.cell(0, "Beta"), Some(Value::Float(_))));
        assert!(matches!(table.cell(0, "Beta (NR)"), Some(Value::Float(_))));
    }

    #[test]
    fn test_zero_count_standin_in_proportions() {
        // 5 hits, 5 CRs, no errors at all.
        let mut rows = Vec::new();
        for i in 0..5 {
            rows.push(record(1, i, "b", TrialClass::SPlus, Response::SPlus));
            rows.push(record(1, 10 + i, "b", TrialClass::SMinus, Response::SMinus));
        }
        let summary = SummaryTable { rows };
        let table = analyze(&summary, &[GroupKey::Field(Field::Block)], &[]).unwrap();

        // 5 / 5.001 and 10 / 10.002, both rounded to 5 places.
        assert_eq!(table.cell(0, "S+"), Some(&Value::Float(0.9998)));
        assert_eq!(table.cell(0, "S-"), Some(&Value::Float(0.9998)));
        assert_eq!(table.cell(0, "Total Corr"), Some(&Value::Float(0.9998)));
        // The trials denominator is not substituted.
        assert_eq!(table.cell(0, "Total Corr (NR)"), Some(&Value::Float(1.0)));
    }

    #[test]
    fn test_probe_columns_without_probe_trials() {
        let summary = SummaryTable {
            rows: training_day(1, "training 125"),
        };
        let table = analyze(&summary, &[GroupKey::Field(Field::Block)], &[]).unwrap();

        assert_eq!(table.cell(0, "Probe Trials"), Some(&Value::Int(0)));
        // Both probe rates get the empty-row nudge, so probe d' is zero.
        assert_eq!(table.cell(0, "Probe d'"), Some(&Value::Float(0.0)));
        assert_eq!(table.cell(0, "Probe Beta"), Some(&Value::NotApplicable));
        // Probe proportions have no stand-in and stay empty.
        assert_eq!(table.cell(0, "Probe S+"), Some(&Value::Null));
        assert_eq!(table.cell(0, "Probe Tot Corr (NR)"), Some(&Value::Null));
    }

    #[test]
    fn test_groups_sorted_by_earliest_trial() {
        let mut rows = training_day(2, "second");
        rows.extend(training_day(1, "first"));
        let summary = SummaryTable { rows };
        let table = analyze(&summary, &[GroupKey::Field(Field::Block)], &[]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "Block"), Some(&Value::Text("first".into())));
        assert_eq!(table.cell(1, "Block"), Some(&Value::Text("second".into())));
    }

    #[test]
    fn test_group_by_date() {
        let mut rows = training_day(1, "b");
        rows.extend(training_day(2, "b"));
        let summary = SummaryTable { rows };
        let table = analyze(
            &summary,
            &[GroupKey::Field(Field::Date), GroupKey::Field(Field::Block)],
            &[],
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.cell(0, "Date"),
            Some(&Value::Date(NaiveDate::from_ymd_opt(2018, 1, 1).unwrap()))
        );
    }

    #[test]
    fn test_bucket_grouping_adds_leading_bin_column() {
        let summary = SummaryTable {
            rows: training_day(1, "b"),
        };
        let table = analyze(&summary, &[GroupKey::Every(5)], &[]).unwrap();
        assert_eq!(table.columns[0], BIN_COLUMN);
        assert_eq!(table.len(), 4);
        assert_eq!(table.cell(0, BIN_COLUMN), Some(&Value::Int(0)));
        assert_eq!(table.cell(3, BIN_COLUMN), Some(&Value::Int(3)));
        assert_eq!(table.cell(0, "Trials"), Some(&Value::Int(5)));
    }

    #[test]
    fn test_invalid_group_keys() {
        let summary = SummaryTable::default();
        assert!(analyze(&summary, &[GroupKey::Field(Field::ReactionTime)], &[]).is_err());
        assert!(analyze(&summary, &[GroupKey::Every(0)], &[]).is_err());
        assert!(analyze(&summary, &[GroupKey::Every(5), GroupKey::Every(10)], &[]).is_err());
    }

    #[test]
    fn test_drop_columns() {
        let summary = SummaryTable {
            rows: training_day(1, "b"),
        };
        let table = analyze(
            &summary,
            &[GroupKey::Field(Field::Block)],
            &[Field::Beta, Field::BetaNr],
        )
        .unwrap();
        assert_eq!(table.column_index("Beta"), None);
        assert_eq!(table.column_index("Beta (NR)"), None);
        assert!(table.column_index("d'").is_some());
    }

    #[test]
    fn test_ungrouped_report_is_per_trial() {
        let summary = SummaryTable {
            rows: training_day(1, "training 125"),
        };
        let table = analyze(&summary, &[], &[]).unwrap();
        assert_eq!(table.len(), 20);
        // Bookkeeping and derived columns are absent.
        assert_eq!(table.column_index("Session"), None);
        assert_eq!(table.column_index("Reward"), None);
        assert_eq!(table.column_index("d'"), None);
        // Per-trial indicators are present.
        assert_eq!(table.cell(0, "Hit"), Some(&Value::Int(1)));
        assert_eq!(table.cell(0, "Response Type"), Some(&Value::Text("response_hit".into())));
        assert_eq!(table.cell(0, "Subject"), Some(&Value::Text("y1".into())));
    }

    #[test]
    fn test_rt_mean_skips_nan() {
        let mut rows = training_day(1, "b");
        rows[0].rt = f64::NAN;
        rows[1].rt = f64::NAN;
        for row in rows.iter_mut().skip(2) {
            row.rt = 0.5;
        }
        let summary = SummaryTable { rows };
        let table = analyze(&summary, &[GroupKey::Field(Field::Block)], &[]).unwrap();
        assert_eq!(table.cell(0, "RT"), Some(&Value::Float(0.5)));
    }
}
