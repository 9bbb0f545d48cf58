//! Trial records and response-outcome classification.
//!
//! One [`TrialRecord`] per completed trial, produced exclusively by the
//! ingester. The [`classify`] table maps a (response, trial class) pair to a
//! [`ResponseType`] outcome; the outcome drives the 0/1 indicator columns
//! that every downstream aggregate is built from.

use chrono::{NaiveDate, NaiveDateTime};

use crate::fields::Field;

/// Trial class as scheduled by the experiment runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialClass {
    /// Reinforced go stimulus.
    SPlus,
    /// Reinforced no-go stimulus.
    SMinus,
    /// Unreinforced generalization probe, go variant.
    ProbePlus,
    /// Unreinforced generalization probe, no-go variant.
    ProbeMinus,
    /// Unrecognized class string, preserved for raw display.
    Other(String),
}

impl TrialClass {
    /// Parse the class token recorded by the experiment runner.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "sPlus" => Self::SPlus,
            "sMinus" => Self::SMinus,
            "probePlus" => Self::ProbePlus,
            "probeMinus" => Self::ProbeMinus,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for TrialClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SPlus => f.write_str("sPlus"),
            Self::SMinus => f.write_str("sMinus"),
            Self::ProbePlus => f.write_str("probePlus"),
            Self::ProbeMinus => f.write_str("probeMinus"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// Subject response for a single trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Responded to the go key.
    SPlus,
    /// Responded to the no-go key.
    SMinus,
    /// The experiment runner's explicit error sentinel (`"ERR"`).
    Error,
    /// No scorable response; raw text preserved (usually empty).
    NoResponse(String),
}

impl Response {
    /// Parse the response token recorded by the experiment runner.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "sPlus" => Self::SPlus,
            "sMinus" => Self::SMinus,
            "ERR" => Self::Error,
            other => Self::NoResponse(other.to_string()),
        }
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SPlus => f.write_str("sPlus"),
            Self::SMinus => f.write_str("sMinus"),
            Self::Error => f.write_str("ERR"),
            Self::NoResponse(s) => f.write_str(s),
        }
    }
}

/// Classified trial outcome.
///
/// Training and probe trials form parallel families; the `Nr` variants mark
/// trials with no scorable response. `Unclassified` (error-sentinel response
/// or unknown trial class) contributes 0 to every indicator but stays in the
/// raw table for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseType {
    Hit,
    Miss,
    MissNr,
    FalseAlarm,
    CorrectRejection,
    CorrectRejectionNr,
    ProbeHit,
    ProbeMiss,
    ProbeMissNr,
    ProbeFalseAlarm,
    ProbeCorrectRejection,
    ProbeCorrectRejectionNr,
    Unclassified,
}

impl ResponseType {
    /// Whether this outcome counts toward the training-trial family.
    #[must_use]
    pub fn is_training(self) -> bool {
        matches!(
            self,
            Self::Hit
                | Self::Miss
                | Self::MissNr
                | Self::FalseAlarm
                | Self::CorrectRejection
                | Self::CorrectRejectionNr
        )
    }

    /// Whether this outcome counts toward the probe-trial family.
    #[must_use]
    pub fn is_probe(self) -> bool {
        matches!(
            self,
            Self::ProbeHit
                | Self::ProbeMiss
                | Self::ProbeMissNr
                | Self::ProbeFalseAlarm
                | Self::ProbeCorrectRejection
                | Self::ProbeCorrectRejectionNr
        )
    }

    /// 0/1 indicator value for a counter column.
    ///
    /// Returns 0 for fields that are not outcome counters.
    #[must_use]
    pub fn indicator(self, field: Field) -> u32 {
        let hit = match field {
            Field::Hit => self == Self::Hit,
            Field::Miss => self == Self::Miss,
            Field::MissNr => self == Self::MissNr,
            Field::FalseAlarm => self == Self::FalseAlarm,
            Field::CorrectRejection => self == Self::CorrectRejection,
            Field::CorrectRejectionNr => self == Self::CorrectRejectionNr,
            Field::Trials => self.is_training(),
            Field::ProbeHit => self == Self::ProbeHit,
            Field::ProbeMiss => self == Self::ProbeMiss,
            Field::ProbeMissNr => self == Self::ProbeMissNr,
            Field::ProbeFalseAlarm => self == Self::ProbeFalseAlarm,
            Field::ProbeCorrectRejection => self == Self::ProbeCorrectRejection,
            Field::ProbeCorrectRejectionNr => self == Self::ProbeCorrectRejectionNr,
            Field::ProbeTrials => self.is_probe(),
            _ => false,
        };
        u32::from(hit)
    }
}

impl std::fmt::Display for ResponseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Tokens match the historical trial logs for output compatibility.
        let s = match self {
            Self::Hit => "response_hit",
            Self::Miss => "response_Miss",
            Self::MissNr => "response_Miss_NR",
            Self::FalseAlarm => "response_FA",
            Self::CorrectRejection => "response_CR",
            Self::CorrectRejectionNr => "response_CR_NR",
            Self::ProbeHit => "probe_hit",
            Self::ProbeMiss => "probe_Miss",
            Self::ProbeMissNr => "probe_Miss_NR",
            Self::ProbeFalseAlarm => "probe_FA",
            Self::ProbeCorrectRejection => "probe_CR",
            Self::ProbeCorrectRejectionNr => "probe_CR_NR",
            Self::Unclassified => "unclassified",
        };
        f.write_str(s)
    }
}

/// Classify a trial outcome from its response and scheduled class.
///
/// The error sentinel short-circuits to [`ResponseType::Unclassified`], as
/// does an unrecognized trial class.
#[must_use]
pub fn classify(response: &Response, trial_class: &TrialClass) -> ResponseType {
    if *response == Response::Error {
        return ResponseType::Unclassified;
    }
    match (trial_class, response) {
        (TrialClass::SPlus, Response::SPlus) => ResponseType::Hit,
        (TrialClass::SPlus, Response::SMinus) => ResponseType::Miss,
        (TrialClass::SPlus, _) => ResponseType::MissNr,
        (TrialClass::SMinus, Response::SPlus) => ResponseType::FalseAlarm,
        (TrialClass::SMinus, Response::SMinus) => ResponseType::CorrectRejection,
        (TrialClass::SMinus, _) => ResponseType::CorrectRejectionNr,
        (TrialClass::ProbePlus, Response::SPlus) => ResponseType::ProbeHit,
        (TrialClass::ProbePlus, Response::SMinus) => ResponseType::ProbeMiss,
        (TrialClass::ProbePlus, _) => ResponseType::ProbeMissNr,
        (TrialClass::ProbeMinus, Response::SPlus) => ResponseType::ProbeFalseAlarm,
        (TrialClass::ProbeMinus, Response::SMinus) => ResponseType::ProbeCorrectRejection,
        (TrialClass::ProbeMinus, _) => ResponseType::ProbeCorrectRejectionNr,
        (TrialClass::Other(_), _) => ResponseType::Unclassified,
    }
}

/// One ingested trial.
///
/// Immutable once built; the ingester is the sole producer.
#[derive(Debug, Clone)]
pub struct TrialRecord {
    /// Subject identifier (trial file name prefix before the first `_`).
    pub subject: String,
    /// Source CSV file name.
    pub file: String,
    /// 1-based session/block index from the trial log.
    pub session: u32,
    /// Always 1; summed when grouping to count source rows.
    pub file_count: u32,
    /// Resolved block name (after legacy-name remapping).
    pub block: String,
    /// Trial index within its file.
    pub index: u32,
    /// Trial timestamp.
    pub time: NaiveDateTime,
    /// Classified outcome.
    pub response_type: ResponseType,
    /// Stimulus identifier (last path segment).
    pub stimulus: String,
    /// Scheduled trial class.
    pub class: TrialClass,
    /// Subject response.
    pub response: Response,
    /// Reaction time in seconds; NaN when absent or unparseable.
    pub rt: f64,
    /// 1 if the trial was rewarded.
    pub reward: u32,
    /// 1 if the trial was punished.
    pub punish: u32,
}

impl TrialRecord {
    /// Date portion of the trial timestamp.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.time.date()
    }

    /// Text value of a categorical (index-kind) column, used by filters and
    /// grouping keys. `None` for non-categorical fields.
    #[must_use]
    pub fn text_value(&self, field: Field) -> Option<String> {
        match field {
            Field::Subject => Some(self.subject.clone()),
            Field::Block => Some(self.block.clone()),
            Field::ResponseType => Some(self.response_type.to_string()),
            Field::Stimulus => Some(self.stimulus.clone()),
            Field::Class => Some(self.class.to_string()),
            Field::Response => Some(self.response.to_string()),
            _ => None,
        }
    }
}

/// The unified trial-level table, sorted by date.
///
/// Built once per data-folder selection and never mutated in place; filtering
/// and analysis construct fresh tables from it.
#[derive(Debug, Clone, Default)]
pub struct TrialTable {
    /// Trial rows in date order.
    pub rows: Vec<TrialRecord>,
}

impl TrialTable {
    /// Number of trials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no trials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_training_table() {
        let sp = TrialClass::SPlus;
        let sm = TrialClass::SMinus;
        assert_eq!(classify(&Response::SPlus, &sp), ResponseType::Hit);
        assert_eq!(classify(&Response::SMinus, &sp), ResponseType::Miss);
        assert_eq!(
            classify(&Response::NoResponse(String::new()), &sp),
            ResponseType::MissNr
        );
        assert_eq!(classify(&Response::SPlus, &sm), ResponseType::FalseAlarm);
        assert_eq!(classify(&Response::SMinus, &sm), ResponseType::CorrectRejection);
        assert_eq!(
            classify(&Response::NoResponse(String::new()), &sm),
            ResponseType::CorrectRejectionNr
        );
    }

    #[test]
    fn test_classify_probe_table() {
        let pp = TrialClass::ProbePlus;
        let pm = TrialClass::ProbeMinus;
        assert_eq!(classify(&Response::SPlus, &pp), ResponseType::ProbeHit);
        assert_eq!(classify(&Response::SMinus, &pp), ResponseType::ProbeMiss);
        assert_eq!(
            classify(&Response::NoResponse(String::new()), &pp),
            ResponseType::ProbeMissNr
        );
        assert_eq!(classify(&Response::SPlus, &pm), ResponseType::ProbeFalseAlarm);
        assert_eq!(classify(&Response::SMinus, &pm), ResponseType::ProbeCorrectRejection);
        assert_eq!(
            classify(&Response::NoResponse(String::new()), &pm),
            ResponseType::ProbeCorrectRejectionNr
        );
    }

    #[test]
    fn test_error_sentinel_is_unclassified() {
        assert_eq!(
            classify(&Response::Error, &TrialClass::SPlus),
            ResponseType::Unclassified
        );
        assert_eq!(
            classify(&Response::SPlus, &TrialClass::Other("warmup".into())),
            ResponseType::Unclassified
        );
    }

    #[test]
    fn test_miss_contributes_nothing_to_probe_indicators() {
        let rt = classify(&Response::SMinus, &TrialClass::SPlus);
        assert_eq!(rt, ResponseType::Miss);
        assert_eq!(rt.indicator(Field::Miss), 1);
        assert_eq!(rt.indicator(Field::Trials), 1);
        for probe in [
            Field::ProbeHit,
            Field::ProbeMiss,
            Field::ProbeMissNr,
            Field::ProbeFalseAlarm,
            Field::ProbeCorrectRejection,
            Field::ProbeCorrectRejectionNr,
            Field::ProbeTrials,
        ] {
            assert_eq!(rt.indicator(probe), 0);
        }
    }

    #[test]
    fn test_unclassified_indicators_all_zero() {
        for field in Field::ALL {
            assert_eq!(ResponseType::Unclassified.indicator(field), 0);
        }
    }
}
