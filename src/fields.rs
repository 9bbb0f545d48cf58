//! Reportable field catalog.
//!
//! [`Field`] enumerates every column that can appear in a report, in canonical
//! output order ([`Field::ALL`]). The catalog is the single source of truth
//! for display names, aggregation eligibility during grouping, and which
//! filter control each column accepts.

use serde::{Deserialize, Serialize};

/// How a column participates when the trial table is grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggKind {
    /// Per-trial bookkeeping with no meaningful aggregate (dropped when grouping).
    Raw,
    /// Categorical dimension eligible as a grouping key.
    Index,
    /// Numeric measure aggregated by mean.
    Mean,
    /// Numeric counter aggregated by sum.
    Sum,
    /// Statistic derived per group after aggregation.
    Derived,
}

/// Which filter control a column accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Not filterable.
    None,
    /// Categorical inclusion list.
    List,
    /// Date comparison.
    Range,
}

/// A reportable column.
///
/// Variant order is canonical report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Subject,
    File,
    Session,
    FileCount,
    Date,
    Time,
    Block,
    Index,
    Stimulus,
    Class,
    ResponseType,
    Response,
    ReactionTime,
    Reward,
    Punish,
    DPrime,
    DPrimeNr,
    Beta,
    BetaNr,
    Trials,
    SPlus,
    SPlusNr,
    SMinus,
    SMinusNr,
    TotalCorrect,
    TotalCorrectNr,
    Hit,
    Miss,
    MissNr,
    FalseAlarm,
    CorrectRejection,
    CorrectRejectionNr,
    PropCrResets,
    ProbeDPrime,
    ProbeDPrimeNr,
    ProbeBeta,
    ProbeBetaNr,
    ProbeTrials,
    ProbeSPlus,
    ProbeSPlusNr,
    ProbeSMinus,
    ProbeSMinusNr,
    ProbeTotalCorrect,
    ProbeTotalCorrectNr,
    ProbeHit,
    ProbeMiss,
    ProbeMissNr,
    ProbeFalseAlarm,
    ProbeCorrectRejection,
    ProbeCorrectRejectionNr,
}

impl Field {
    /// All fields in canonical report column order.
    pub const ALL: [Self; 50] = [
        Self::Subject,
        Self::File,
        Self::Session,
        Self::FileCount,
        Self::Date,
        Self::Time,
        Self::Block,
        Self::Index,
        Self::Stimulus,
        Self::Class,
        Self::ResponseType,
        Self::Response,
        Self::ReactionTime,
        Self::Reward,
        Self::Punish,
        Self::DPrime,
        Self::DPrimeNr,
        Self::Beta,
        Self::BetaNr,
        Self::Trials,
        Self::SPlus,
        Self::SPlusNr,
        Self::SMinus,
        Self::SMinusNr,
        Self::TotalCorrect,
        Self::TotalCorrectNr,
        Self::Hit,
        Self::Miss,
        Self::MissNr,
        Self::FalseAlarm,
        Self::CorrectRejection,
        Self::CorrectRejectionNr,
        Self::PropCrResets,
        Self::ProbeDPrime,
        Self::ProbeDPrimeNr,
        Self::ProbeBeta,
        Self::ProbeBetaNr,
        Self::ProbeTrials,
        Self::ProbeSPlus,
        Self::ProbeSPlusNr,
        Self::ProbeSMinus,
        Self::ProbeSMinusNr,
        Self::ProbeTotalCorrect,
        Self::ProbeTotalCorrectNr,
        Self::ProbeHit,
        Self::ProbeMiss,
        Self::ProbeMissNr,
        Self::ProbeFalseAlarm,
        Self::ProbeCorrectRejection,
        Self::ProbeCorrectRejectionNr,
    ];

    /// Display name used in report headers and filter controls.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Subject => "Subject",
            Self::File => "File",
            Self::Session => "Session",
            Self::FileCount => "File Count",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::Block => "Block",
            Self::Index => "Index",
            Self::Stimulus => "Stimulus",
            Self::Class => "Class",
            Self::ResponseType => "Response Type",
            Self::Response => "Response",
            Self::ReactionTime => "RT",
            Self::Reward => "Reward",
            Self::Punish => "Punish",
            Self::DPrime => "d'",
            Self::DPrimeNr => "d' (NR)",
            Self::Beta => "Beta",
            Self::BetaNr => "Beta (NR)",
            Self::Trials => "Trials",
            Self::SPlus => "S+",
            Self::SPlusNr => "S+ (NR)",
            Self::SMinus => "S-",
            Self::SMinusNr => "S- (NR)",
            Self::TotalCorrect => "Total Corr",
            Self::TotalCorrectNr => "Total Corr (NR)",
            Self::Hit => "Hit",
            Self::Miss => "Miss",
            Self::MissNr => "Miss (NR)",
            Self::FalseAlarm => "FA",
            Self::CorrectRejection => "CR",
            Self::CorrectRejectionNr => "CR (NR)",
            Self::PropCrResets => "Prop CR Resets",
            Self::ProbeDPrime => "Probe d'",
            Self::ProbeDPrimeNr => "Probe d' (NR)",
            Self::ProbeBeta => "Probe Beta",
            Self::ProbeBetaNr => "Probe Beta (NR)",
            Self::ProbeTrials => "Probe Trials",
            Self::ProbeSPlus => "Probe S+",
            Self::ProbeSPlusNr => "Probe S+ (NR)",
            Self::ProbeSMinus => "Probe S-",
            Self::ProbeSMinusNr => "Probe S- (NR)",
            Self::ProbeTotalCorrect => "Probe Tot Corr",
            Self::ProbeTotalCorrectNr => "Probe Tot Corr (NR)",
            Self::ProbeHit => "Probe Hit",
            Self::ProbeMiss => "Probe Miss",
            Self::ProbeMissNr => "Probe Miss (NR)",
            Self::ProbeFalseAlarm => "Probe FA",
            Self::ProbeCorrectRejection => "Probe CR",
            Self::ProbeCorrectRejectionNr => "Probe CR (NR)",
        }
    }

    /// Aggregation behavior when grouping.
    #[must_use]
    pub fn kind(self) -> AggKind {
        match self {
            Self::File | Self::Session | Self::FileCount | Self::Index | Self::Time => AggKind::Raw,
            Self::Subject
            | Self::Block
            | Self::Date
            | Self::ResponseType
            | Self::Stimulus
            | Self::Class
            | Self::Response => AggKind::Index,
            Self::ReactionTime => AggKind::Mean,
            Self::Reward
            | Self::Punish
            | Self::Trials
            | Self::Hit
            | Self::FalseAlarm
            | Self::Miss
            | Self::CorrectRejection
            | Self::MissNr
            | Self::CorrectRejectionNr
            | Self::ProbeTrials
            | Self::ProbeHit
            | Self::ProbeFalseAlarm
            | Self::ProbeMiss
            | Self::ProbeCorrectRejection
            | Self::ProbeMissNr
            | Self::ProbeCorrectRejectionNr => AggKind::Sum,
            _ => AggKind::Derived,
        }
    }

    /// Which filter control this column accepts.
    #[must_use]
    pub fn filter_kind(self) -> FilterKind {
        match self {
            Self::Subject
            | Self::Block
            | Self::ResponseType
            | Self::Stimulus
            | Self::Class
            | Self::Response => FilterKind::List,
            Self::Date => FilterKind::Range,
            _ => FilterKind::None,
        }
    }

    /// Parse a display name back to a field.
    ///
    /// Accepts the legacy two-line UI rendering of the no-response qualifier
    /// (`"Miss\n(NR)"`), collapsing the line break to a space.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let collapsed = name.replace("\n(NR)", " (NR)");
        Self::ALL.iter().copied().find(|f| f.name() == collapsed)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown field: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_and_order() {
        assert_eq!(Field::ALL.len(), 50);
        assert_eq!(Field::ALL[0], Field::Subject);
        assert_eq!(Field::ALL[4], Field::Date);
        assert_eq!(Field::ALL[49], Field::ProbeCorrectRejectionNr);
    }

    #[test]
    fn test_display_roundtrip() {
        for field in Field::ALL {
            let parsed: Field = field.name().parse().unwrap();
            assert_eq!(field, parsed);
        }
    }

    #[test]
    fn test_parse_collapses_linebreak_qualifier() {
        assert_eq!(Field::parse("Miss\n(NR)"), Some(Field::MissNr));
        assert_eq!(Field::parse("Probe CR\n(NR)"), Some(Field::ProbeCorrectRejectionNr));
        assert_eq!(Field::parse("unknown"), None);
    }

    #[test]
    fn test_aggregation_kinds() {
        assert_eq!(Field::ReactionTime.kind(), AggKind::Mean);
        assert_eq!(Field::Time.kind(), AggKind::Raw);
        assert_eq!(Field::Hit.kind(), AggKind::Sum);
        assert_eq!(Field::Subject.kind(), AggKind::Index);
        assert_eq!(Field::DPrime.kind(), AggKind::Derived);
        assert_eq!(Field::PropCrResets.kind(), AggKind::Derived);
    }

    #[test]
    fn test_filter_kinds() {
        assert_eq!(Field::Date.filter_kind(), FilterKind::Range);
        assert_eq!(Field::Block.filter_kind(), FilterKind::List);
        assert_eq!(Field::ReactionTime.filter_kind(), FilterKind::None);
    }
}
