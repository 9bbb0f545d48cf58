//! Trial-table filtering.
//!
//! A [`FilterSpec`] narrows a [`TrialTable`] to the trials an analysis should
//! cover: an optional start-date cutoff, categorical inclusion lists on
//! index-kind columns, and a date comparison on the `Date` column. Filtering
//! never mutates the input table.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::fields::{Field, FilterKind};
use crate::trial::{TrialRecord, TrialTable};

/// Comparison operator for the date-range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl DateOp {
    /// Apply the comparison with the trial's date on the left.
    #[must_use]
    pub fn compare(self, date: NaiveDate, bound: NaiveDate) -> bool {
        match self {
            Self::Lt => date < bound,
            Self::Le => date <= bound,
            Self::Gt => date > bound,
            Self::Ge => date >= bound,
            Self::Eq => date == bound,
            Self::Ne => date != bound,
        }
    }
}

impl FromStr for DateOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Le),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Ge),
            "==" => Ok(Self::Eq),
            "!=" => Ok(Self::Ne),
            other => Err(format!("Unknown date operator: {other}")),
        }
    }
}

impl std::fmt::Display for DateOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        };
        f.write_str(s)
    }
}

/// Constraint on a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    /// Keep trials whose text value is in the list. An empty list keeps
    /// everything (an unconstrained selection, not an impossible one).
    AnyOf(Vec<String>),
    /// Keep trials whose date satisfies the comparison.
    DateCmp(DateOp, NaiveDate),
}

impl FieldFilter {
    fn matches(&self, row: &TrialRecord, field: Field) -> bool {
        match self {
            Self::AnyOf(values) => {
                if values.is_empty() {
                    return true;
                }
                row.text_value(field)
                    .is_some_and(|v| values.iter().any(|want| *want == v))
            }
            Self::DateCmp(op, bound) => op.compare(row.date(), *bound),
        }
    }
}

/// Complete filter for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// Keep only trials strictly after this instant.
    pub start_date: Option<NaiveDateTime>,
    /// Per-column constraints, all of which must hold.
    pub fields: BTreeMap<Field, FieldFilter>,
}

impl FilterSpec {
    /// Empty filter that keeps every trial.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start-date cutoff.
    #[must_use]
    pub fn with_start_date(mut self, start: NaiveDateTime) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Add a constraint on one column.
    ///
    /// Returns an error when the column does not accept that filter control.
    pub fn with_field(mut self, field: Field, filter: FieldFilter) -> Result<Self, String> {
        let ok = match filter {
            FieldFilter::AnyOf(_) => field.filter_kind() == FilterKind::List,
            FieldFilter::DateCmp(..) => field.filter_kind() == FilterKind::Range,
        };
        if !ok {
            return Err(format!("Column {field} does not accept that filter"));
        }
        self.fields.insert(field, filter);
        Ok(self)
    }

    /// Whether one trial passes every constraint.
    #[must_use]
    pub fn matches(&self, row: &TrialRecord) -> bool {
        if let Some(start) = self.start_date {
            if row.time <= start {
                return false;
            }
        }
        self.fields
            .iter()
            .all(|(field, filter)| filter.matches(row, *field))
    }

    /// Build a fresh table of the trials that pass.
    #[must_use]
    pub fn apply(&self, table: &TrialTable) -> TrialTable {
        TrialTable {
            rows: table
                .rows
                .iter()
                .filter(|row| self.matches(row))
                .cloned()
                .collect(),
        }
    }
}
