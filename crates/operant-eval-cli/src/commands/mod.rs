//! CLI subcommands and shared argument parsing.

pub mod analyze;
pub mod fields;
pub mod raw;

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use operant_eval::{DateOp, Field, FieldFilter, FilterSpec};

/// Parse a list of column display names.
pub fn parse_fields(names: &[String]) -> Result<Vec<Field>> {
    names
        .iter()
        .map(|name| name.parse::<Field>().map_err(|e| anyhow!(e)))
        .collect()
}

/// Build a filter from `Column=value[,value...]` entries plus the date options.
pub fn build_filter(
    filters: &[String],
    date_filter: Option<&str>,
    start_date: Option<&str>,
) -> Result<FilterSpec> {
    let mut spec = FilterSpec::new();

    if let Some(start) = start_date {
        spec = spec.with_start_date(parse_instant(start)?);
    }

    for entry in filters {
        let (name, values) = entry
            .split_once('=')
            .with_context(|| format!("expected Column=value[,value...], got {entry:?}"))?;
        let field: Field = name.trim().parse().map_err(|e: String| anyhow!(e))?;
        let values: Vec<String> = values
            .split(',')
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        spec = spec
            .with_field(field, FieldFilter::AnyOf(values))
            .map_err(|e| anyhow!(e))?;
    }

    if let Some(expr) = date_filter {
        let (op, date) = expr
            .trim()
            .split_once(' ')
            .with_context(|| format!("expected OP YYYY-MM-DD, got {expr:?}"))?;
        let op: DateOp = op.parse().map_err(|e: String| anyhow!(e))?;
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .with_context(|| format!("unparseable date {date:?}"))?;
        spec = spec
            .with_field(Field::Date, FieldFilter::DateCmp(op, date))
            .map_err(|e| anyhow!(e))?;
    }

    Ok(spec)
}

/// Parse `YYYY-MM-DD HH:MM:SS`, or `YYYY-MM-DD` as midnight.
fn parse_instant(s: &str) -> Result<NaiveDateTime> {
    if let Ok(instant) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(instant);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("unparseable instant {s:?}"))?;
    Ok(date.and_time(NaiveTime::MIN))
}
