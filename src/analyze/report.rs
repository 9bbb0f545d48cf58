//! Report table and CSV rendering.

use std::io::Write;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::Result;

/// One report cell.
///
/// `Null` and a NaN `Float` both render as an empty cell; `NotApplicable`
/// renders as the literal `n/a` used for bias values on under-powered groups.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Time(NaiveDateTime),
    NotApplicable,
    Null,
}

impl Value {
    /// Render for CSV output.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Float(v) if v.is_nan() => String::new(),
            Self::Float(v) => v.to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Time(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::NotApplicable => "n/a".to_string(),
            Self::Null => String::new(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// A rendered analysis result: ordered column headers plus value rows.
#[derive(Debug, Clone, Default)]
pub struct ReportTable {
    /// Column headers in output order.
    pub columns: Vec<String>,
    /// Rows of cells, parallel to `columns`.
    pub rows: Vec<Vec<Value>>,
}

impl ReportTable {
    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by header name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell lookup by row index and header name.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }

    /// Write the table as CSV with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.columns)?;
        for row in &self.rows {
            csv_writer.write_record(row.iter().map(Value::render))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the table as CSV to a file path.
    pub fn write_csv_path(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}
