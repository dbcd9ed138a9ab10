//! Trial Table Persistence
//!
//! A trial table holds one row of operation counts per trial, one column per
//! prefix length. On disk it is a header-less comma-separated file:
//!
//! ```text
//! 1,1,4,9,11
//! 1,1,2,9,16
//! ```
//!
//! Every line, the last one included, ends with a newline and carries no
//! trailing comma. A trial with zero columns is written as an empty line, so a
//! table always reads back exactly as it was written.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{GrowthError, Result};

/// T rows × N columns of operation counts.
///
/// Rows are kept as given; tables read from disk may be ragged and are
/// rejected later by the column aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrialTable {
    rows: Vec<Vec<u64>>,
}

impl TrialTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Vec<u64>>) -> Self {
        Self { rows }
    }

    /// Append one trial's counts.
    pub fn push_row(&mut self, row: Vec<u64>) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<u64>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<u64>> {
        self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row (0 for a table without rows).
    pub fn num_columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table in its on-disk form.
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        for row in &self.rows {
            for (i, value) in row.iter().enumerate() {
                if i > 0 {
                    output.push(',');
                }
                write!(output, "{}", value).unwrap();
            }
            output.push('\n');
        }

        output
    }

    /// Write the table to `path`, replacing any previous file.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_csv())?;
        debug!(
            path = %path.display(),
            rows = self.num_rows(),
            columns = self.num_columns(),
            "Trial table written"
        );
        Ok(())
    }

    /// Read a table previously written with [`TrialTable::write_csv`].
    pub fn read_csv(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        parse_csv(&content)
    }
}

/// Parse the on-disk form of a trial table.
///
/// Accepts `\n` or `\r\n` line endings. Each line is a row, and an empty line is
/// a row with no columns. Blank lines after the last non-empty line are
/// ignored unless every line is empty. A field that is not a non-negative
/// integer is a [`GrowthError::MalformedTable`].
pub fn parse_csv(content: &str) -> Result<TrialTable> {
    let lines: Vec<&str> = content.lines().map(|line| line.trim_end_matches('\r')).collect();
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(lines.len(), |last| last + 1);

    let mut table = TrialTable::new();

    for (line_index, &line) in lines[..end].iter().enumerate() {
        if line.is_empty() {
            table.push_row(Vec::new());
            continue;
        }

        let row = line
            .split(',')
            .enumerate()
            .map(|(field_index, field)| {
                field.trim().parse::<u64>().map_err(|_| {
                    GrowthError::MalformedTable(format!(
                        "line {}, field {}: '{}' is not an operation count",
                        line_index + 1,
                        field_index + 1,
                        field
                    ))
                })
            })
            .collect::<Result<Vec<u64>>>()?;

        table.push_row(row);
    }

    Ok(table)
}
