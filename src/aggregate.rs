//! Column averaging of trial tables.
//!
//! Column `i` of a trial table holds the operation counts of every trial at
//! prefix length `i`; its mean is one point of the growth curve. Means are
//! rounded to the nearest integer with ties going to the even neighbour, and
//! are computed in integer arithmetic so the result never depends on float
//! rounding.

use std::path::Path;

use tracing::debug;

use crate::error::{GrowthError, Result};
use crate::table::TrialTable;

/// Mean operation count per prefix length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AverageSeries(Vec<u64>);

impl AverageSeries {
    pub fn values(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest mean in the series, 0 when empty.
    pub fn max(&self) -> u64 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &u64> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.0
    }
}

impl From<Vec<u64>> for AverageSeries {
    fn from(values: Vec<u64>) -> Self {
        AverageSeries(values)
    }
}

/// Average each column of a rectangular table.
///
/// # Errors
///
/// [`GrowthError::MalformedTable`] when there are no rows, the rows have no
/// columns, or any row differs in length from the first.
///
/// # Example
///
/// ```
/// use quad_sort_growth::average_columns;
///
/// let series = average_columns(&[vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
/// assert_eq!(series.values(), &[3, 4]);
/// ```
pub fn average_columns(rows: &[Vec<u64>]) -> Result<AverageSeries> {
    let first = rows
        .first()
        .ok_or_else(|| GrowthError::MalformedTable("table has no rows".to_string()))?;
    let width = first.len();
    if width == 0 {
        return Err(GrowthError::MalformedTable(
            "table has no columns".to_string(),
        ));
    }

    if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(GrowthError::MalformedTable(format!(
            "row {} has {} columns, expected {}",
            index + 1,
            row.len(),
            width
        )));
    }

    let mut sums = vec![0u128; width];
    for row in rows {
        for (sum, &value) in sums.iter_mut().zip(row) {
            *sum += u128::from(value);
        }
    }

    let count = rows.len() as u128;
    let averages = sums
        .into_iter()
        .map(|sum| div_round_half_even(sum, count))
        .collect();

    debug!(rows = rows.len(), columns = width, "Columns averaged");
    Ok(AverageSeries(averages))
}

/// Read a persisted trial table and average its columns.
pub fn file_column_averages(path: &Path) -> Result<AverageSeries> {
    TrialTable::read_csv(path)?.column_averages()
}

impl TrialTable {
    pub fn column_averages(&self) -> Result<AverageSeries> {
        average_columns(self.rows())
    }
}

/// `numerator / denominator` rounded to nearest, ties to even.
fn div_round_half_even(numerator: u128, denominator: u128) -> u64 {
    let quotient = numerator / denominator;
    let twice_remainder = 2 * (numerator % denominator);

    let rounded = if twice_remainder > denominator
        || (twice_remainder == denominator && quotient % 2 == 1)
    {
        quotient + 1
    } else {
        quotient
    };

    // The mean of u64 values always fits in a u64.
    rounded as u64
}
