//! Value-count distributions of integer columns

use std::collections::BTreeMap;
use std::fmt;

use arrow::array::{Array, Int64Array};
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::arrow::{downcast_array, get_column};

/// Occurrences of each value of a column, sorted by value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCounts {
    column: String,
    counts: BTreeMap<i64, usize>,
    missing: usize,
}

impl ValueCounts {
    /// Count the values of an `Int64` column
    pub fn from_batch(batch: &RecordBatch, column: &str) -> Result<Self> {
        let array = get_column(batch, column)?;
        let values = downcast_array::<Int64Array>(array, column, "Int64")?;

        let mut counts = BTreeMap::new();
        for value in values.iter().flatten() {
            *counts.entry(value).or_insert(0) += 1;
        }

        Ok(Self {
            column: column.to_string(),
            counts,
            missing: values.null_count(),
        })
    }

    #[must_use]
    pub fn get(&self, value: i64) -> usize {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    #[must_use]
    pub const fn missing(&self) -> usize {
        self.missing
    }

    /// Total of non-missing values
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(value, count)` pairs in ascending value order
    pub fn iter(&self) -> impl Iterator<Item = (i64, usize)> + '_ {
        self.counts.iter().map(|(v, c)| (*v, *c))
    }
}

impl fmt::Display for ValueCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .counts
            .keys()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1)
            .max(3);

        for (value, count) in &self.counts {
            writeln!(f, "{value:<width$}  {count}")?;
        }
        write!(f, "Name: {}, missing: {}", self.column, self.missing)
    }
}
