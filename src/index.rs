//! Lookup from respondent identifier to that respondent's pregnancy rows

use rustc_hash::FxHashMap;

use crate::models::PregnancyRecord;

/// Pregnancy row positions grouped by respondent
///
/// Built once from the pregnancy table. Positions within a group keep table
/// order.
#[derive(Debug, Clone, Default)]
pub struct PregnancyIndex {
    groups: FxHashMap<i64, Vec<usize>>,
    rows: usize,
}

impl PregnancyIndex {
    /// Group pregnancies by `caseid`
    #[must_use]
    pub fn build(pregnancies: &[PregnancyRecord]) -> Self {
        Self::from_caseids(pregnancies.iter().map(|p| p.caseid))
    }

    /// Group row positions by identifier, in iteration order
    pub fn from_caseids<I>(caseids: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut groups: FxHashMap<i64, Vec<usize>> = FxHashMap::default();
        let mut rows = 0;
        for (row, caseid) in caseids.into_iter().enumerate() {
            groups.entry(caseid).or_default().push(row);
            rows += 1;
        }
        Self { groups, rows }
    }

    /// Rows filed under `caseid`; empty when the respondent has none
    #[must_use]
    pub fn get(&self, caseid: i64) -> &[usize] {
        self.groups.get(&caseid).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of pregnancies filed under `caseid`
    #[must_use]
    pub fn count(&self, caseid: i64) -> usize {
        self.get(caseid).len()
    }

    /// Number of distinct respondents with at least one pregnancy
    #[must_use]
    pub fn num_respondents(&self) -> usize {
        self.groups.len()
    }

    /// Number of pregnancy rows indexed
    #[must_use]
    pub const fn num_rows(&self) -> usize {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_preserve_row_order() {
        let index = PregnancyIndex::from_caseids([1, 6, 1, 2, 6, 1]);
        assert_eq!(index.get(1), &[0, 2, 5]);
        assert_eq!(index.get(6), &[1, 4]);
        assert_eq!(index.get(2), &[3]);
        assert_eq!(index.num_respondents(), 3);
        assert_eq!(index.num_rows(), 6);
    }

    #[test]
    fn absent_identifier_is_empty() {
        let index = PregnancyIndex::build(&[PregnancyRecord::for_respondent(1)]);
        assert!(index.get(42).is_empty());
        assert_eq!(index.count(42), 0);
    }
}
