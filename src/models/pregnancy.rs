//! Pregnancy records

use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loader::CASEID;
use crate::models::records_from_batch;

const OPTIONAL_COLUMNS: [&str; 4] = ["pregordr", "outcome", "prglngth", "totalwgt_lb"];

/// One pregnancy, keyed by the respondent who reported it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PregnancyRecord {
    /// Respondent identifier; many pregnancies may share one
    pub caseid: i64,
    #[serde(default)]
    pub pregordr: Option<i64>,
    #[serde(default)]
    pub outcome: Option<i64>,
    /// Duration in weeks
    #[serde(default)]
    pub prglngth: Option<i64>,
    #[serde(default)]
    pub totalwgt_lb: Option<f64>,
}

impl PregnancyRecord {
    /// Record carrying only the respondent identifier
    #[must_use]
    pub fn for_respondent(caseid: i64) -> Self {
        Self {
            caseid,
            ..Self::default()
        }
    }

    /// Extract pregnancies from a cleaned pregnancy batch, in row order
    pub fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        records_from_batch(batch, &[CASEID], &OPTIONAL_COLUMNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, Int64Array};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    #[test]
    fn optional_columns_default_to_none() {
        let schema = Schema::new(vec![
            Field::new("caseid", DataType::Int64, true),
            Field::new("totalwgt_lb", DataType::Float64, true),
        ]);
        let batch = RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(Int64Array::from(vec![1, 1, 6])),
                Arc::new(Float64Array::from(vec![Some(8.8125), None, Some(9.125)])),
            ],
        )
        .unwrap();

        let pregnancies = PregnancyRecord::from_batch(&batch).unwrap();
        assert_eq!(pregnancies.len(), 3);
        assert_eq!(pregnancies[0].caseid, 1);
        assert_eq!(pregnancies[0].totalwgt_lb, Some(8.8125));
        assert_eq!(pregnancies[1].totalwgt_lb, None);
        assert_eq!(pregnancies[2].outcome, None);
    }
}
