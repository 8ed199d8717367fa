//! Female respondent records

use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loader::{CASEID, PREGNUM};
use crate::models::records_from_batch;

/// One survey respondent with their stated number of pregnancies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentRecord {
    pub caseid: i64,
    /// `None` when the answer was not ascertained, refused or unknown
    pub pregnum: Option<i64>,
}

impl RespondentRecord {
    #[must_use]
    pub const fn new(caseid: i64, pregnum: Option<i64>) -> Self {
        Self { caseid, pregnum }
    }

    /// Extract respondents from a cleaned respondent batch
    pub fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        records_from_batch(batch, &[CASEID, PREGNUM], &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int64Array;
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    #[test]
    fn reads_caseid_and_missing_pregnum() {
        let schema = Schema::new(vec![
            Field::new("caseid", DataType::Int64, true),
            Field::new("rscrinf", DataType::Int64, true),
            Field::new("pregnum", DataType::Int64, true),
        ]);
        let batch = RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(Int64Array::from(vec![2298, 5012])),
                Arc::new(Int64Array::from(vec![1, 5])),
                Arc::new(Int64Array::from(vec![Some(4), None])),
            ],
        )
        .unwrap();

        let respondents = RespondentRecord::from_batch(&batch).unwrap();
        assert_eq!(
            respondents,
            vec![
                RespondentRecord::new(2298, Some(4)),
                RespondentRecord::new(5012, None),
            ]
        );
    }

    #[test]
    fn missing_pregnum_column_is_error() {
        let schema = Schema::new(vec![Field::new("caseid", DataType::Int64, true)]);
        let batch = RecordBatch::try_new(
            Arc::new(schema),
            vec![Arc::new(Int64Array::from(vec![1]))],
        )
        .unwrap();
        assert!(RespondentRecord::from_batch(&batch).is_err());
    }
}
