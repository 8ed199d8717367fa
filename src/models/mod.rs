//! Typed records extracted from survey tables
//!
//! Tables stay in Arrow form while they are read and recoded; the validator
//! works on these plain structs, deserialized with `serde_arrow`.

pub mod pregnancy;
pub mod respondent;

pub use pregnancy::PregnancyRecord;
pub use respondent::RespondentRecord;

use arrow::record_batch::RecordBatch;
use serde::de::DeserializeOwned;

use crate::error::{NsfgError, Result};

/// Deserialize the listed columns of a batch into records
///
/// Columns in `required` must exist; columns in `optional` are used when
/// present and left to their serde defaults otherwise. All other columns are
/// dropped before deserialization.
pub(crate) fn records_from_batch<T: DeserializeOwned>(
    batch: &RecordBatch,
    required: &[&str],
    optional: &[&str],
) -> Result<Vec<T>> {
    let schema = batch.schema();
    let mut indices = Vec::with_capacity(required.len() + optional.len());
    for column in required {
        let idx = schema
            .index_of(column)
            .map_err(|_| NsfgError::column_not_found(column))?;
        indices.push(idx);
    }
    indices.extend(optional.iter().filter_map(|c| schema.index_of(c).ok()));

    let projected = batch.project(&indices)?;
    Ok(serde_arrow::from_record_batch::<Vec<T>>(&projected)?)
}
