//! Utilities for working with Arrow arrays.

use arrow::array::{Array, ArrayRef};
use arrow::record_batch::RecordBatch;

use crate::error::{NsfgError, Result};

/// Get a column from a record batch by name
///
/// # Errors
/// `ColumnNotFound` if the batch has no such column
pub fn get_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a ArrayRef> {
    let idx = get_column_index(batch, column_name)?;
    Ok(batch.column(idx))
}

/// Get the column index by name from a record batch
pub fn get_column_index(batch: &RecordBatch, column_name: &str) -> Result<usize> {
    batch
        .schema()
        .index_of(column_name)
        .map_err(|_| NsfgError::column_not_found(column_name))
}

/// Downcast an array reference to a concrete array type
///
/// # Arguments
/// * `array` - The array to downcast
/// * `column_name` - Column name, for the error message
/// * `expected_type_name` - Human-readable type name, for the error message
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| NsfgError::InvalidDataType {
            column: column_name.to_string(),
            expected: expected_type_name.to_string(),
        })
}

/// Replace one column of a batch, keeping every other column as is
pub fn replace_column(batch: &RecordBatch, column_name: &str, array: ArrayRef) -> Result<RecordBatch> {
    let idx = get_column_index(batch, column_name)?;
    let mut columns = batch.columns().to_vec();
    let schema = batch.schema();

    if columns[idx].data_type() == array.data_type() {
        columns[idx] = array;
        return Ok(RecordBatch::try_new(schema, columns)?);
    }

    let mut fields: Vec<_> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    fields[idx] = fields[idx].clone().with_data_type(array.data_type().clone());
    columns[idx] = array;
    Ok(RecordBatch::try_new(
        std::sync::Arc::new(arrow::datatypes::Schema::new(fields)),
        columns,
    )?)
}
