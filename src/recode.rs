//! Recoding of survey columns
//!
//! Survey files store "not ascertained", "refused" and "don't know" as reserved
//! numeric codes. These helpers turn such codes into nulls and derive cleaned
//! columns. Every function returns a new batch; the input is never modified.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, new_null_array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::error::{NsfgError, Result};
use crate::utils::arrow::{downcast_array, get_column, replace_column};

/// Replace every occurrence of `codes` in an integer or float column with null
pub fn replace_with_null(batch: &RecordBatch, column: &str, codes: &[i64]) -> Result<RecordBatch> {
    let array = get_column(batch, column)?;
    let recoded: ArrayRef = match array.data_type() {
        DataType::Int64 => {
            let values = downcast_array::<Int64Array>(array, column, "Int64")?;
            Arc::new(
                values
                    .iter()
                    .map(|v| v.filter(|x| !codes.contains(x)))
                    .collect::<Int64Array>(),
            )
        }
        DataType::Float64 => {
            let values = downcast_array::<Float64Array>(array, column, "Float64")?;
            Arc::new(
                values
                    .iter()
                    .map(|v| v.filter(|x| !codes.iter().any(|c| *c as f64 == *x)))
                    .collect::<Float64Array>(),
            )
        }
        _ => return Err(numeric_expected(column)),
    };

    log_recode(column, array.as_ref(), recoded.as_ref());
    replace_column(batch, column, recoded)
}

/// Null out values strictly greater than `threshold`
pub fn null_above(batch: &RecordBatch, column: &str, threshold: i64) -> Result<RecordBatch> {
    let array = get_column(batch, column)?;
    let recoded: ArrayRef = match array.data_type() {
        DataType::Int64 => {
            let values = downcast_array::<Int64Array>(array, column, "Int64")?;
            Arc::new(
                values
                    .iter()
                    .map(|v| v.filter(|x| *x <= threshold))
                    .collect::<Int64Array>(),
            )
        }
        DataType::Float64 => {
            let values = downcast_array::<Float64Array>(array, column, "Float64")?;
            Arc::new(
                values
                    .iter()
                    .map(|v| v.filter(|x| *x <= threshold as f64))
                    .collect::<Float64Array>(),
            )
        }
        _ => return Err(numeric_expected(column)),
    };

    log_recode(column, array.as_ref(), recoded.as_ref());
    replace_column(batch, column, recoded)
}

/// Divide a numeric column by `divisor`; the result is always `Float64`
pub fn divide(batch: &RecordBatch, column: &str, divisor: f64) -> Result<RecordBatch> {
    let values = float_values(batch, column)?;
    let scaled: Float64Array = values.iter().map(|v| v.map(|x| x / divisor)).collect();
    replace_column(batch, column, Arc::new(scaled))
}

/// Replace a column with all nulls of the same type
pub fn set_all_null(batch: &RecordBatch, column: &str) -> Result<RecordBatch> {
    let array = get_column(batch, column)?;
    let nulls = new_null_array(array.data_type(), array.len());
    replace_column(batch, column, nulls)
}

/// Column as `Float64`, casting integer columns
pub fn float_values(batch: &RecordBatch, column: &str) -> Result<Float64Array> {
    let array = get_column(batch, column)?;
    if !array.data_type().is_numeric() {
        return Err(numeric_expected(column));
    }
    let casted = cast(array, &DataType::Float64)?;
    Ok(downcast_array::<Float64Array>(&casted, column, "Float64")?.clone())
}

/// Append a new nullable column, or replace it if a column of that name exists
pub fn with_column(batch: &RecordBatch, name: &str, array: ArrayRef) -> Result<RecordBatch> {
    if batch.schema().index_of(name).is_ok() {
        return replace_column(batch, name, array);
    }

    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    fields.push(Field::new(name, array.data_type().clone(), true));
    let mut columns = batch.columns().to_vec();
    columns.push(array);
    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

fn numeric_expected(column: &str) -> NsfgError {
    NsfgError::InvalidDataType {
        column: column.to_string(),
        expected: "a numeric type".to_string(),
    }
}

fn log_recode(column: &str, before: &dyn Array, after: &dyn Array) {
    log::debug!(
        "Recoded {}: {} -> {} missing values",
        column,
        before.null_count(),
        after.null_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("pregnum", DataType::Int64, true),
            Field::new("birthwgt_oz", DataType::Float64, true),
            Field::new("caseid", DataType::Utf8, true),
        ]);
        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(Int64Array::from(vec![Some(2), Some(97), None, Some(99), Some(3)])),
                Arc::new(Float64Array::from(vec![
                    Some(8.0),
                    Some(98.0),
                    Some(4.0),
                    None,
                    Some(22.0),
                ])),
                Arc::new(arrow::array::StringArray::from(vec!["1", "2", "3", "4", "5"])),
            ],
        )
        .unwrap()
    }

    fn ints(batch: &RecordBatch, column: &str) -> Vec<Option<i64>> {
        downcast_array::<Int64Array>(get_column(batch, column).unwrap(), column, "Int64")
            .unwrap()
            .iter()
            .collect()
    }

    #[test]
    fn sentinels_become_null() {
        let recoded = replace_with_null(&batch(), "pregnum", &[97, 98, 99]).unwrap();
        assert_eq!(ints(&recoded, "pregnum"), vec![Some(2), None, None, None, Some(3)]);
    }

    #[test]
    fn sentinels_in_float_column() {
        let recoded = replace_with_null(&batch(), "birthwgt_oz", &[97, 98, 99]).unwrap();
        assert_eq!(recoded.column(1).null_count(), 2);
    }

    #[test]
    fn string_column_is_rejected() {
        assert!(replace_with_null(&batch(), "caseid", &[1]).is_err());
    }

    #[test]
    fn null_above_threshold() {
        let recoded = null_above(&batch(), "birthwgt_oz", 20).unwrap();
        let values = float_values(&recoded, "birthwgt_oz").unwrap();
        assert!(values.is_null(4));
        assert!(values.is_valid(0));
    }

    #[test]
    fn divide_casts_to_float() {
        let recoded = divide(&batch(), "pregnum", 100.0).unwrap();
        assert_eq!(recoded.schema().field(0).data_type(), &DataType::Float64);
        let values = float_values(&recoded, "pregnum").unwrap();
        assert!((values.value(0) - 0.02).abs() < 1e-12);
        assert!(values.is_null(2));
    }

    #[test]
    fn set_all_null_keeps_type() {
        let recoded = set_all_null(&batch(), "pregnum").unwrap();
        assert_eq!(recoded.column(0).null_count(), 5);
        assert_eq!(recoded.column(0).data_type(), &DataType::Int64);
    }

    #[test]
    fn with_column_appends() {
        let extra = Arc::new(Float64Array::from(vec![1.0; 5]));
        let extended = with_column(&batch(), "totalwgt_lb", extra).unwrap();
        assert_eq!(extended.num_columns(), 4);
        assert_eq!(extended.schema().field(3).name(), "totalwgt_lb");
    }
}
