//! Loading and cleaning of the NSFG 2002 female respondent and pregnancy files

use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::config::SurveyConfig;
use crate::error::{NsfgError, Result};
use crate::reader::{Compression, FixedWidthReader};
use crate::recode::{divide, float_values, null_above, replace_with_null, set_all_null, with_column};
use crate::schema::{StataDictionary, read_stata_dct};
use crate::utils::arrow::{downcast_array, get_column, replace_column};

/// Respondent identifier column shared by both tables
pub const CASEID: &str = "caseid";
/// Stated number of pregnancies in the respondent table
pub const PREGNUM: &str = "pregnum";
/// Not ascertained, refused, don't know
pub const NA_CODES: [i64; 3] = [97, 98, 99];

const MAX_BIRTHWGT_LB: i64 = 20;

/// A table read from a dictionary and its data file
#[derive(Debug, Clone)]
pub struct SurveyTable {
    name: String,
    dictionary: StataDictionary,
    batch: RecordBatch,
}

impl SurveyTable {
    #[must_use]
    pub fn new(name: impl Into<String>, dictionary: StataDictionary, batch: RecordBatch) -> Self {
        Self {
            name: name.into(),
            dictionary,
            batch,
        }
    }

    /// Read `dct_path` and parse `dat_path` with it
    pub fn read(
        name: impl Into<String>,
        dct_path: &Path,
        dat_path: &Path,
        compression: Compression,
    ) -> Result<Self> {
        let dictionary = read_stata_dct(dct_path)?;
        let batch = FixedWidthReader::new(&dictionary, compression).read_file(dat_path)?;
        Ok(Self::new(name, dictionary, batch))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn dictionary(&self) -> &StataDictionary {
        &self.dictionary
    }

    #[must_use]
    pub const fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Apply a batch transformation, keeping name and dictionary
    pub fn map_batch<F>(self, f: F) -> Result<Self>
    where
        F: FnOnce(&RecordBatch) -> Result<RecordBatch>,
    {
        let batch = f(&self.batch)?;
        Ok(Self { batch, ..self })
    }
}

/// Read the female respondent file and recode it
pub fn read_fem_resp(config: &SurveyConfig) -> Result<SurveyTable> {
    let table = SurveyTable::read(
        "FemResp",
        &config.resp_dct_path(),
        &config.resp_dat_path(),
        config.compression,
    )?;
    table.map_batch(|batch| clean_fem_resp(&normalize_caseid(batch)?))
}

/// Read the pregnancy file and recode it
pub fn read_fem_preg(config: &SurveyConfig) -> Result<SurveyTable> {
    let table = SurveyTable::read(
        "FemPreg",
        &config.preg_dct_path(),
        &config.preg_dat_path(),
        config.compression,
    )?;
    table.map_batch(|batch| clean_fem_preg(&normalize_caseid(batch)?))
}

/// Recode sentinel values in the respondent table
pub fn clean_fem_resp(batch: &RecordBatch) -> Result<RecordBatch> {
    replace_with_null(batch, PREGNUM, &NA_CODES)
}

/// Recode the pregnancy table and derive `totalwgt_lb`
///
/// Each step only runs when its column is present, so reduced extracts of the
/// pregnancy file load too.
pub fn clean_fem_preg(batch: &RecordBatch) -> Result<RecordBatch> {
    let mut batch = batch.clone();

    if has_column(&batch, "agepreg") {
        // centiyears
        batch = divide(&batch, "agepreg", 100.0)?;
    }
    if has_column(&batch, "birthwgt_lb") {
        batch = null_above(&batch, "birthwgt_lb", MAX_BIRTHWGT_LB)?;
        batch = replace_with_null(&batch, "birthwgt_lb", &NA_CODES)?;
    }
    for column in ["birthwgt_oz", "hpagelb"] {
        if has_column(&batch, column) {
            batch = replace_with_null(&batch, column, &NA_CODES)?;
        }
    }
    if has_column(&batch, "babysex") {
        batch = replace_with_null(&batch, "babysex", &[7, 9])?;
    }
    if has_column(&batch, "nbrnaliv") {
        batch = replace_with_null(&batch, "nbrnaliv", &[9])?;
    }

    if has_column(&batch, "birthwgt_lb") && has_column(&batch, "birthwgt_oz") {
        let lb = float_values(&batch, "birthwgt_lb")?;
        let oz = float_values(&batch, "birthwgt_oz")?;
        let total: Float64Array = lb
            .iter()
            .zip(oz.iter())
            .map(|(lb, oz)| Some(lb? + oz? / 16.0))
            .collect();
        batch = with_column(&batch, "totalwgt_lb", Arc::new(total))?;
    }

    if has_column(&batch, "cmintvw") {
        batch = set_all_null(&batch, "cmintvw")?;
    }

    Ok(batch)
}

/// Cast the identifier column to `Int64`
///
/// The NSFG dictionaries declare `caseid` as `str12`; both tables need a
/// shared integer key.
pub fn normalize_caseid(batch: &RecordBatch) -> Result<RecordBatch> {
    let array = get_column(batch, CASEID)?;
    match array.data_type() {
        DataType::Int64 => Ok(batch.clone()),
        DataType::Utf8 => {
            let ids = downcast_array::<StringArray>(array, CASEID, "Utf8")?;
            let parsed = ids
                .iter()
                .enumerate()
                .map(|(row, id)| {
                    id.map(|s| {
                        s.trim().parse::<i64>().map_err(|e| NsfgError::Parse {
                            line: row + 1,
                            variable: CASEID.to_string(),
                            message: format!("identifier '{s}' is not an integer: {e}"),
                        })
                    })
                    .transpose()
                })
                .collect::<Result<Int64Array>>()?;
            replace_column(batch, CASEID, Arc::new(parsed))
        }
        other => Err(NsfgError::InvalidDataType {
            column: CASEID.to_string(),
            expected: format!("Int64 or Utf8, found {other}"),
        }),
    }
}

fn has_column(batch: &RecordBatch, column: &str) -> bool {
    batch.schema().index_of(column).is_ok()
}
