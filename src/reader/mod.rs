//! Module for reading fixed-width survey data files into Arrow record batches.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{ArrayRef, Float64Builder, Int64Builder, StringBuilder};
use arrow::record_batch::RecordBatch;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};

use crate::error::util::safe_open_file;
use crate::error::{NsfgError, Result};
use crate::schema::{StataDictionary, VariableKind, VariableSpec};

/// Compression of a fixed-width data file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Plain text
    None,
    /// Gzip stream
    Gzip,
    /// Gzip when the file name ends in `.gz`, plain text otherwise
    #[default]
    Infer,
}

impl Compression {
    /// Resolve `Infer` against a concrete path
    #[must_use]
    pub fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Infer if path.extension().is_some_and(|ext| ext == "gz") => Self::Gzip,
            Self::Infer => Self::None,
            other => other,
        }
    }
}

/// Reads records laid out by a Stata dictionary
pub struct FixedWidthReader<'a> {
    dictionary: &'a StataDictionary,
    compression: Compression,
}

impl<'a> FixedWidthReader<'a> {
    #[must_use]
    pub const fn new(dictionary: &'a StataDictionary, compression: Compression) -> Self {
        Self {
            dictionary,
            compression,
        }
    }

    /// Read a whole data file into a single record batch
    pub fn read_file(&self, path: &Path) -> Result<RecordBatch> {
        log::info!("Reading fixed-width data from {}", path.display());
        let start = Instant::now();

        let file = safe_open_file(path, "reading fixed-width data")?;
        let input: Box<dyn Read> = match self.compression.resolve(path) {
            Compression::Gzip => Box::new(GzDecoder::new(file)),
            _ => Box::new(file),
        };

        let batch = self.parse_records(BufReader::new(input), path)?;
        log::info!(
            "Read {} records from {} in {:?}",
            batch.num_rows(),
            path.display(),
            start.elapsed()
        );
        Ok(batch)
    }

    /// Parse records from any buffered source; `source` is only used in errors
    pub fn parse_records<R: BufRead>(&self, reader: R, source: &Path) -> Result<RecordBatch> {
        let mut columns: Vec<ColumnBuilder> = self
            .dictionary
            .variables()
            .iter()
            .map(|v| ColumnBuilder::new(v.kind))
            .collect();

        for (idx, line) in reader.split(b'\n').enumerate() {
            let line_no = idx + 1;
            let mut line =
                line.map_err(|e| NsfgError::io(format!("Failed reading line {line_no}"), source, e))?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            for (spec, column) in self.dictionary.variables().iter().zip(columns.iter_mut()) {
                let raw = &line[spec.byte_range(line.len())];
                let field = std::str::from_utf8(raw)
                    .map_err(|_| parse_error(line_no, spec, "field is not valid UTF-8"))?
                    .trim();
                column.append(field, line_no, spec)?;
            }
        }

        let arrays: Vec<ArrayRef> = columns.into_iter().map(ColumnBuilder::finish).collect();
        Ok(RecordBatch::try_new(self.dictionary.arrow_schema(), arrays)?)
    }
}

enum ColumnBuilder {
    Int(Int64Builder),
    Float(Float64Builder),
    Str(StringBuilder),
}

impl ColumnBuilder {
    fn new(kind: VariableKind) -> Self {
        match kind {
            VariableKind::Int => Self::Int(Int64Builder::new()),
            VariableKind::Float => Self::Float(Float64Builder::new()),
            VariableKind::Str => Self::Str(StringBuilder::new()),
        }
    }

    /// Blank fields are missing; anything else must parse as the column kind
    fn append(&mut self, field: &str, line_no: usize, spec: &VariableSpec) -> Result<()> {
        if field.is_empty() {
            match self {
                Self::Int(b) => b.append_null(),
                Self::Float(b) => b.append_null(),
                Self::Str(b) => b.append_null(),
            }
            return Ok(());
        }

        match self {
            Self::Int(b) => {
                let value = field.parse::<i64>().map_err(|e| {
                    parse_error(line_no, spec, format!("'{field}' is not an integer: {e}"))
                })?;
                b.append_value(value);
            }
            Self::Float(b) => {
                let value = field.parse::<f64>().map_err(|e| {
                    parse_error(line_no, spec, format!("'{field}' is not a number: {e}"))
                })?;
                b.append_value(value);
            }
            Self::Str(b) => b.append_value(field),
        }
        Ok(())
    }

    fn finish(self) -> ArrayRef {
        match self {
            Self::Int(mut b) => Arc::new(b.finish()),
            Self::Float(mut b) => Arc::new(b.finish()),
            Self::Str(mut b) => Arc::new(b.finish()),
        }
    }
}

fn parse_error(line: usize, spec: &VariableSpec, message: impl Into<String>) -> NsfgError {
    NsfgError::Parse {
        line,
        variable: spec.name.clone(),
        message: message.into(),
    }
}
