//! A Rust library for reading fixed-width NSFG survey files described by Stata
//! dictionaries, recoding sentinel values, and cross-checking respondent
//! pregnancy counts against the pregnancy file.

pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod models;
pub mod reader;
pub mod recode;
pub mod schema;
pub mod stats;
pub mod utils;
pub mod validate;

// Re-export the most common types for easier use
pub use config::SurveyConfig;
pub use error::{NsfgError, Result};
pub use index::PregnancyIndex;
pub use loader::{SurveyTable, clean_fem_preg, clean_fem_resp, read_fem_preg, read_fem_resp};
pub use models::{PregnancyRecord, RespondentRecord};
pub use reader::{Compression, FixedWidthReader};
pub use schema::{StataDictionary, VariableKind, VariableSpec};
pub use stats::ValueCounts;
pub use validate::{
    MissingCountPolicy, PregnumMismatch, PregnumValidation, find_pregnum_mismatches,
    validate_pregnum, validate_pregnum_from_config,
};

// Arrow types
pub use arrow::record_batch::RecordBatch;
