//! Schema handling for fixed-width survey files.
//!
//! The survey files carry no schema of their own; the paired Stata dictionary
//! supplies column positions, names and storage types.

pub mod dct;

pub use dct::{StataDictionary, VariableKind, VariableSpec, parse_dct, read_stata_dct};
