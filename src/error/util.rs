//! Utility functions for error handling
//!
//! Opening files with enough context that a missing data file is obvious from
//! the error message alone.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{NsfgError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(NsfgError::File {
            message: format!("File not found, needed for: {purpose}"),
            path: path.to_path_buf(),
        });
    }

    if !path.is_file() {
        return Err(NsfgError::File {
            message: format!("Path is not a file, expected a file for: {purpose}"),
            path: path.to_path_buf(),
        });
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            io::ErrorKind::NotFound => {
                "File not found - it may have been deleted during operation".to_string()
            }
            _ => format!("Failed to open file for: {purpose}"),
        };
        NsfgError::io(context, path, e)
    })
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    io::Read::read_to_string(&mut file, &mut content).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::InvalidData => {
                "File contains invalid UTF-8 data - cannot read as text".to_string()
            }
            _ => format!("Failed to read file content for: {purpose}"),
        };
        NsfgError::io(context, path, e)
    })?;

    Ok(content)
}
