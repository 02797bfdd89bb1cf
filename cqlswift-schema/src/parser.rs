//! CG-SQL JSON schema parser.
//!
//! This module loads the JSON document produced by `cql --rt json_schema`
//! into the internal schema representation.

use crate::error::ParseError;
use crate::types::Schema;
use std::path::Path;

/// Parses a CG-SQL JSON schema from a string.
///
/// # Arguments
/// * `json` - JSON schema content
///
/// # Returns
/// Parsed schema or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed, a required field is
/// missing, or a field holds a value outside its domain.
pub fn parse_schema(json: &str) -> Result<Schema, ParseError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses a CG-SQL JSON schema file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_schema_file(path: &Path) -> Result<Schema, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse_schema(&json)
}
