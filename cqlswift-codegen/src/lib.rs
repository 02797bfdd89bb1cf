//! # cqlswift Codegen
//!
//! Swift binding generation from CG-SQL JSON schemas.
//!
//! This crate provides:
//! - Procedure wrappers over the generated C entry points
//! - Value and collection types over query result sets
//! - Emission of a complete Swift source unit

pub mod error;
pub mod generator;
pub mod swift;

pub use error::CodegenError;
pub use generator::{Generator, GeneratorOptions};

use cqlswift_schema::{Schema, SchemaIr};

/// Generates Swift code from a parsed schema.
///
/// # Arguments
/// * `schema` - Parsed CG-SQL JSON schema
/// * `options` - Generation options
///
/// # Returns
/// Generated Swift code as a string.
///
/// # Errors
/// Returns `CodegenError` if validation or generation fails.
pub fn generate_from_schema(
    schema: &Schema,
    options: &GeneratorOptions,
) -> Result<String, CodegenError> {
    cqlswift_schema::validate_schema(schema)?;
    let ir = SchemaIr::from_schema(schema);
    Generator::new(&ir, options).generate()
}

/// Generates Swift code from a CG-SQL JSON schema string.
///
/// # Arguments
/// * `json` - JSON schema content
/// * `options` - Generation options
///
/// # Returns
/// Generated Swift code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, or generation fails.
pub fn generate_from_json(json: &str, options: &GeneratorOptions) -> Result<String, CodegenError> {
    let schema = cqlswift_schema::parse_schema(json)?;
    generate_from_schema(&schema, options)
}

/// Generates Swift code from a CG-SQL JSON schema file.
///
/// # Arguments
/// * `path` - Path to the JSON schema file
/// * `options` - Generation options
///
/// # Returns
/// Generated Swift code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation, or generation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    options: &GeneratorOptions,
) -> Result<String, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_from_json(&json, options)
}
