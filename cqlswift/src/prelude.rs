//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use cqlswift::prelude::*;
//! ```

// Schema types
pub use cqlswift_schema::{
    ArgType, ArgumentDef, Binding, DeclarationGroup, ParseError, QueryShape, Schema, SchemaError,
    SchemaIr, parse_schema, parse_schema_file, validate_schema,
};

// Code generation
pub use cqlswift_codegen::{
    CodegenError, Generator, GeneratorOptions, generate_from_file, generate_from_json,
    generate_from_schema,
};

// Package assembly
pub use cqlswift_package::{
    PackageAssembler, PackageConfig, PackageError, PackageLayout, ProcessRunner, ToolRunner,
    assemble_package,
};
