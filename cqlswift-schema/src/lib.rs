//! # cqlswift Schema
//!
//! CG-SQL JSON schema loader and intermediate representation.
//!
//! This crate provides:
//! - JSON schema parsing of the procedure/query declarations emitted by the
//!   CG-SQL compiler (`--rt json_schema`)
//! - Type definitions for declarations, arguments and result columns
//! - Schema validation
//! - Intermediate representation for code generation, including the
//!   identifier naming transform

pub mod error;
pub mod ir;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use ir::{QueryShape, ResolvedDeclaration, ResolvedQuery, SchemaIr, to_camel_case};
pub use parser::{parse_schema, parse_schema_file};
pub use types::{ArgType, ArgumentDef, Binding, DeclarationDef, DeclarationGroup, Schema};
pub use validation::validate_schema;
