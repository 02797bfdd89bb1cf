//! # cqlswift
//!
//! Swift bindings for CG-SQL stored procedures.
//!
//! cqlswift reads the JSON schema the CQL compiler emits for a set of stored
//! procedures and generates Swift wrappers over the compiler's C output:
//! plain functions for procedures, and `Hashable` values or
//! `RandomAccessCollection`s for queries. It can also drive the compiler and
//! the Swift toolchain to assemble a ready-to-build Swift package.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cqlswift::prelude::*;
//!
//! let options = GeneratorOptions::for_package("Todo");
//! let swift = generate_from_file(Path::new("out/todo.json"), &options)?;
//!
//! let config = PackageConfig::new("cql", "cgsql/sources", "todo.sql", "Todo");
//! let layout = assemble_package(&config)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - JSON schema loading, validation and IR
//! - [`codegen`] - Swift code generation from schemas
//! - [`package`] - Swift package assembly

pub mod prelude;

/// Schema loading and validation.
pub mod schema {
    pub use cqlswift_schema::*;
}

/// Swift code generation from schemas.
pub mod codegen {
    pub use cqlswift_codegen::*;
}

/// Swift package assembly.
pub mod package {
    pub use cqlswift_package::*;
}
