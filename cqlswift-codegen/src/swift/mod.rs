//! Swift code generation modules.

pub mod args;
pub mod fetch;
pub mod procedures;
pub mod queries;
pub mod syntax;
pub mod types;

pub use procedures::ProcedureGenerator;
pub use queries::{ColumnAccessor, QueryGenerator};
pub use syntax::ProcSyntax;
