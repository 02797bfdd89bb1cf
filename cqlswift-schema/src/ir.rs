//! Intermediate representation for code generation.
//!
//! This module provides a flattened, ordered representation of the schema
//! that is easier to use for code generation: every declaration carries its
//! group, its derived Swift names, and its query shape.

use crate::types::{ArgumentDef, DeclarationDef, DeclarationGroup, Schema};

/// Intermediate representation of a schema for code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIr {
    /// Declarations in emission order.
    pub declarations: Vec<ResolvedDeclaration>,
}

impl SchemaIr {
    /// Creates an intermediate representation from a parsed schema.
    #[must_use]
    pub fn from_schema(schema: &Schema) -> Self {
        let declarations = schema
            .declarations()
            .map(|(group, decl)| ResolvedDeclaration::from_declaration_def(group, decl))
            .collect();

        Self { declarations }
    }

    /// Gets a declaration by its foreign name.
    #[must_use]
    pub fn get_declaration(&self, name: &str) -> Option<&ResolvedDeclaration> {
        self.declarations.iter().find(|decl| decl.name == name)
    }

    /// Iterates over the declarations of one group.
    pub fn group(&self, group: DeclarationGroup) -> impl Iterator<Item = &ResolvedDeclaration> {
        self.declarations
            .iter()
            .filter(move |decl| decl.group == group)
    }
}

/// Resolved declaration information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDeclaration {
    /// Group the declaration was loaded from.
    pub group: DeclarationGroup,
    /// Foreign-interface name.
    pub name: String,
    /// Swift function name (lower camel case).
    pub proc_name: String,
    /// Swift type name (upper camel case).
    pub type_name: String,
    /// Whether a database handle is passed and failures are checked.
    pub uses_database: bool,
    /// Ordered parameters.
    pub params: Vec<ArgumentDef>,
    /// Query information, if the declaration has a projection.
    pub query: Option<ResolvedQuery>,
}

impl ResolvedDeclaration {
    /// Creates a resolved declaration from a declaration definition.
    #[must_use]
    pub fn from_declaration_def(group: DeclarationGroup, decl: &DeclarationDef) -> Self {
        let query = decl.projection.as_ref().map(|columns| ResolvedQuery {
            shape: QueryShape::from_has_out_result(decl.has_out_result),
            columns: columns.clone(),
        });

        Self {
            group,
            name: decl.name.clone(),
            proc_name: to_camel_case(&decl.name, false),
            type_name: to_camel_case(&decl.name, true),
            uses_database: decl.uses_database,
            params: decl.args.clone(),
            query,
        }
    }

    /// Returns true if this declaration produces a result set.
    #[must_use]
    pub fn is_query(&self) -> bool {
        self.query.is_some()
    }

    /// Returns the same declaration with its projection stripped.
    #[must_use]
    pub fn as_procedure(&self) -> Self {
        Self {
            query: None,
            ..self.clone()
        }
    }

    /// Returns the opaque result-set reference type of the C layer.
    #[must_use]
    pub fn result_set_ref_name(&self) -> String {
        format!("{}_result_set_ref", self.name)
    }

    /// Returns the name of the C function that fetches the result set.
    #[must_use]
    pub fn fetch_results_name(&self) -> String {
        format!("{}_fetch_results", self.name)
    }
}

/// Resolved query information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    /// Result shape.
    pub shape: QueryShape,
    /// Ordered result columns.
    pub columns: Vec<ArgumentDef>,
}

/// Shape of a query wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryShape {
    /// At most one row, exposed as a value type with a failable constructor.
    SingleResult,
    /// Any number of rows, exposed as a random-access collection.
    MultiResult,
}

impl QueryShape {
    /// Selects the shape from the `hasOutResult` flag.
    #[must_use]
    pub const fn from_has_out_result(has_out_result: bool) -> Self {
        if has_out_result {
            Self::SingleResult
        } else {
            Self::MultiResult
        }
    }

    /// Returns true for the single-row shape.
    #[must_use]
    pub const fn is_single(&self) -> bool {
        matches!(self, Self::SingleResult)
    }
}

/// Converts a snake_case identifier to camelCase.
///
/// Every segment after the first has its leading character upper-cased; with
/// `capitalize_first` the first segment is upper-cased too. The rest of each
/// segment is left unchanged and empty segments contribute nothing.
#[must_use]
pub fn to_camel_case(s: &str, capitalize_first: bool) -> String {
    let mut result = String::with_capacity(s.len());

    for (i, segment) in s.split('_').enumerate() {
        if i == 0 && !capitalize_first {
            result.push_str(segment);
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }

    result
}
