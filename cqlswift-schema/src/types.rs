//! Schema type definitions.
//!
//! This module contains the data structures representing the CG-SQL JSON
//! schema: declaration groups, procedure/query declarations, and their
//! arguments and result columns.

use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer};

/// Complete CG-SQL schema document.
///
/// Only the procedure groups are modelled; everything else the compiler
/// emits (tables, views, indices, ...) is ignored on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Schema {
    /// General procedures.
    pub general: Vec<DeclarationDef>,
    /// Single-table insert procedures.
    pub inserts: Vec<DeclarationDef>,
    /// Single-table update procedures.
    pub updates: Vec<DeclarationDef>,
    /// Single-table delete procedures.
    pub deletes: Vec<DeclarationDef>,
    /// Select procedures.
    pub queries: Vec<DeclarationDef>,
}

impl Schema {
    /// Returns the declarations of one group in IR order.
    #[must_use]
    pub fn group(&self, group: DeclarationGroup) -> &[DeclarationDef] {
        match group {
            DeclarationGroup::General => &self.general,
            DeclarationGroup::Inserts => &self.inserts,
            DeclarationGroup::Updates => &self.updates,
            DeclarationGroup::Deletes => &self.deletes,
            DeclarationGroup::Queries => &self.queries,
        }
    }

    /// Iterates over every declaration in emission order, tagged with its group.
    pub fn declarations(&self) -> impl Iterator<Item = (DeclarationGroup, &DeclarationDef)> {
        DeclarationGroup::ALL
            .into_iter()
            .flat_map(move |group| self.group(group).iter().map(move |decl| (group, decl)))
    }

    /// Returns the total number of declarations across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        DeclarationGroup::ALL
            .iter()
            .map(|&group| self.group(group).len())
            .sum()
    }

    /// Returns true if the schema declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Top-level declaration groups, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeclarationGroup {
    /// `general`
    General,
    /// `inserts`
    Inserts,
    /// `updates`
    Updates,
    /// `deletes`
    Deletes,
    /// `queries`
    Queries,
}

impl DeclarationGroup {
    /// All groups in the order their declarations are emitted.
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Inserts,
        Self::Updates,
        Self::Deletes,
        Self::Queries,
    ];

    /// Returns the JSON key of the group.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Inserts => "inserts",
            Self::Updates => "updates",
            Self::Deletes => "deletes",
            Self::Queries => "queries",
        }
    }
}

/// A procedure or query declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationDef {
    /// Foreign-interface identifier (snake case).
    pub name: String,
    /// Ordered parameters.
    pub args: Vec<ArgumentDef>,
    /// Whether the procedure takes a database handle and can fail.
    #[serde(default = "default_true", deserialize_with = "flag")]
    pub uses_database: bool,
    /// Selects the single-row shape for queries.
    #[serde(default, deserialize_with = "flag")]
    pub has_out_result: bool,
    /// Result columns; present only for queries.
    #[serde(default)]
    pub projection: Option<Vec<ArgumentDef>>,
}

impl DeclarationDef {
    /// Returns true if this declaration produces a result set.
    #[must_use]
    pub fn is_query(&self) -> bool {
        self.projection.is_some()
    }

    /// Returns the result columns, empty for procedures.
    #[must_use]
    pub fn columns(&self) -> &[ArgumentDef] {
        self.projection.as_deref().unwrap_or_default()
    }
}

/// A procedure parameter or a query result column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArgumentDef {
    /// Name (snake case).
    pub name: String,
    /// Primitive type.
    #[serde(rename = "type")]
    pub arg_type: ArgType,
    /// Whether null is excluded.
    #[serde(rename = "isNotNull", deserialize_with = "flag")]
    pub not_null: bool,
    /// Binding direction.
    #[serde(default)]
    pub binding: Binding,
}

impl ArgumentDef {
    /// Creates an `in` argument.
    #[must_use]
    pub fn new(name: impl Into<String>, arg_type: ArgType, not_null: bool) -> Self {
        Self {
            name: name.into(),
            arg_type,
            not_null,
            binding: Binding::In,
        }
    }

    /// Sets the binding direction.
    #[must_use]
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }

    /// Returns true if the argument may be null.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        !self.not_null
    }
}

/// CG-SQL primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    /// Boolean.
    Bool,
    /// Signed 32-bit integer.
    Integer,
    /// Signed 64-bit integer.
    Long,
    /// 64-bit floating point.
    Real,
    /// Text string.
    Text,
    /// Binary blob.
    Blob,
    /// Opaque object reference.
    Object,
}

impl ArgType {
    /// Returns the CG-SQL type name.
    #[must_use]
    pub const fn cql_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Real => "real",
            Self::Text => "text",
            Self::Blob => "blob",
            Self::Object => "object",
        }
    }

    /// Returns true for the value types that need an explicit nullable
    /// wrapper at the foreign boundary.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Bool | Self::Integer | Self::Long | Self::Real)
    }
}

/// Parameter binding direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Binding {
    /// Input only.
    #[default]
    In,
    /// Output only.
    Out,
    /// Input and output.
    InOut,
}

impl Binding {
    /// Returns the CG-SQL binding name.
    #[must_use]
    pub const fn cql_name(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::InOut => "inout",
        }
    }

    /// Returns true if the value is passed by reference.
    #[must_use]
    pub const fn is_out_or_in_out(&self) -> bool {
        matches!(self, Self::Out | Self::InOut)
    }
}

const fn default_true() -> bool {
    true
}

/// Accepts JSON booleans as well as the `0`/`1` integers the compiler emits.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(other) => Err(D::Error::invalid_value(
            Unexpected::Signed(other),
            &"a boolean or 0/1",
        )),
    }
}
