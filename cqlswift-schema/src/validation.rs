//! Schema validation utilities.
//!
//! The upstream compiler has already type-checked the procedures; these
//! checks only guard the invariants the code generator relies on.

use crate::error::SchemaError;
use crate::types::{ArgumentDef, DeclarationDef, DeclarationGroup, Schema};
use std::collections::HashSet;

/// Validates a parsed schema for code generation.
///
/// # Arguments
/// * `schema` - The schema to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for group in DeclarationGroup::ALL {
        for (index, decl) in schema.group(group).iter().enumerate() {
            if decl.name.is_empty() {
                return Err(SchemaError::EmptyName {
                    group: group.key().to_string(),
                    index,
                });
            }

            if !seen_names.insert(decl.name.as_str()) {
                return Err(SchemaError::DuplicateDeclaration {
                    group: group.key().to_string(),
                    name: decl.name.clone(),
                });
            }

            validate_declaration(decl)?;
        }
    }

    Ok(())
}

/// Validates the parameters and result columns of one declaration.
fn validate_declaration(decl: &DeclarationDef) -> Result<(), SchemaError> {
    for arg in &decl.args {
        validate_argument_name(decl, arg)?;
    }

    for column in decl.columns() {
        validate_argument_name(decl, column)?;

        if column.binding.is_out_or_in_out() {
            return Err(SchemaError::BoundColumn {
                query: decl.name.clone(),
                column: column.name.clone(),
                binding: column.binding.cql_name().to_string(),
            });
        }
    }

    Ok(())
}

fn validate_argument_name(decl: &DeclarationDef, arg: &ArgumentDef) -> Result<(), SchemaError> {
    if arg.name.is_empty() {
        return Err(SchemaError::validation(format!(
            "Declaration '{}' has an argument with an empty name",
            decl.name
        )));
    }
    Ok(())
}
