//! Per-argument facts used by the procedure and query generators.
//!
//! A [`SwiftArg`] is built once per declaration per generation pass from the
//! IR argument. Its local name may be replaced once by the procedure
//! generator to avoid collisions; everything else is derived.

use crate::swift::types::{DB_HANDLE_TYPE, interop_type, nullable_wrapper, swift_type};
use cqlswift_schema::{ArgType, ArgumentDef, Binding, to_camel_case};

/// Name of the synthetic database handle argument.
pub const DB_ARG_NAME: &str = "db";

/// Prefix of the temporaries holding nullable boundary wrappers.
const NULLABLE_TEMP_PREFIX: &str = "_1_";

/// Type of an argument as seen by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwiftArgType {
    /// The `sqlite3 *` handle prepended to database procedures.
    DbHandle,
    /// A schema-declared type.
    Cql(ArgType),
}

/// A procedure parameter or query column prepared for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwiftArg {
    name: String,
    arg_type: SwiftArgType,
    not_null: bool,
    binding: Binding,
    local_name: String,
}

impl SwiftArg {
    /// Creates the synthetic `db` handle argument.
    #[must_use]
    pub fn db_handle() -> Self {
        Self {
            name: DB_ARG_NAME.to_string(),
            arg_type: SwiftArgType::DbHandle,
            not_null: true,
            binding: Binding::In,
            local_name: DB_ARG_NAME.to_string(),
        }
    }

    /// Creates an argument from its schema definition.
    #[must_use]
    pub fn from_def(def: &ArgumentDef) -> Self {
        Self {
            name: def.name.clone(),
            arg_type: SwiftArgType::Cql(def.arg_type),
            not_null: def.not_null,
            binding: def.binding,
            local_name: to_camel_case(&def.name, false),
        }
    }

    /// Returns the IR name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the public (label) name, a pure function of the IR name.
    #[must_use]
    pub fn public_name(&self) -> String {
        to_camel_case(&self.name, false)
    }

    /// Returns the name used inside the generated body.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Replaces the local name.
    pub fn rename_local(&mut self, local_name: impl Into<String>) {
        self.local_name = local_name.into();
    }

    /// Returns true if the argument may be null.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        !self.not_null
    }

    /// Returns true if the argument is passed by reference.
    #[must_use]
    pub const fn is_out_or_in_out(&self) -> bool {
        self.binding.is_out_or_in_out()
    }

    /// Returns true for a nullable bool/integer/long/real.
    #[must_use]
    pub fn is_nullable_primitive(&self) -> bool {
        self.is_nullable() && matches!(self.arg_type, SwiftArgType::Cql(ty) if ty.is_primitive())
    }

    /// Returns the Swift type, optional-qualified when nullable.
    #[must_use]
    pub fn swift_type(&self) -> String {
        let base = match self.arg_type {
            SwiftArgType::DbHandle => DB_HANDLE_TYPE,
            SwiftArgType::Cql(ty) => swift_type(ty),
        };
        if self.is_nullable() {
            format!("{base}?")
        } else {
            base.to_string()
        }
    }

    /// Returns the parameter declaration, e.g. `name: String?` or
    /// `dest: inout Unmanaged<AnyObject>?`.
    #[must_use]
    pub fn declaration(&self) -> String {
        let mut ty = self.swift_type();
        if self.is_out_or_in_out() {
            if self.arg_type == SwiftArgType::Cql(ArgType::Object) {
                ty = "Unmanaged<AnyObject>?".to_string();
            }
            ty = format!("inout {ty}");
        }

        let public_name = self.public_name();
        if public_name == self.local_name {
            format!("{public_name}: {ty}")
        } else {
            format!("{public_name} {}: {ty}", self.local_name)
        }
    }

    /// Returns the expression passed to the C function for this argument.
    #[must_use]
    pub fn boundary_expr(&self) -> String {
        let optional = if self.is_nullable() { "?" } else { "" };
        let interop = match self.arg_type {
            SwiftArgType::Cql(ty) => interop_type(ty),
            SwiftArgType::DbHandle => None,
        };
        let base = match interop {
            Some(interop) => format!("{} as {interop}{optional}", self.local_name),
            None if self.is_nullable_primitive() => self.nullable_temp_name(),
            None => self.local_name.clone(),
        };

        if self.is_out_or_in_out() {
            format!("&{base}")
        } else {
            base
        }
    }

    /// Returns the statement that builds the nullable boundary wrapper, if
    /// this argument needs one.
    #[must_use]
    pub fn preparation(&self) -> Option<String> {
        if !self.is_nullable() {
            return None;
        }

        let SwiftArgType::Cql(ty) = self.arg_type else {
            return None;
        };
        let wrapper = nullable_wrapper(ty)?;

        Some(format!(
            "let {} = {}",
            self.nullable_temp_name(),
            wrapper.initializer(&self.local_name)
        ))
    }

    fn nullable_temp_name(&self) -> String {
        format!("{NULLABLE_TEMP_PREFIX}{}", self.local_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(name: &str, ty: ArgType, not_null: bool) -> SwiftArg {
        SwiftArg::from_def(&ArgumentDef::new(name, ty, not_null))
    }

    #[test]
    fn test_db_handle() {
        let db = SwiftArg::db_handle();
        assert_eq!(db.declaration(), "db: OpaquePointer");
        assert_eq!(db.boundary_expr(), "db");
        assert_eq!(db.preparation(), None);
    }

    #[test]
    fn test_public_name_is_camel_case() {
        let a = arg("display_name", ArgType::Text, true);
        assert_eq!(a.public_name(), "displayName");
        assert_eq!(a.local_name(), "displayName");
        assert_eq!(a.declaration(), "displayName: String");
    }

    #[test]
    fn test_renamed_declaration_keeps_label() {
        let mut a = arg("db", ArgType::Integer, true);
        a.rename_local("_a1");
        assert_eq!(a.public_name(), "db");
        assert_eq!(a.declaration(), "db _a1: Int32");
        assert_eq!(a.boundary_expr(), "_a1");
    }

    #[test]
    fn test_text_and_blob_casts() {
        assert_eq!(arg("t", ArgType::Text, true).boundary_expr(), "t as NSString");
        assert_eq!(arg("t", ArgType::Text, false).boundary_expr(), "t as NSString?");
        assert_eq!(arg("b", ArgType::Blob, true).boundary_expr(), "b as NSData");
        assert_eq!(arg("b", ArgType::Blob, false).boundary_expr(), "b as NSData?");
    }

    #[test]
    fn test_object_and_primitives_pass_through() {
        assert_eq!(arg("o", ArgType::Object, false).boundary_expr(), "o");
        assert_eq!(arg("n", ArgType::Long, true).boundary_expr(), "n");
        assert_eq!(arg("n", ArgType::Long, false).boundary_expr(), "_1_n");
    }

    #[test]
    fn test_nullable_primitive_preparation() {
        let a = arg("done", ArgType::Bool, false);
        assert_eq!(a.declaration(), "done: Bool?");
        assert_eq!(
            a.preparation().as_deref(),
            Some(
                "let _1_done = cql_nullable_bool(is_null: DarwinBoolean(done == nil), value: cql_bool(done ?? false))"
            )
        );
    }

    #[test]
    fn test_no_preparation_for_reference_types() {
        for ty in [ArgType::Text, ArgType::Blob, ArgType::Object] {
            assert_eq!(arg("x", ty, false).preparation(), None);
        }
        assert_eq!(arg("x", ArgType::Real, true).preparation(), None);
    }

    #[test]
    fn test_out_arguments() {
        let def = ArgumentDef::new("dest", ArgType::Object, false).with_binding(Binding::InOut);
        let a = SwiftArg::from_def(&def);
        assert_eq!(a.declaration(), "dest: inout Unmanaged<AnyObject>?");
        assert_eq!(a.boundary_expr(), "&dest");

        let def = ArgumentDef::new("total", ArgType::Long, true).with_binding(Binding::Out);
        let a = SwiftArg::from_def(&def);
        assert_eq!(a.declaration(), "total: inout Int64");
        assert_eq!(a.boundary_expr(), "&total");

        let def = ArgumentDef::new("label", ArgType::Text, false).with_binding(Binding::Out);
        let a = SwiftArg::from_def(&def);
        assert_eq!(a.declaration(), "label: inout String?");
        assert_eq!(a.boundary_expr(), "&label as NSString?");
    }
}
