//! Swift type mapping and nullable boundary wrappers.

use cqlswift_schema::ArgType;

/// Swift type of the database handle argument.
pub const DB_HANDLE_TYPE: &str = "OpaquePointer";

/// Struct used to pass a nullable primitive across the C boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullableWrapper {
    /// C struct name.
    pub struct_name: &'static str,
    /// Value stored in the slot when the wrapper is null.
    pub zero: &'static str,
    /// C value type the Swift value is cast to.
    pub c_type: &'static str,
}

const NULLABLE_BOOL: NullableWrapper = NullableWrapper {
    struct_name: "cql_nullable_bool",
    zero: "false",
    c_type: "cql_bool",
};

const NULLABLE_INT32: NullableWrapper = NullableWrapper {
    struct_name: "cql_nullable_int32",
    zero: "0",
    c_type: "cql_int32",
};

const NULLABLE_INT64: NullableWrapper = NullableWrapper {
    struct_name: "cql_nullable_int64",
    zero: "0",
    c_type: "cql_int64",
};

const NULLABLE_DOUBLE: NullableWrapper = NullableWrapper {
    struct_name: "cql_nullable_double",
    zero: "0.0",
    c_type: "cql_double",
};

impl NullableWrapper {
    /// Returns the initializer expression wrapping the Swift optional `local`.
    ///
    /// `is_null` is set iff `local` is nil, in which case the value slot
    /// holds the zero value.
    #[must_use]
    pub fn initializer(&self, local: &str) -> String {
        format!(
            "{}(is_null: DarwinBoolean({local} == nil), value: {}({local} ?? {}))",
            self.struct_name, self.c_type, self.zero
        )
    }
}

/// Returns the nullable wrapper for a primitive type, `None` for text, blob
/// and object, which are nullable natively in Swift.
#[must_use]
pub const fn nullable_wrapper(ty: ArgType) -> Option<&'static NullableWrapper> {
    match ty {
        ArgType::Bool => Some(&NULLABLE_BOOL),
        ArgType::Integer => Some(&NULLABLE_INT32),
        ArgType::Long => Some(&NULLABLE_INT64),
        ArgType::Real => Some(&NULLABLE_DOUBLE),
        ArgType::Text | ArgType::Blob | ArgType::Object => None,
    }
}

/// Returns the Swift type for a CG-SQL type.
#[must_use]
pub const fn swift_type(ty: ArgType) -> &'static str {
    match ty {
        ArgType::Bool => "Bool",
        ArgType::Integer => "Int32",
        ArgType::Long => "Int64",
        ArgType::Real => "Double",
        ArgType::Text => "String",
        ArgType::Blob => "Data",
        ArgType::Object => "AnyObject",
    }
}

/// Returns the Foundation bridging type used when passing text or blob
/// values to C.
#[must_use]
pub const fn interop_type(ty: ArgType) -> Option<&'static str> {
    match ty {
        ArgType::Text => Some("NSString"),
        ArgType::Blob => Some("NSData"),
        _ => None,
    }
}
