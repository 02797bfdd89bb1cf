//! Plain procedure wrapper generation.

use crate::swift::args::{DB_ARG_NAME, SwiftArg};
use crate::swift::syntax::{CallStmt, ProcHeader, ProcSyntax};
use cqlswift_schema::ResolvedDeclaration;

/// Local names a parameter may not take inside a generated body.
const RESERVED_LOCALS: [&str; 2] = [DB_ARG_NAME, "statement"];

/// Prefix of positional placeholder names.
const PLACEHOLDER_PREFIX: &str = "_a";

/// Generator for plain procedure wrappers.
pub struct ProcedureGenerator<'a> {
    decl: &'a ResolvedDeclaration,
}

impl<'a> ProcedureGenerator<'a> {
    /// Creates a new procedure generator.
    #[must_use]
    pub fn new(decl: &'a ResolvedDeclaration) -> Self {
        Self { decl }
    }

    /// Builds the ordered argument list: the `db` handle when the procedure
    /// uses the database, then the declared parameters with colliding local
    /// names replaced by `_a<position>`.
    ///
    /// A parameter collides when its local name is reserved or equals the
    /// declaration's C name, or when its IR name equals the declaration name
    /// or starts with the placeholder prefix.
    #[must_use]
    pub fn arguments(&self) -> Vec<SwiftArg> {
        let mut args = Vec::with_capacity(self.decl.params.len() + 1);
        if self.decl.uses_database {
            args.push(SwiftArg::db_handle());
        }
        let public_start = args.len();
        args.extend(self.decl.params.iter().map(SwiftArg::from_def));

        for (position, arg) in args.iter_mut().enumerate().skip(public_start) {
            if self.collides(arg) {
                arg.rename_local(format!("{PLACEHOLDER_PREFIX}{position}"));
            }
        }

        args
    }

    fn collides(&self, arg: &SwiftArg) -> bool {
        let local_name = arg.local_name();
        arg.name() == self.decl.name
            || arg.name().starts_with(PLACEHOLDER_PREFIX)
            || RESERVED_LOCALS.contains(&local_name)
            || local_name == self.decl.name
    }

    /// Builds the syntax tree of the wrapper function.
    #[must_use]
    pub fn build(&self) -> ProcSyntax {
        let args = self.arguments();

        ProcSyntax {
            header: ProcHeader::Function {
                name: self.decl.proc_name.clone(),
            },
            params: args.iter().map(SwiftArg::declaration).collect(),
            throws: self.decl.uses_database,
            setup: args.iter().filter_map(SwiftArg::preparation).collect(),
            call: CallStmt {
                callee: self.decl.name.clone(),
                args: args.iter().map(SwiftArg::boundary_expr).collect(),
                checked: self.decl.uses_database,
            },
            finish: Vec::new(),
        }
    }

    /// Generates the wrapper function source.
    #[must_use]
    pub fn generate(&self) -> String {
        tracing::debug!(
            "Generating swift proc {} for {}",
            self.decl.proc_name,
            self.decl.name
        );
        self.build().render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cqlswift_schema::{ArgType, ArgumentDef, Binding, DeclarationGroup, ResolvedDeclaration};
    use pretty_assertions::assert_eq;

    fn decl(name: &str, uses_database: bool, params: Vec<ArgumentDef>) -> ResolvedDeclaration {
        ResolvedDeclaration {
            group: DeclarationGroup::General,
            name: name.to_string(),
            proc_name: cqlswift_schema::to_camel_case(name, false),
            type_name: cqlswift_schema::to_camel_case(name, true),
            uses_database,
            params,
            query: None,
        }
    }

    #[test]
    fn test_generate_database_procedure() {
        let d = decl(
            "tasks_set_done",
            true,
            vec![
                ArgumentDef::new("rowid", ArgType::Long, true),
                ArgumentDef::new("done", ArgType::Bool, true),
            ],
        );
        let output = ProcedureGenerator::new(&d).generate();
        assert_eq!(
            output,
            "public func tasksSetDone(db: OpaquePointer, rowid: Int64, done: Bool) throws {\n    try check(tasks_set_done(db, rowid, done))\n}\n"
        );
    }

    #[test]
    fn test_generate_nullable_arguments() {
        let d = decl(
            "b_add",
            true,
            vec![
                ArgumentDef::new("t", ArgType::Text, false),
                ArgumentDef::new("i", ArgType::Integer, false),
                ArgumentDef::new("r", ArgType::Real, false),
            ],
        );
        let output = ProcedureGenerator::new(&d).generate();
        assert_eq!(
            output,
            "public func bAdd(db: OpaquePointer, t: String?, i: Int32?, r: Double?) throws {\n\
             \x20   let _1_i = cql_nullable_int32(is_null: DarwinBoolean(i == nil), value: cql_int32(i ?? 0))\n\
             \x20   let _1_r = cql_nullable_double(is_null: DarwinBoolean(r == nil), value: cql_double(r ?? 0.0))\n\
             \x20   try check(b_add(db, t as NSString?, _1_i, _1_r))\n\
             }\n"
        );
    }

    #[test]
    fn test_generate_without_database() {
        let d = decl(
            "test_objects",
            false,
            vec![
                ArgumentDef::new("dest", ArgType::Object, false).with_binding(Binding::InOut),
                ArgumentDef::new("src", ArgType::Object, true),
            ],
        );
        let output = ProcedureGenerator::new(&d).generate();
        assert_eq!(
            output,
            "public func testObjects(dest: inout Unmanaged<AnyObject>?, src: AnyObject) {\n    test_objects(&dest, src)\n}\n"
        );
    }

    #[test]
    fn test_generate_no_arguments() {
        let d = decl("ping", false, Vec::new());
        let output = ProcedureGenerator::new(&d).generate();
        assert_eq!(output, "public func ping() {\n    ping()\n}\n");
    }

    #[test]
    fn test_argument_named_like_declaration_is_renamed() {
        let d = decl(
            "total",
            true,
            vec![
                ArgumentDef::new("x", ArgType::Integer, true),
                ArgumentDef::new("total", ArgType::Integer, false),
            ],
        );
        let output = ProcedureGenerator::new(&d).generate();
        assert_eq!(
            output,
            "public func total(db: OpaquePointer, x: Int32, total _a2: Int32?) throws {\n\
             \x20   let _1__a2 = cql_nullable_int32(is_null: DarwinBoolean(_a2 == nil), value: cql_int32(_a2 ?? 0))\n\
             \x20   try check(total(db, x, _1__a2))\n\
             }\n"
        );
    }

    #[test]
    fn test_multi_word_argument_named_like_declaration_is_renamed() {
        let d = decl(
            "user_id",
            true,
            vec![ArgumentDef::new("user_id", ArgType::Integer, true)],
        );
        let output = ProcedureGenerator::new(&d).generate();
        assert_eq!(
            output,
            "public func userId(db: OpaquePointer, userId _a1: Int32) throws {\n    try check(user_id(db, _a1))\n}\n"
        );
    }

    #[test]
    fn test_reserved_names_are_renamed() {
        let d = decl(
            "p",
            true,
            vec![
                ArgumentDef::new("db", ArgType::Text, true),
                ArgumentDef::new("statement", ArgType::Text, true),
                ArgumentDef::new("_a9", ArgType::Text, true),
                ArgumentDef::new("ok", ArgType::Text, true),
            ],
        );
        let locals: Vec<_> = ProcedureGenerator::new(&d)
            .arguments()
            .iter()
            .map(|a| a.local_name().to_string())
            .collect();
        assert_eq!(locals, ["db", "_a1", "_a2", "_a3", "ok"]);
    }

    #[test]
    fn test_placeholder_positions_without_database() {
        let d = decl(
            "p",
            false,
            vec![ArgumentDef::new("db", ArgType::Long, true)],
        );
        let output = ProcedureGenerator::new(&d).generate();
        assert_eq!(output, "public func p(db _a0: Int64) {\n    p(_a0)\n}\n");
    }

    #[test]
    fn test_public_names_are_stable() {
        let d = decl(
            "p",
            true,
            vec![ArgumentDef::new("db", ArgType::Long, true)],
        );
        let generator = ProcedureGenerator::new(&d);
        let first: Vec<_> = generator.arguments().iter().map(SwiftArg::public_name).collect();
        let second: Vec<_> = generator.arguments().iter().map(SwiftArg::public_name).collect();
        assert_eq!(first, ["db", "db"]);
        assert_eq!(first, second);
    }
}
