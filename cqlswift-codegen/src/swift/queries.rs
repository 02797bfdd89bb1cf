//! Query wrapper generation.
//!
//! A query becomes either a `Hashable` value type over one row
//! ([`QueryShape::SingleResult`]) or a `RandomAccessCollection` of `Hashable`
//! row elements ([`QueryShape::MultiResult`]). Both share the column accessor
//! builder and derive their initializer from the procedure wrapper.

use crate::swift::args::SwiftArg;
use crate::swift::fetch::{OBJC_PREFIX, derive_fetch_init};
use crate::swift::procedures::ProcedureGenerator;
use crate::swift::syntax::indent;
use crate::swift::types::swift_type;
use cqlswift_schema::{ArgumentDef, QueryShape, ResolvedDeclaration, ResolvedQuery};

/// Builds the computed property exposing one result column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnAccessor<'a> {
    query_name: &'a str,
    row_scoped: bool,
}

impl<'a> ColumnAccessor<'a> {
    /// Creates an accessor builder; row-scoped accessors read `row` of the
    /// parent collection instead of the single result.
    #[must_use]
    pub const fn new(query_name: &'a str, row_scoped: bool) -> Self {
        Self {
            query_name,
            row_scoped,
        }
    }

    fn result_set(&self) -> &'static str {
        if self.row_scoped {
            "resultSet.result_set"
        } else {
            "result_set"
        }
    }

    fn row_arg(&self) -> &'static str {
        if self.row_scoped { ", row" } else { "" }
    }

    /// Generates the accessor at indentation level zero.
    #[must_use]
    pub fn generate(&self, column: &ArgumentDef) -> String {
        let mut output = String::new();
        let col = SwiftArg::from_def(column);
        let q = self.query_name;
        let c = &column.name;
        let result_set = self.result_set();
        let row_arg = self.row_arg();

        output.push_str(&format!("public var {} {{\n", col.declaration()));

        if col.is_nullable_primitive() {
            // The C accessors avoid boxing the value in an NSNumber.
            let c_result_set =
                format!("{q}_from_{OBJC_PREFIX}{q}({result_set}).takeUnretainedValue()");
            output.push_str(&format!(
                "    if {q}_get_{c}_is_null({c_result_set}{row_arg}) {{\n"
            ));
            output.push_str("        return nil\n");
            output.push_str("    }\n");
            output.push_str(&format!(
                "    return {q}_get_{c}_value({c_result_set}{row_arg})\n"
            ));
        } else if col.is_nullable() {
            output.push_str(&format!(
                "    {OBJC_PREFIX}{q}_get_{c}({result_set}{row_arg}) as {}?\n",
                swift_type(column.arg_type)
            ));
        } else {
            output.push_str(&format!(
                "    {OBJC_PREFIX}{q}_get_{c}({result_set}{row_arg})\n"
            ));
        }

        output.push_str("}\n");
        output
    }
}

/// Generator for query wrappers.
pub struct QueryGenerator<'a> {
    decl: &'a ResolvedDeclaration,
    query: &'a ResolvedQuery,
}

impl<'a> QueryGenerator<'a> {
    /// Creates a new query generator, or `None` if the declaration has no
    /// projection.
    #[must_use]
    pub fn new(decl: &'a ResolvedDeclaration) -> Option<Self> {
        decl.query.as_ref().map(|query| Self { decl, query })
    }

    /// Generates the query wrapper source.
    #[must_use]
    pub fn generate(&self) -> String {
        tracing::debug!(
            "Generating swift query {} ({:?}) for {}",
            self.decl.type_name,
            self.query.shape,
            self.decl.name
        );

        match self.query.shape {
            QueryShape::SingleResult => self.generate_single_result(),
            QueryShape::MultiResult => self.generate_multi_result(),
        }
    }

    /// Derives the fetching initializer from the procedure wrapper.
    fn generate_init(&self) -> String {
        let procedure = self.decl.as_procedure();
        let syntax = ProcedureGenerator::new(&procedure).build();
        derive_fetch_init(syntax, self.decl, self.query.shape).render()
    }

    fn generate_accessors(&self, row_scoped: bool) -> String {
        let accessor = ColumnAccessor::new(&self.decl.name, row_scoped);
        self.query
            .columns
            .iter()
            .map(|column| accessor.generate(column))
            .collect()
    }

    /// Generates the single-row value type.
    fn generate_single_result(&self) -> String {
        let mut output = String::new();
        let q = &self.decl.name;
        let type_name = &self.decl.type_name;

        output.push_str(&format!("public struct {type_name} : Hashable {{\n"));
        output.push_str(&indent(&self.generate_accessors(false), 1));
        output.push('\n');

        output.push_str("    // Hashable\n");
        output.push_str(&format!(
            "    public static func == (lhs: {type_name}, rhs: {type_name}) -> Bool {{\n"
        ));
        output.push_str(&format!(
            "        {OBJC_PREFIX}{q}_equal(lhs.result_set, rhs.result_set)\n"
        ));
        output.push_str("    }\n\n");

        output.push_str("    public func hash(into hasher: inout Hasher) {\n");
        output.push_str(&format!(
            "        hasher.combine({OBJC_PREFIX}{q}_hash(result_set))\n"
        ));
        output.push_str("    }\n\n");

        output.push_str(&format!("    private var result_set: {OBJC_PREFIX}{q}!\n\n"));
        output.push_str(&indent(&self.generate_init(), 1));
        output.push_str("}\n");

        output
    }

    /// Generates the collection type and its row element.
    fn generate_multi_result(&self) -> String {
        let mut output = String::new();
        let q = &self.decl.name;
        let type_name = &self.decl.type_name;

        output.push_str(&format!(
            "public struct {type_name} : RandomAccessCollection {{\n"
        ));
        output.push_str("    public struct Element : Hashable {\n");
        output.push_str(&format!("        let resultSet: {type_name}\n"));
        output.push_str("        let row: Int32\n\n");
        output.push_str(&indent(&self.generate_accessors(true), 2));
        output.push('\n');

        output.push_str("        // Hashable\n");
        output.push_str(
            "        public static func == (lhs: Element, rhs: Element) -> Bool {\n",
        );
        output.push_str(&format!(
            "            {OBJC_PREFIX}{q}_row_equal(lhs.resultSet.result_set, lhs.row, rhs.resultSet.result_set, rhs.row)\n"
        ));
        output.push_str("        }\n\n");
        output.push_str("        public func hash(into hasher: inout Hasher) {\n");
        output.push_str(&format!(
            "            hasher.combine({OBJC_PREFIX}{q}_row_hash(resultSet.result_set, row))\n"
        ));
        output.push_str("        }\n");
        output.push_str("    }\n\n");

        output.push_str("    // RandomAccessCollection\n");
        output.push_str("    public subscript(index: Int32) -> Element {\n");
        output.push_str("        get { Element(resultSet: self, row: index) }\n");
        output.push_str("    }\n\n");
        output.push_str("    public var startIndex: Int32 { 0 }\n");
        output.push_str("    public var endIndex: Int32 {\n");
        output.push_str(&format!(
            "        {OBJC_PREFIX}{q}_result_count(result_set)\n"
        ));
        output.push_str("    }\n\n");

        output.push_str(&format!("    private var result_set: {OBJC_PREFIX}{q}!\n\n"));
        output.push_str(&indent(&self.generate_init(), 1));
        output.push_str("}\n");

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cqlswift_schema::{ArgType, DeclarationGroup, to_camel_case};
    use pretty_assertions::assert_eq;

    fn query(
        name: &str,
        shape: QueryShape,
        params: Vec<ArgumentDef>,
        columns: Vec<ArgumentDef>,
    ) -> ResolvedDeclaration {
        ResolvedDeclaration {
            group: DeclarationGroup::Queries,
            name: name.to_string(),
            proc_name: to_camel_case(name, false),
            type_name: to_camel_case(name, true),
            uses_database: true,
            params,
            query: Some(ResolvedQuery { shape, columns }),
        }
    }

    #[test]
    fn test_accessor_not_null() {
        let accessor = ColumnAccessor::new("tasks_all", false);
        let output = accessor.generate(&ArgumentDef::new("done", ArgType::Bool, true));
        assert_eq!(
            output,
            "public var done: Bool {\n    CGS_tasks_all_get_done(result_set)\n}\n"
        );
    }

    #[test]
    fn test_accessor_nullable_text_and_blob() {
        let accessor = ColumnAccessor::new("b_all", true);
        assert_eq!(
            accessor.generate(&ArgumentDef::new("t", ArgType::Text, false)),
            "public var t: String? {\n    CGS_b_all_get_t(resultSet.result_set, row) as String?\n}\n"
        );
        assert_eq!(
            accessor.generate(&ArgumentDef::new("bl", ArgType::Blob, false)),
            "public var bl: Data? {\n    CGS_b_all_get_bl(resultSet.result_set, row) as Data?\n}\n"
        );
    }

    #[test]
    fn test_accessor_object_columns() {
        let accessor = ColumnAccessor::new("q", false);
        assert_eq!(
            accessor.generate(&ArgumentDef::new("payload", ArgType::Object, false)),
            "public var payload: AnyObject? {\n    CGS_q_get_payload(result_set) as AnyObject?\n}\n"
        );
        assert_eq!(
            accessor.generate(&ArgumentDef::new("payload", ArgType::Object, true)),
            "public var payload: AnyObject {\n    CGS_q_get_payload(result_set)\n}\n"
        );
    }

    #[test]
    fn test_accessor_nullable_primitive_uses_c_layer() {
        let accessor = ColumnAccessor::new("b_all", true);
        assert_eq!(
            accessor.generate(&ArgumentDef::new("max_count", ArgType::Long, false)),
            "public var maxCount: Int64? {\n\
             \x20   if b_all_get_max_count_is_null(b_all_from_CGS_b_all(resultSet.result_set).takeUnretainedValue(), row) {\n\
             \x20       return nil\n\
             \x20   }\n\
             \x20   return b_all_get_max_count_value(b_all_from_CGS_b_all(resultSet.result_set).takeUnretainedValue(), row)\n\
             }\n"
        );
    }

    #[test]
    fn test_accessor_single_vs_row_scoped() {
        let column = ArgumentDef::new("value", ArgType::Integer, false);
        let single = ColumnAccessor::new("q", false).generate(&column);
        let row = ColumnAccessor::new("q", true).generate(&column);
        assert!(single.contains("(q_from_CGS_q(result_set).takeUnretainedValue())"));
        assert!(row.contains("(q_from_CGS_q(resultSet.result_set).takeUnretainedValue(), row)"));
    }

    #[test]
    fn test_new_requires_projection() {
        let mut decl = query("q", QueryShape::MultiResult, Vec::new(), Vec::new());
        assert!(QueryGenerator::new(&decl).is_some());
        decl.query = None;
        assert!(QueryGenerator::new(&decl).is_none());
    }

    #[test]
    fn test_generate_single_result() {
        let decl = query(
            "get_user_by_id",
            QueryShape::SingleResult,
            vec![ArgumentDef::new("id", ArgType::Integer, true)],
            vec![ArgumentDef::new("name", ArgType::Text, false)],
        );
        let output = QueryGenerator::new(&decl)
            .expect("query")
            .generate();

        assert_eq!(
            output,
            r#"public struct GetUserById : Hashable {
    public var name: String? {
        CGS_get_user_by_id_get_name(result_set) as String?
    }

    // Hashable
    public static func == (lhs: GetUserById, rhs: GetUserById) -> Bool {
        CGS_get_user_by_id_equal(lhs.result_set, rhs.result_set)
    }

    public func hash(into hasher: inout Hasher) {
        hasher.combine(CGS_get_user_by_id_hash(result_set))
    }

    private var result_set: CGS_get_user_by_id!

    public init?(db: OpaquePointer, id: Int32) throws {
        var result_set_ref: Unmanaged<get_user_by_id_result_set_ref>?
        try check(get_user_by_id_fetch_results(db, &result_set_ref, id))
        result_set = CGS_get_user_by_id_from_get_user_by_id(result_set_ref!.takeUnretainedValue())
        cql_release(result_set_ref!.takeUnretainedValue())
        if CGS_get_user_by_id_get_value(result_set) == 0 { return nil }
    }
}
"#
        );
    }

    #[test]
    fn test_generate_multi_result() {
        let decl = query(
            "tasks_all",
            QueryShape::MultiResult,
            Vec::new(),
            vec![
                ArgumentDef::new("rowid", ArgType::Long, true),
                ArgumentDef::new("description", ArgType::Text, true),
            ],
        );
        let output = QueryGenerator::new(&decl)
            .expect("query")
            .generate();

        assert_eq!(
            output,
            r#"public struct TasksAll : RandomAccessCollection {
    public struct Element : Hashable {
        let resultSet: TasksAll
        let row: Int32

        public var rowid: Int64 {
            CGS_tasks_all_get_rowid(resultSet.result_set, row)
        }
        public var description: String {
            CGS_tasks_all_get_description(resultSet.result_set, row)
        }

        // Hashable
        public static func == (lhs: Element, rhs: Element) -> Bool {
            CGS_tasks_all_row_equal(lhs.resultSet.result_set, lhs.row, rhs.resultSet.result_set, rhs.row)
        }

        public func hash(into hasher: inout Hasher) {
            hasher.combine(CGS_tasks_all_row_hash(resultSet.result_set, row))
        }
    }

    // RandomAccessCollection
    public subscript(index: Int32) -> Element {
        get { Element(resultSet: self, row: index) }
    }

    public var startIndex: Int32 { 0 }
    public var endIndex: Int32 {
        CGS_tasks_all_result_count(result_set)
    }

    private var result_set: CGS_tasks_all!

    public init(db: OpaquePointer) throws {
        var result_set_ref: Unmanaged<tasks_all_result_set_ref>?
        try check(tasks_all_fetch_results(db, &result_set_ref))
        result_set = CGS_tasks_all_from_tasks_all(result_set_ref!.takeUnretainedValue())
        cql_release(result_set_ref!.takeUnretainedValue())
    }
}
"#
        );
    }

    #[test]
    fn test_initializer_matches_procedure_edit() {
        let decl = query(
            "fetch_range",
            QueryShape::MultiResult,
            vec![ArgumentDef::new("n", ArgType::Integer, true)],
            vec![ArgumentDef::new("value", ArgType::Integer, true)],
        );
        let output = QueryGenerator::new(&decl)
            .expect("query")
            .generate();
        let init = QueryGenerator::new(&decl)
            .expect("query")
            .generate_init();

        assert!(output.contains(&indent(&init, 1)));
    }
}
