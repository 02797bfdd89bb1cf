//! Emission of a complete Swift source unit.

use crate::error::CodegenError;
use crate::swift::{ProcedureGenerator, QueryGenerator};
use cqlswift_schema::{DeclarationGroup, ResolvedDeclaration, SchemaIr};

/// Options threaded through a generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Native library module imported by the emitted unit.
    pub module_name: String,
}

impl GeneratorOptions {
    /// Creates options importing `module_name`.
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
        }
    }

    /// Options for the library target of a package (`lib<package>`).
    #[must_use]
    pub fn for_package(package_name: &str) -> Self {
        Self::new(format!("lib{package_name}"))
    }
}

/// Main code generator.
pub struct Generator<'a> {
    ir: &'a SchemaIr,
    options: &'a GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for the given IR.
    #[must_use]
    pub fn new(ir: &'a SchemaIr, options: &'a GeneratorOptions) -> Self {
        Self { ir, options }
    }

    /// Generates the complete Swift source unit.
    ///
    /// # Errors
    /// Returns `CodegenError` if the module name is empty or a declaration
    /// cannot be generated.
    pub fn generate(&self) -> Result<String, CodegenError> {
        if self.options.module_name.trim().is_empty() {
            return Err(CodegenError::generation("module name must not be empty"));
        }

        let mut output = String::new();
        output.push_str(&self.generate_preamble());

        let mut count = 0usize;
        for group in DeclarationGroup::ALL {
            for decl in self.ir.group(group) {
                output.push('\n');
                output.push_str(&generate_declaration(decl));
                count += 1;
            }
        }

        tracing::info!(
            "Generated {} swift declarations importing {}",
            count,
            self.options.module_name
        );

        Ok(output)
    }

    fn generate_preamble(&self) -> String {
        let mut output = String::new();

        output.push_str("import Foundation\n\n");
        output.push_str(&format!("import {}\n\n", self.options.module_name));
        output.push_str("fileprivate func check(_ code: Int32) throws {\n");
        output.push_str("    if code != SQLITE_OK {\n");
        output.push_str("        throw NSError(domain: \"SwiftCQL\", code: Int(code))\n");
        output.push_str("    }\n");
        output.push_str("}\n");

        output
    }
}

/// Generates the block for one declaration: a query wrapper when it has a
/// projection, a procedure wrapper otherwise.
fn generate_declaration(decl: &ResolvedDeclaration) -> String {
    match QueryGenerator::new(decl) {
        Some(query) => query.generate(),
        None => ProcedureGenerator::new(decl).generate(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cqlswift_schema::{ArgType, ArgumentDef, DeclarationDef, Schema};
    use pretty_assertions::assert_eq;

    const PREAMBLE: &str = "import Foundation\n\nimport libTodo\n\nfileprivate func check(_ code: Int32) throws {\n    if code != SQLITE_OK {\n        throw NSError(domain: \"SwiftCQL\", code: Int(code))\n    }\n}\n";

    fn proc_def(name: &str) -> DeclarationDef {
        DeclarationDef {
            name: name.to_string(),
            args: Vec::new(),
            uses_database: false,
            has_out_result: false,
            projection: None,
        }
    }

    #[test]
    fn test_empty_schema_emits_preamble_only() {
        let ir = SchemaIr::from_schema(&Schema::default());
        let options = GeneratorOptions::for_package("Todo");
        let output = Generator::new(&ir, &options).generate().expect("generate");
        assert_eq!(output, PREAMBLE);
    }

    #[test]
    fn test_blocks_separated_by_one_blank_line() {
        let schema = Schema {
            general: vec![proc_def("ping")],
            deletes: vec![proc_def("wipe")],
            ..Schema::default()
        };
        let ir = SchemaIr::from_schema(&schema);
        let options = GeneratorOptions::new("libTodo");
        let output = Generator::new(&ir, &options).generate().expect("generate");

        assert_eq!(
            output,
            format!(
                "{PREAMBLE}\npublic func ping() {{\n    ping()\n}}\n\npublic func wipe() {{\n    wipe()\n}}\n"
            )
        );
        assert!(!output.contains("\n\n\n"));
    }

    #[test]
    fn test_group_order_is_fixed() {
        let mut query = proc_def("q_all");
        query.projection = Some(vec![ArgumentDef::new("x", ArgType::Integer, true)]);
        let schema = Schema {
            general: vec![proc_def("g")],
            inserts: vec![proc_def("i")],
            updates: vec![proc_def("u")],
            deletes: vec![proc_def("d")],
            queries: vec![query],
        };
        let ir = SchemaIr::from_schema(&schema);
        let options = GeneratorOptions::new("libTodo");
        let output = Generator::new(&ir, &options).generate().expect("generate");

        let positions: Vec<usize> = [
            "public func g(",
            "public func i(",
            "public func u(",
            "public func d(",
            "public struct QAll",
        ]
        .iter()
        .map(|needle| output.find(needle).expect("declaration emitted"))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_module_name_is_rejected() {
        let ir = SchemaIr::from_schema(&Schema::default());
        let options = GeneratorOptions::new(" ");
        let result = Generator::new(&ir, &options).generate();
        assert!(matches!(result, Err(CodegenError::Generation { .. })));
    }
}
