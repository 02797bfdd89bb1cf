//! Derivation of a query's fetching initializer from its procedure wrapper.
//!
//! The query wrapper's initializer is the plain procedure wrapper of the same
//! declaration (projection stripped) with five edits applied:
//!
//! 1. `func <name>` becomes `init?` (single result) or `init` (collection);
//!    `throws` is kept as is.
//! 2. `var result_set_ref: Unmanaged<<name>_result_set_ref>?` is declared
//!    right before the call.
//! 3. The callee becomes `<name>_fetch_results` and `&result_set_ref` is
//!    spliced in as the first argument after `db`, or first overall when the
//!    procedure does not use the database.
//! 4. The result set is wrapped into `result_set`, then the fetched
//!    reference is released, leaving the wrapper holding the only retain.
//! 5. Single result only: return nil when the row is absent.

use crate::swift::syntax::{ProcHeader, ProcSyntax};
use cqlswift_schema::{QueryShape, ResolvedDeclaration};

/// Local holding the fetched result-set reference.
pub const RESULT_SET_REF: &str = "result_set_ref";

/// Prefix of the Objective-C result-set layer.
pub const OBJC_PREFIX: &str = "CGS_";

/// Applies the fetch edits to the procedure wrapper of `decl`.
#[must_use]
pub fn derive_fetch_init(
    mut proc: ProcSyntax,
    decl: &ResolvedDeclaration,
    shape: QueryShape,
) -> ProcSyntax {
    let name = &decl.name;

    proc.header = ProcHeader::Init {
        failable: shape.is_single(),
    };

    proc.setup.push(format!(
        "var {RESULT_SET_REF}: Unmanaged<{}>?",
        decl.result_set_ref_name()
    ));

    proc.call.callee = decl.fetch_results_name();
    let splice_at = if decl.uses_database { 1 } else { 0 };
    proc.call.args.insert(splice_at, format!("&{RESULT_SET_REF}"));

    proc.finish.push(format!(
        "result_set = {OBJC_PREFIX}{name}_from_{name}({RESULT_SET_REF}!.takeUnretainedValue())"
    ));
    proc.finish.push(format!(
        "cql_release({RESULT_SET_REF}!.takeUnretainedValue())"
    ));

    if shape.is_single() {
        proc.finish.push(format!(
            "if {OBJC_PREFIX}{name}_get_value(result_set) == 0 {{ return nil }}"
        ));
    }

    proc
}
