//! Small syntax tree for generated Swift functions.
//!
//! Procedure wrappers are built as a [`ProcSyntax`] and rendered once, so the
//! query generator can derive its fetching initializer by editing the tree
//! instead of re-parsing rendered text.

/// Indentation unit of the generated code.
pub const INDENT: &str = "    ";

/// Function header kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcHeader {
    /// `public func <name>(...)`
    Function {
        /// Swift function name.
        name: String,
    },
    /// `public init(...)`, or `public init?(...)` when failable.
    Init {
        /// Whether the initializer can produce nil.
        failable: bool,
    },
}

/// The single call into the C layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStmt {
    /// C function name.
    pub callee: String,
    /// Argument expressions in order.
    pub args: Vec<String>,
    /// Whether the result code is passed through `check`.
    pub checked: bool,
}

impl CallStmt {
    /// Renders the call statement without indentation.
    #[must_use]
    pub fn render(&self) -> String {
        let call = format!("{}({})", self.callee, self.args.join(", "));
        if self.checked {
            format!("try check({call})")
        } else {
            call
        }
    }
}

/// A generated function: header, setup statements, one C call, trailing
/// statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcSyntax {
    /// Header kind.
    pub header: ProcHeader,
    /// Parameter declarations.
    pub params: Vec<String>,
    /// Whether the function is marked `throws`.
    pub throws: bool,
    /// Statements before the call.
    pub setup: Vec<String>,
    /// The C call.
    pub call: CallStmt,
    /// Statements after the call.
    pub finish: Vec<String>,
}

impl ProcSyntax {
    /// Renders the function at indentation level zero, ending with a newline.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::new();

        let head = match &self.header {
            ProcHeader::Function { name } => format!("public func {name}"),
            ProcHeader::Init { failable: true } => "public init?".to_string(),
            ProcHeader::Init { failable: false } => "public init".to_string(),
        };
        let throws = if self.throws { "throws " } else { "" };
        output.push_str(&format!("{head}({}) {throws}{{\n", self.params.join(", ")));

        for stmt in &self.setup {
            output.push_str(&format!("{INDENT}{stmt}\n"));
        }
        output.push_str(&format!("{INDENT}{}\n", self.call.render()));
        for stmt in &self.finish {
            output.push_str(&format!("{INDENT}{stmt}\n"));
        }

        output.push_str("}\n");
        output
    }
}

/// Indents every non-empty line of `text` by `levels` indentation units.
#[must_use]
pub fn indent(text: &str, levels: usize) -> String {
    let prefix = INDENT.repeat(levels);
    let mut output = String::with_capacity(text.len() + text.len() / 4);

    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            output.push_str(&prefix);
        }
        output.push_str(line);
    }

    output
}
