//! # yUML Parser
//!
//! Parser and compiler for the yUML diagram notation. A document is a list
//! of lines in one of seven dialects (class, use case, activity, state,
//! deployment, package and sequence), optionally preceded by directives
//! such as `// {type:activity}`.
//!
//! ## Usage
//!
//! ```
//! # use yuml_parser::{compile, CompileOptions, ParseError, dialect::Artifact};
//! fn main() -> Result<(), ParseError> {
//!     let source = "// {type:class}\n[Customer]<>1-*>[Order]";
//!     let compilation = compile(source, &CompileOptions::default())?;
//!
//!     let Artifact::Graph(graph) = compilation.artifact else {
//!         unreachable!("class diagrams compile into graphs");
//!     };
//!     assert_eq!(graph.nodes().count(), 2);
//!     Ok(())
//! }
//! ```

pub mod dialect;
mod document;
pub mod error;
pub mod expr;
pub mod label;
pub mod lexer;
mod span;
pub mod uid;

pub use error::ParseError;
pub use span::Span;

use log::info;
use yuml_core::diagram::{DiagramKind, Direction};

use dialect::{Artifact, dialect_for};
use document::Document;
use error::{Diagnostic, DiagnosticCollector, ErrorCode};

/// Settings a document starts from, before its directives are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Diagram kind; `None` requires a `// {type:...}` directive.
    pub kind: Option<DiagramKind>,
    pub direction: Direction,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            kind: Some(DiagramKind::Class),
            direction: Direction::TopDown,
        }
    }
}

/// A successfully compiled document.
#[derive(Debug)]
pub struct Compilation {
    /// Effective kind; `None` only for an empty document.
    pub kind: Option<DiagramKind>,
    pub direction: Direction,
    pub artifact: Artifact,
    /// Directive warnings, in document order.
    pub warnings: Vec<Diagnostic>,
}

/// Compiles a yUML document.
///
/// Lines are split on `\r` and `\n` and trimmed. Lines starting with `//`
/// are directives or comments, all other non-empty lines are instructions.
/// A document without instructions compiles into [`Artifact::Empty`].
///
/// # Errors
///
/// Returns a [`ParseError`] when no diagram kind is known or when a line
/// contains a token its dialect does not accept. Directive warnings
/// collected before the failure are carried along.
pub fn compile(source: &str, options: &CompileOptions) -> Result<Compilation, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let document = Document::scan(source, options.kind, options.direction, &mut collector);

    info!(
        kind:? = document.kind,
        direction = document.direction.rankdir(),
        lines = document.lines.len();
        "Compiling document"
    );

    if document.lines.is_empty() {
        return Ok(Compilation {
            kind: document.kind,
            direction: document.direction,
            artifact: Artifact::Empty,
            warnings: collector.finish(),
        });
    }

    let Some(kind) = document.kind else {
        return Err(collector.fail(
            Diagnostic::error("missing diagram type")
                .with_code(ErrorCode::E200)
                .with_help("add a directive such as `// {type:class}` or pass a diagram type"),
        ));
    };

    match dialect_for(kind).compile(&document.lines, document.direction) {
        Ok(artifact) => Ok(Compilation {
            kind: Some(kind),
            direction: document.direction,
            artifact,
            warnings: collector.finish(),
        }),
        Err(diagnostic) => Err(collector.fail(diagnostic)),
    }
}
