//! The seven yUML dialects.
//!
//! Every dialect turns a notation line into [`Expr`] records and folds the
//! records of all lines into an [`Artifact`]. Graph dialects share their
//! compilation loop; the sequence dialect builds a [`SequenceModel`] instead.

mod activity;
mod class;
mod deployment;
mod graph;
mod package;
mod sequence;
mod state;
mod usecase;

use yuml_core::{
    diagram::{DiagramKind, Direction},
    graph::Graph,
    sequence::SequenceModel,
};

use crate::{error::Diagnostic, expr::Expr};

pub use activity::ActivityDialect;
pub use class::ClassDialect;
pub use deployment::DeploymentDialect;
pub use package::PackageDialect;
pub use sequence::SequenceDialect;
pub use state::StateDialect;
pub use usecase::UsecaseDialect;

/// A trimmed instruction line and its byte offset in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub text: &'a str,
    pub offset: usize,
}

/// What a document compiles into.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    /// The document had no instructions.
    Empty,
    /// A graph for the layout engine.
    Graph(Graph),
    /// A sequence diagram, drawn without the layout engine.
    Sequence(SequenceModel),
}

pub trait Dialect: Sync {
    fn kind(&self) -> DiagramKind;

    /// Parses one instruction line into expression records.
    ///
    /// A token matching none of the dialect's rules fails the line.
    fn parse_line(&self, line: &str, offset: usize) -> Result<Vec<Expr>, Diagnostic>;

    /// Compiles all instruction lines of a document.
    fn compile(
        &self,
        lines: &[SourceLine<'_>],
        direction: Direction,
    ) -> Result<Artifact, Diagnostic>;
}

/// Returns the dialect implementing `kind`.
pub fn dialect_for(kind: DiagramKind) -> &'static dyn Dialect {
    match kind {
        DiagramKind::Class => &ClassDialect,
        DiagramKind::Usecase => &UsecaseDialect,
        DiagramKind::Activity => &ActivityDialect,
        DiagramKind::State => &StateDialect,
        DiagramKind::Deployment => &DeploymentDialect,
        DiagramKind::Package => &PackageDialect,
        DiagramKind::Sequence => &SequenceDialect,
    }
}
