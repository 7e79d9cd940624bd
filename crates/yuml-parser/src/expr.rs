//! Expression records produced by the dialect parsers.
//!
//! Each notation line becomes a list of [`Expr`]s: nodes, edges between
//! them and, in sequence diagrams, signals. Records live only as long as the
//! line they were parsed from.

use std::sync::OnceLock;

use regex::Regex;
use yuml_core::{
    color::Fill,
    graph::{ArrowKind, LineStyle},
    sequence::Activation,
};

use crate::span::Span;

static BG_DECORATION: OnceLock<Regex> = OnceLock::new();

fn bg_decoration() -> &'static Regex {
    BG_DECORATION.get_or_init(|| {
        Regex::new(r"^(.*)\{ *bg *: *([a-zA-Z]+\d*|#[0-9a-fA-F]{6}) *\}$")
            .expect("bg decoration regex must compile")
    })
}

/// What a node-like token stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Class, use case, activity, state, deployment node, package or object.
    Record,
    Note,
    /// Use-case actor drawn as a stick figure.
    Actor,
    /// Activity decision `<d>`.
    Decision,
    /// Activity parallel bar `|a|`.
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeExpr {
    pub role: NodeRole,
    pub label: String,
    pub fill: Option<Fill>,
    pub span: Span,
}

impl NodeExpr {
    pub fn is_note(&self) -> bool {
        self.role == NodeRole::Note
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeExpr {
    pub tail: ArrowKind,
    pub head: ArrowKind,
    pub label: Option<String>,
    pub tail_label: Option<String>,
    pub head_label: Option<String>,
    pub line: LineStyle,
    pub span: Span,
}

/// How a sequence message is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    /// `>`
    Solid,
    /// `.>`
    Dashed,
    /// `>>`
    Async,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalExpr {
    pub text: String,
    pub style: MessageStyle,
    /// Marker written before the message, applied to the sender.
    pub source: Option<Activation>,
    /// Marker written after the arrow, applied to the receiver.
    pub target: Option<Activation>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Node(NodeExpr),
    Edge(EdgeExpr),
    Signal(SignalExpr),
}

impl Expr {
    /// Edges and signals connect their neighbours.
    pub fn is_connector(&self) -> bool {
        matches!(self, Expr::Edge(_) | Expr::Signal(_))
    }

    pub fn as_node(&self) -> Option<&NodeExpr> {
        match self {
            Expr::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expr::Node(node) => node.span,
            Expr::Edge(edge) => edge.span,
            Expr::Signal(signal) => signal.span,
        }
    }
}

/// Bracket content with its `{bg:...}` suffix and `note:` prefix removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Decorated {
    pub text: String,
    pub fill: Option<Fill>,
    pub is_note: bool,
}

/// Strips the decorations of a bracket's content.
///
/// A trailing `{bg:<color>}` yields a fill. When `allow_note` is set, a
/// leading `note:` turns the node into a note.
///
/// ```
/// # use yuml_parser::expr::decorate;
/// let decorated = decorate("note: Value Object{bg:wheat}", true);
/// assert!(decorated.is_note);
/// assert_eq!(decorated.text, "Value Object");
/// assert_eq!(decorated.fill.unwrap().color(), "#F5DEB3");
/// ```
pub fn decorate(content: &str, allow_note: bool) -> Decorated {
    let (text, fill) = match bg_decoration().captures(content) {
        Some(captures) => (
            captures.get(1).map_or("", |m| m.as_str()).trim(),
            captures.get(2).map(|m| Fill::from_spec(m.as_str())),
        ),
        None => (content.trim(), None),
    };

    match text.strip_prefix("note:") {
        Some(rest) if allow_note => Decorated {
            text: rest.trim().to_string(),
            fill,
            is_note: true,
        },
        _ => Decorated {
            text: text.to_string(),
            fill,
            is_note: false,
        },
    }
}

/// Non-empty trimmed text, or `None`.
pub(crate) fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
