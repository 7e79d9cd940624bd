//! Compilation loop shared by the graph dialects.

use log::{debug, trace};
use yuml_core::{
    diagram::{DiagramKind, Direction},
    graph::{Edge, Graph, GraphSettings, LineStyle, Node, NodeId, Shape},
};

use crate::{
    dialect::{Artifact, Dialect, SourceLine},
    error::{Diagnostic, ErrorCode, Result},
    expr::{EdgeExpr, Expr, NodeExpr, NodeRole, decorate},
    label::format_label,
    lexer::{Token, tokenize},
    span::Span,
    uid::UidRegistry,
};

/// Per-dialect rules of a diagram compiled into a [`Graph`].
pub trait GraphDialect: Sync {
    const KIND: DiagramKind;
    /// Characters opening a bracketed token.
    const OPENERS: &'static str;
    const RANKSEP: f32;

    fn parse_token(&self, token: &Token<'_>) -> Result<Expr>;

    /// Builds the node for a newly seen record name.
    fn node(&self, id: NodeId, expr: &NodeExpr, direction: Direction) -> Node;

    /// Adjusts an edge connecting two nodes of a line.
    fn style_edge(&self, _edge: &mut Edge, _from: &NodeExpr, _to: &NodeExpr) {}

    fn compile_line(&self, compiler: &mut GraphCompiler, exprs: &[Expr]) {
        compiler.declare_nodes(exprs, |id, expr, direction| self.node(id, expr, direction));
        for (from, edge, to) in sandwiched(exprs) {
            if let Some(mut out) = compiler.connect(from, edge, to) {
                self.style_edge(&mut out, from, to);
                compiler.add_edge(out);
            }
        }
    }
}

impl<T: GraphDialect> Dialect for T {
    fn kind(&self) -> DiagramKind {
        T::KIND
    }

    fn parse_line(&self, line: &str, offset: usize) -> Result<Vec<Expr>> {
        tokenize(line, T::OPENERS, offset)
            .iter()
            .map(|token| self.parse_token(token))
            .collect()
    }

    fn compile(&self, lines: &[SourceLine<'_>], direction: Direction) -> Result<Artifact> {
        let mut compiler = GraphCompiler::new(T::RANKSEP, direction);
        for line in lines {
            let exprs = self.parse_line(line.text, line.offset)?;
            trace!(exprs:?; "Parsed line");
            self.compile_line(&mut compiler, &exprs);
        }
        let graph = compiler.finish();
        debug!(
            kind = T::KIND.as_str(),
            nodes = graph.nodes().count(),
            edges = graph.edges().count();
            "Compiled graph"
        );
        Ok(Artifact::Graph(graph))
    }
}

/// State of one graph compilation: the identity registry and the graph
/// being built.
pub struct GraphCompiler {
    uids: UidRegistry,
    graph: Graph,
    direction: Direction,
}

impl GraphCompiler {
    pub fn new(ranksep: f32, direction: Direction) -> Self {
        Self {
            uids: UidRegistry::new(),
            graph: Graph::new(GraphSettings {
                ranksep,
                rankdir: direction,
            }),
            direction,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Adds a node for every node record whose record name is new.
    pub fn declare_nodes(
        &mut self,
        exprs: &[Expr],
        mut build: impl FnMut(NodeId, &NodeExpr, Direction) -> Node,
    ) {
        for expr in exprs.iter().filter_map(Expr::as_node) {
            if let Some(id) = self.uids.create(&expr.label) {
                let node = build(id, expr, self.direction);
                self.graph.add_node(node);
            }
        }
    }

    pub fn id(&self, expr: &NodeExpr) -> Option<NodeId> {
        self.uids.get(&expr.label)
    }

    /// Builds the edge between two declared nodes. Edges touching a note are
    /// dashed whatever their declared style.
    pub fn connect(&self, from: &NodeExpr, edge: &EdgeExpr, to: &NodeExpr) -> Option<Edge> {
        let mut out = Edge::new(self.id(from)?, self.id(to)?);
        out.tail = edge.tail;
        out.head = edge.head;
        out.label = edge.label.clone();
        out.tail_label = edge.tail_label.clone();
        out.head_label = edge.head_label.clone();
        out.line = if from.is_note() || to.is_note() {
            LineStyle::Dashed
        } else {
            edge.line
        };
        out.font_size = Some(10.0);
        Some(out)
    }

    pub fn add_node(&mut self, node: Node) {
        self.graph.add_node(node);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.graph.add_edge(edge);
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.graph.node_mut(id)
    }

    pub fn finish(self) -> Graph {
        self.graph
    }
}

/// Edges whose neighbours on both sides are nodes.
pub fn sandwiched(exprs: &[Expr]) -> impl Iterator<Item = (&NodeExpr, &EdgeExpr, &NodeExpr)> {
    exprs.windows(3).filter_map(|window| match window {
        [Expr::Node(from), Expr::Edge(edge), Expr::Node(to)] => Some((from, edge, to)),
        _ => None,
    })
}

/// A record, or a note when `content` starts with `note:`.
pub fn record_or_note(content: &str, span: Span) -> Expr {
    let decorated = decorate(content, true);
    let role = if decorated.is_note {
        NodeRole::Note
    } else {
        NodeRole::Record
    };
    Expr::Node(NodeExpr {
        role,
        label: decorated.text,
        fill: decorated.fill,
        span,
    })
}

/// A node with the common size hints: height 0.5, font size 10 and a
/// `0.20,0.05` margin.
pub fn boxed_node(id: NodeId, shape: Shape, label: impl Into<String>) -> Node {
    Node::new(id, shape, label)
        .with_height(0.5)
        .with_font_size(10.0)
        .with_margin(0.2, 0.05)
}

/// Formats a label whose `|` fields become record compartments. Top-down
/// layouts need the fields wrapped in braces to stack them vertically.
pub fn record_label(label: &str, direction: Direction) -> String {
    let formatted = format_label(label, 20, true);
    if direction.is_vertical() && formatted.contains('|') {
        format!("{{{formatted}}}")
    } else {
        formatted
    }
}

/// The error for a token no rule of `kind` accepts.
pub fn unrecognized(token: &Token<'_>, kind: DiagramKind, help: &str) -> Diagnostic {
    Diagnostic::error(format!("unrecognized token `{}`", token.text()))
        .with_code(ErrorCode::E100)
        .with_label(token.span(), format!("not valid in a {kind} diagram"))
        .with_help(help.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(label: &str, role: NodeRole) -> Expr {
        Expr::Node(NodeExpr {
            role,
            label: label.to_string(),
            fill: None,
            span: Span::default(),
        })
    }

    fn edge() -> Expr {
        Expr::Edge(EdgeExpr::default())
    }

    #[test]
    fn test_sandwiched_skips_adjacent_connectors() {
        let exprs = vec![
            node("A", NodeRole::Record),
            edge(),
            edge(),
            node("B", NodeRole::Record),
            edge(),
            node("C", NodeRole::Record),
        ];
        let pairs: Vec<_> = sandwiched(&exprs)
            .map(|(from, _, to)| (from.label.as_str(), to.label.as_str()))
            .collect();
        assert_eq!(pairs, vec![("B", "C")]);
    }

    #[test]
    fn test_connect_dashes_note_edges() {
        let mut compiler = GraphCompiler::new(0.5, Direction::TopDown);
        let exprs = vec![node("A", NodeRole::Record), edge(), node("hi", NodeRole::Note)];
        compiler.declare_nodes(&exprs, |id, expr, _| boxed_node(id, Shape::Rectangle, &expr.label));

        let (from, edge, to) = sandwiched(&exprs).next().unwrap();
        let out = compiler.connect(from, edge, to).unwrap();
        assert_eq!(out.line, LineStyle::Dashed);
        assert_eq!(out.target().node().as_str(), "A1");
    }

    #[test]
    fn test_declare_nodes_keeps_first_label() {
        let mut compiler = GraphCompiler::new(0.5, Direction::TopDown);
        let exprs = vec![node("A|x", NodeRole::Record), node("A|y", NodeRole::Record)];
        compiler.declare_nodes(&exprs, |id, expr, _| boxed_node(id, Shape::Record, &expr.label));

        let graph = compiler.finish();
        assert_eq!(graph.nodes().count(), 1);
        assert_eq!(graph.nodes().next().unwrap().label(), "A|x");
    }

    #[test]
    fn test_record_or_note() {
        let Expr::Node(note) = record_or_note("note: hi{bg:red}", Span::new(4..20)) else {
            panic!("expected a node");
        };
        assert!(note.is_note());
        assert_eq!(note.label, "hi");
        assert!(note.fill.is_some());
        assert_eq!(note.span.range(), 4..20);
    }

    #[test]
    fn test_record_label_braces_only_top_down() {
        assert_eq!(record_label("A|b", Direction::TopDown), "{A|b}");
        assert_eq!(record_label("A|b", Direction::LeftToRight), "A|b");
        assert_eq!(record_label("A b", Direction::TopDown), "A\\ b");
    }
}
