//! Graph model produced by the diagram compilers.
//!
//! A [`Graph`] is an ordered list of node and edge statements plus the
//! graph-wide layout settings. Statement order is the order in which the
//! compiler emitted them and is preserved by the DOT writer.

use std::{collections::HashMap, fmt};

use crate::{color::Fill, diagram::Direction};

/// Identifier of a node within one compiled graph (`A0`, `A1`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the id of the junction node joining `self` and `other`.
    pub fn junction(&self, other: &NodeId) -> Self {
        Self(format!("{}J{}", self.0, other.0))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Graphviz node shapes used by the yUML dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Record,
    Rectangle,
    Ellipse,
    Note,
    Diamond,
    Box3d,
    Tab,
    Circle,
    DoubleCircle,
    Point,
    None,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Record => "record",
            Shape::Rectangle => "rectangle",
            Shape::Ellipse => "ellipse",
            Shape::Note => "note",
            Shape::Diamond => "diamond",
            Shape::Box3d => "box3d",
            Shape::Tab => "tab",
            Shape::Circle => "circle",
            Shape::DoubleCircle => "doublecircle",
            Shape::Point => "point",
            Shape::None => "none",
        }
    }
}

/// Style flags combined into the node `style` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeStyle {
    Rounded,
    Filled,
    Invisible,
}

impl NodeStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeStyle::Rounded => "rounded",
            NodeStyle::Filled => "filled",
            NodeStyle::Invisible => "invis",
        }
    }
}

/// A node statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    shape: Shape,
    label: String,
    height: Option<f32>,
    width: Option<f32>,
    margin: Option<(f32, f32)>,
    font_size: Option<f32>,
    styles: Vec<NodeStyle>,
    fill: Option<Fill>,
    pen_width: Option<f32>,
}

impl Node {
    /// Creates a node with the given shape and an already formatted label.
    pub fn new(id: NodeId, shape: Shape, label: impl Into<String>) -> Self {
        Self {
            id,
            shape,
            label: label.into(),
            height: None,
            width: None,
            margin: None,
            font_size: None,
            styles: Vec::new(),
            fill: None,
            pen_width: None,
        }
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_margin(mut self, horizontal: f32, vertical: f32) -> Self {
        self.margin = Some((horizontal, vertical));
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        if !self.styles.contains(&style) {
            self.styles.push(style);
        }
        self
    }

    pub fn with_pen_width(mut self, width: f32) -> Self {
        self.pen_width = Some(width);
        self
    }

    /// Applies a background fill; the node becomes `filled`.
    pub fn with_fill(mut self, fill: Option<Fill>) -> Self {
        if let Some(fill) = fill {
            self = self.with_style(NodeStyle::Filled);
            self.fill = Some(fill);
        }
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn height(&self) -> Option<f32> {
        self.height
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn margin(&self) -> Option<(f32, f32)> {
        self.margin
    }

    pub fn font_size(&self) -> Option<f32> {
        self.font_size
    }

    pub fn styles(&self) -> &[NodeStyle] {
        &self.styles
    }

    pub fn fill(&self) -> Option<&Fill> {
        self.fill.as_ref()
    }

    pub fn pen_width(&self) -> Option<f32> {
        self.pen_width
    }

    /// Appends a port field to a record label and returns its name.
    ///
    /// The first port replaces an empty label with `<f1>`; later ones are
    /// appended as `|<fN>` where `N` is the new field count.
    pub fn add_port(&mut self) -> String {
        let number = if self.label.is_empty() {
            1
        } else {
            self.label.split('|').count() + 1
        };
        let port = format!("f{number}");
        if self.label.is_empty() {
            self.label = format!("<{port}>");
        } else {
            self.label.push_str(&format!("|<{port}>"));
        }
        port
    }
}

/// Arrow shapes at either end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArrowKind {
    #[default]
    None,
    Vee,
    Empty,
    Diamond,
    ODiamond,
}

impl ArrowKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArrowKind::None => "none",
            ArrowKind::Vee => "vee",
            ArrowKind::Empty => "empty",
            ArrowKind::Diamond => "diamond",
            ArrowKind::ODiamond => "odiamond",
        }
    }
}

/// Line style of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

impl LineStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
        }
    }
}

/// One end of an edge: a node, optionally narrowed to a record port and a
/// compass point (`A3:f2:n`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    node: NodeId,
    port: Option<String>,
    compass: Option<&'static str>,
}

impl Endpoint {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            port: None,
            compass: None,
        }
    }

    pub fn with_port(mut self, port: String, compass: &'static str) -> Self {
        self.port = Some(port);
        self.compass = Some(compass);
        self
    }

    pub fn node(&self) -> &NodeId {
        &self.node
    }

    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    pub fn compass(&self) -> Option<&str> {
        self.compass
    }
}

impl From<NodeId> for Endpoint {
    fn from(node: NodeId) -> Self {
        Self::new(node)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)?;
        if let Some(port) = &self.port {
            write!(f, ":{port}")?;
        }
        if let Some(compass) = self.compass {
            write!(f, ":{compass}")?;
        }
        Ok(())
    }
}

/// An edge statement. Edges are always drawn with `dir=both` so that both
/// arrow kinds are honored.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: Endpoint,
    target: Endpoint,
    pub tail: ArrowKind,
    pub head: ArrowKind,
    pub label: Option<String>,
    pub tail_label: Option<String>,
    pub head_label: Option<String>,
    pub line: LineStyle,
    pub label_distance: Option<f32>,
    pub font_size: Option<f32>,
    pub same_rank: bool,
}

impl Edge {
    pub fn new(source: impl Into<Endpoint>, target: impl Into<Endpoint>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            tail: ArrowKind::None,
            head: ArrowKind::None,
            label: None,
            tail_label: None,
            head_label: None,
            line: LineStyle::Solid,
            label_distance: None,
            font_size: None,
            same_rank: false,
        }
    }

    pub fn source(&self) -> &Endpoint {
        &self.source
    }

    pub fn target(&self) -> &Endpoint {
        &self.target
    }

    /// Redirects the edge to another endpoint, e.g. a port of the same node.
    pub fn with_target(mut self, target: Endpoint) -> Self {
        self.target = target;
        self
    }
}

/// Graph-wide layout settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphSettings {
    pub ranksep: f32,
    pub rankdir: Direction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Node(Node),
    Edge(Edge),
}

/// A compiled graph diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    settings: GraphSettings,
    statements: Vec<Statement>,
    index: HashMap<NodeId, usize>,
}

impl Graph {
    pub fn new(settings: GraphSettings) -> Self {
        Self {
            settings,
            statements: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Adds a node. A node whose id is already present is ignored.
    pub fn add_node(&mut self, node: Node) {
        if self.index.contains_key(node.id()) {
            return;
        }
        self.index.insert(node.id().clone(), self.statements.len());
        self.statements.push(Statement::Node(node));
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.statements.push(Statement::Edge(edge));
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        match self.statements.get(*self.index.get(id)?) {
            Some(Statement::Node(node)) => Some(node),
            _ => None,
        }
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        match self.statements.get_mut(*self.index.get(id)?) {
            Some(Statement::Node(node)) => Some(node),
            _ => None,
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.statements.iter().filter_map(|statement| match statement {
            Statement::Node(node) => Some(node),
            Statement::Edge(_) => None,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.statements.iter().filter_map(|statement| match statement {
            Statement::Edge(edge) => Some(edge),
            Statement::Node(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GraphSettings {
        GraphSettings {
            ranksep: 0.5,
            rankdir: Direction::TopDown,
        }
    }

    #[test]
    fn test_add_port_numbering() {
        let mut bar = Node::new(NodeId::new("A0"), Shape::Record, "");
        assert_eq!(bar.add_port(), "f1");
        assert_eq!(bar.label(), "<f1>");
        assert_eq!(bar.add_port(), "f2");
        assert_eq!(bar.add_port(), "f3");
        assert_eq!(bar.label(), "<f1>|<f2>|<f3>");
    }

    #[test]
    fn test_endpoint_display() {
        let plain = Endpoint::new(NodeId::new("A1"));
        assert_eq!(plain.to_string(), "A1");

        let port = Endpoint::new(NodeId::new("A1")).with_port("f2".to_string(), "n");
        assert_eq!(port.to_string(), "A1:f2:n");
    }

    #[test]
    fn test_junction_id() {
        let a = NodeId::new("A0");
        let b = NodeId::new("A1");
        assert_eq!(a.junction(&b).as_str(), "A0JA1");
    }

    #[test]
    fn test_graph_keeps_first_node() {
        let mut graph = Graph::new(settings());
        graph.add_node(Node::new(NodeId::new("A0"), Shape::Record, "first"));
        graph.add_node(Node::new(NodeId::new("A0"), Shape::Record, "second"));

        assert_eq!(graph.nodes().count(), 1);
        assert_eq!(graph.node(&NodeId::new("A0")).unwrap().label(), "first");
    }

    #[test]
    fn test_graph_preserves_statement_order() {
        let mut graph = Graph::new(settings());
        graph.add_node(Node::new(NodeId::new("A0"), Shape::Record, "a"));
        graph.add_node(Node::new(NodeId::new("A1"), Shape::Record, "b"));
        graph.add_edge(Edge::new(NodeId::new("A0"), NodeId::new("A1")));
        graph.add_node(Node::new(NodeId::new("A2"), Shape::Record, "c"));

        let kinds: Vec<bool> = graph
            .statements()
            .iter()
            .map(|s| matches!(s, Statement::Node(_)))
            .collect();
        assert_eq!(kinds, vec![true, true, false, true]);
        assert_eq!(graph.edges().count(), 1);
    }

    #[test]
    fn test_node_mut_updates_in_place() {
        let mut graph = Graph::new(settings());
        let id = NodeId::new("A0");
        graph.add_node(Node::new(id.clone(), Shape::Record, ""));
        graph.node_mut(&id).unwrap().add_port();
        assert_eq!(graph.node(&id).unwrap().label(), "<f1>");
    }

    #[test]
    fn test_with_fill_sets_filled_style_once() {
        let node = Node::new(NodeId::new("A0"), Shape::Record, "x")
            .with_style(NodeStyle::Filled)
            .with_fill(Some(Fill::from_spec("red")));
        assert_eq!(node.styles(), &[NodeStyle::Filled]);
        assert_eq!(node.fill().unwrap().color(), "#FF0000");
    }
}
