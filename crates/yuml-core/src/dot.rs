//! Serialization of a [`Graph`] into a Graphviz DOT document.
//!
//! The document header sets `fontname=Helvetica` on graphs, nodes and edges,
//! gives nodes `shape=none, margin=0` defaults, applies the dark palette when
//! requested and finally merges the caller's [`HeaderOverrides`]. Later
//! entries replace earlier ones for the same attribute.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::graph::{Edge, Graph, Node, NodeStyle, Shape, Statement};

const DEFAULT_FONT: &str = "Helvetica";

/// Extra attributes for the `graph`, `node` and `edge` header statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderOverrides {
    pub graph: IndexMap<String, String>,
    pub node: IndexMap<String, String>,
    pub edge: IndexMap<String, String>,
}

/// Writes graphs as DOT documents.
#[derive(Debug, Clone, Default)]
pub struct DotWriter {
    dark: bool,
    overrides: HeaderOverrides,
}

impl DotWriter {
    pub fn new(dark: bool, overrides: HeaderOverrides) -> Self {
        Self { dark, overrides }
    }

    /// Serializes `graph` into a complete `digraph G { ... }` document.
    pub fn write(&self, graph: &Graph) -> String {
        let mut out = String::new();
        self.write_document(&mut out, graph)
            .expect("Writing to String buffer is infallible");
        debug!(bytes = out.len(), dark = self.dark; "DOT document written");
        out
    }

    fn write_document(&self, out: &mut impl fmt::Write, graph: &Graph) -> fmt::Result {
        writeln!(out, "digraph G {{")?;

        for (name, attrs) in self.header() {
            writeln!(out, "    {name} [{}]", join_attrs(&attrs))?;
        }

        let settings = graph.settings();
        writeln!(out, "    ranksep={}", settings.ranksep)?;
        writeln!(out, "    rankdir={}", settings.rankdir.rankdir())?;

        for statement in graph.statements() {
            match statement {
                Statement::Node(node) => {
                    writeln!(out, "    {} [{}]", node.id(), join_attrs(&node_attrs(node)))?;
                }
                Statement::Edge(edge) => {
                    let body = format!(
                        "{} -> {} [{}]",
                        edge.source(),
                        edge.target(),
                        join_attrs(&edge_attrs(edge))
                    );
                    if edge.same_rank {
                        writeln!(out, "    {{ rank=same; {body}; }}")?;
                    } else {
                        writeln!(out, "    {body}")?;
                    }
                }
            }
        }

        writeln!(out, "}}")
    }

    fn header(&self) -> [(&'static str, IndexMap<String, String>); 3] {
        let mut graph = base_attrs(&[]);
        let mut node = base_attrs(&[("shape", "none"), ("margin", "0")]);
        let mut edge = base_attrs(&[]);

        if self.dark {
            graph.insert("bgcolor".to_string(), "transparent".to_string());
            for attrs in [&mut node, &mut edge] {
                attrs.insert("color".to_string(), "white".to_string());
                attrs.insert("fontcolor".to_string(), "white".to_string());
            }
        }

        graph.extend(self.overrides.graph.clone());
        node.extend(self.overrides.node.clone());
        edge.extend(self.overrides.edge.clone());

        [("graph", graph), ("node", node), ("edge", edge)]
    }
}

fn base_attrs(defaults: &[(&str, &str)]) -> IndexMap<String, String> {
    let mut attrs = IndexMap::new();
    attrs.insert("fontname".to_string(), DEFAULT_FONT.to_string());
    for (key, value) in defaults {
        attrs.insert((*key).to_string(), (*value).to_string());
    }
    attrs
}

/// Record shapes are only kept where fields or ports need them; anything
/// else is drawn as a plain rectangle.
fn effective_shape(node: &Node) -> Shape {
    match node.shape() {
        Shape::Record if !node.label().contains('|') && !node.label().starts_with('<') => {
            Shape::Rectangle
        }
        shape => shape,
    }
}

fn node_attrs(node: &Node) -> IndexMap<String, String> {
    let mut attrs = IndexMap::new();
    attrs.insert("shape".to_string(), quote(effective_shape(node).as_str()));
    if let Some(height) = node.height() {
        attrs.insert("height".to_string(), height.to_string());
    }
    if let Some(width) = node.width() {
        attrs.insert("width".to_string(), width.to_string());
    }
    if let Some((x, y)) = node.margin() {
        attrs.insert("margin".to_string(), quote(&format!("{x},{y}")));
    }
    if let Some(size) = node.font_size() {
        attrs.insert("fontsize".to_string(), size.to_string());
    }
    if !node.styles().is_empty() {
        let style: Vec<&str> = node.styles().iter().map(|s| NodeStyle::as_str(*s)).collect();
        attrs.insert("style".to_string(), quote(&style.join(",")));
    }
    if let Some(fill) = node.fill() {
        attrs.insert("fillcolor".to_string(), quote(fill.color()));
        if let Some(text) = fill.text_color() {
            attrs.insert("fontcolor".to_string(), quote(text.as_str()));
        }
    }
    if let Some(width) = node.pen_width() {
        attrs.insert("penwidth".to_string(), width.to_string());
    }
    attrs.insert("label".to_string(), quote(node.label()));
    attrs
}

fn edge_attrs(edge: &Edge) -> IndexMap<String, String> {
    let mut attrs = IndexMap::new();
    attrs.insert("dir".to_string(), quote("both"));
    attrs.insert("style".to_string(), quote(edge.line.as_str()));
    attrs.insert("arrowtail".to_string(), quote(edge.tail.as_str()));
    attrs.insert("arrowhead".to_string(), quote(edge.head.as_str()));

    let labels = [
        ("label", &edge.label),
        ("taillabel", &edge.tail_label),
        ("headlabel", &edge.head_label),
    ];
    for (key, value) in labels {
        if let Some(text) = value.as_deref().filter(|t| !t.is_empty()) {
            attrs.insert(key.to_string(), quote(text));
        }
    }

    if let Some(distance) = edge.label_distance {
        attrs.insert("labeldistance".to_string(), distance.to_string());
    }
    if let Some(size) = edge.font_size {
        attrs.insert("fontsize".to_string(), size.to_string());
    }
    attrs
}

fn join_attrs(attrs: &IndexMap<String, String>) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Quotes a DOT string value. Backslash sequences are kept as they are since
/// record labels rely on them; a trailing unpaired backslash is doubled so
/// that it cannot escape the closing quote.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 3);
    quoted.push('"');
    let mut escaped = false;
    for c in value.chars() {
        if c == '"' && !escaped {
            quoted.push('\\');
        }
        escaped = c == '\\' && !escaped;
        quoted.push(c);
    }
    if escaped {
        quoted.push('\\');
    }
    quoted.push('"');
    quoted
}
