//! Activity diagrams.
//!
//! ```text
//! (start)-><d1>logged in->(Show Dashboard)
//! <d1>not logged in->(Show Login Page)
//! (Action1)->|a|,(Action 2)->|a|
//! (Action1)-(note: A note message here)
//! ```

use yuml_core::{
    diagram::{DiagramKind, Direction},
    graph::{ArrowKind, Edge, Endpoint, Node, NodeId, NodeStyle, Shape},
};

use crate::{
    dialect::graph::{
        GraphCompiler, GraphDialect, boxed_node, record_or_note, sandwiched, unrecognized,
    },
    error::Result,
    expr::{EdgeExpr, Expr, NodeExpr, NodeRole, non_empty},
    label::escape_label,
    lexer::{Token, strip_unescaped_suffix},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityDialect;

impl GraphDialect for ActivityDialect {
    const KIND: DiagramKind = DiagramKind::Activity;
    const OPENERS: &'static str = "(<|";
    const RANKSEP: f32 = 0.5;

    fn parse_token(&self, token: &Token<'_>) -> Result<Expr> {
        let span = token.span();
        let text = token.text();

        let marker = |role, content: &str| {
            Expr::Node(NodeExpr {
                role,
                label: content.trim().to_string(),
                fill: None,
                span,
            })
        };

        if let Some(content) = token.enclosed('(', ')') {
            return Ok(record_or_note(content, span));
        }
        if let Some(content) = token.enclosed('<', '>') {
            return Ok(marker(NodeRole::Decision, content));
        }
        if let Some(content) = token.enclosed('|', '|') {
            return Ok(marker(NodeRole::Bar, content));
        }
        if let Some(label) = strip_unescaped_suffix(text, "->") {
            return Ok(Expr::Edge(EdgeExpr {
                head: ArrowKind::Vee,
                label: non_empty(label),
                span,
                ..EdgeExpr::default()
            }));
        }
        if text == "-" {
            return Ok(Expr::Edge(EdgeExpr {
                span,
                ..EdgeExpr::default()
            }));
        }
        Err(unrecognized(
            token,
            Self::KIND,
            "expected `(activity)`, `<decision>`, `|bar|`, `label->` or `-`",
        ))
    }

    fn node(&self, id: NodeId, expr: &NodeExpr, direction: Direction) -> Node {
        match expr.role {
            NodeRole::Record if expr.label == "start" || expr.label == "end" => {
                let shape = if expr.label == "start" {
                    Shape::Circle
                } else {
                    Shape::DoubleCircle
                };
                Node::new(id, shape, "")
                    .with_height(0.3)
                    .with_width(0.3)
                    .with_margin(0.0, 0.0)
            }
            NodeRole::Decision => Node::new(id, Shape::Diamond, "")
                .with_height(0.5)
                .with_width(0.5)
                .with_margin(0.0, 0.0),
            NodeRole::Bar => {
                let (height, width) = if direction.is_vertical() {
                    (0.05, 0.5)
                } else {
                    (0.5, 0.05)
                };
                Node::new(id, Shape::Record, "")
                    .with_height(height)
                    .with_width(width)
                    .with_margin(0.0, 0.0)
                    .with_style(NodeStyle::Filled)
                    .with_font_size(1.0)
                    .with_pen_width(4.0)
            }
            NodeRole::Note => boxed_node(id, Shape::Note, escape_label(&expr.label))
                .with_style(NodeStyle::Rounded)
                .with_fill(expr.fill.clone()),
            _ => boxed_node(id, Shape::Rectangle, escape_label(&expr.label))
                .with_style(NodeStyle::Rounded)
                .with_fill(expr.fill.clone()),
        }
    }

    fn style_edge(&self, edge: &mut Edge, _from: &NodeExpr, _to: &NodeExpr) {
        edge.label_distance = Some(1.0);
    }

    fn compile_line(&self, compiler: &mut GraphCompiler, exprs: &[Expr]) {
        compiler.declare_nodes(exprs, |id, expr, direction| self.node(id, expr, direction));
        for (from, edge, to) in sandwiched(exprs) {
            let Some(mut out) = compiler.connect(from, edge, to) else {
                continue;
            };
            self.style_edge(&mut out, from, to);
            if to.role == NodeRole::Bar {
                out = fan_in(compiler, out);
            }
            compiler.add_edge(out);
        }
    }
}

/// Points an edge into a bar at a fresh port of that bar, so that parallel
/// flows meet the bar side by side.
fn fan_in(compiler: &mut GraphCompiler, edge: Edge) -> Edge {
    let bar = edge.target().node().clone();
    let compass = compiler.direction().entry_compass();
    match compiler.node_mut(&bar).map(Node::add_port) {
        Some(port) => edge.with_target(Endpoint::new(bar).with_port(port, compass)),
        None => edge,
    }
}
