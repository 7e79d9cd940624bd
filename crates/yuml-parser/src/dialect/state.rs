//! State diagrams.
//!
//! ```text
//! (start)->(Simulator running)
//! (Simulator running)Pause->(Simulator paused|do/wait)
//! (Simulator paused|do/wait)Unpause->(Simulator running)
//! (Simulator running)-(note: stops on error)
//! ```

use yuml_core::{
    diagram::{DiagramKind, Direction},
    graph::{ArrowKind, Edge, Node, NodeId, NodeStyle, Shape},
};

use crate::{
    dialect::graph::{GraphDialect, boxed_node, record_label, record_or_note, unrecognized},
    error::Result,
    expr::{EdgeExpr, Expr, NodeExpr, NodeRole, non_empty},
    label::format_label,
    lexer::{Token, strip_unescaped_suffix},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct StateDialect;

impl GraphDialect for StateDialect {
    const KIND: DiagramKind = DiagramKind::State;
    const OPENERS: &'static str = "(";
    const RANKSEP: f32 = 0.5;

    fn parse_token(&self, token: &Token<'_>) -> Result<Expr> {
        let span = token.span();
        if let Some(content) = token.enclosed('(', ')') {
            return Ok(record_or_note(content, span));
        }
        if let Some(label) = strip_unescaped_suffix(token.text(), "->") {
            return Ok(Expr::Edge(EdgeExpr {
                head: ArrowKind::Vee,
                label: non_empty(label),
                span,
                ..EdgeExpr::default()
            }));
        }
        if token.text() == "-" {
            return Ok(Expr::Edge(EdgeExpr {
                span,
                ..EdgeExpr::default()
            }));
        }
        Err(unrecognized(
            token,
            Self::KIND,
            "expected `(state)`, `event->` or `-`",
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
            NodeRole::Note => boxed_node(id, Shape::Note, format_label(&expr.label, 20, true))
                .with_style(NodeStyle::Rounded)
                .with_fill(expr.fill.clone()),
            _ => boxed_node(id, Shape::Record, record_label(&expr.label, direction))
                .with_style(NodeStyle::Rounded)
                .with_fill(expr.fill.clone()),
        }
    }

    fn style_edge(&self, edge: &mut Edge, _from: &NodeExpr, _to: &NodeExpr) {
        edge.label_distance = Some(2.0);
    }
}
