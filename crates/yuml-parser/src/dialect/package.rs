//! Package diagrams.
//!
//! ```text
//! [Presentation]->[Domain]
//! [Domain]persists via->[Infrastructure{bg:lightgoldenrod}]
//! [Domain]-[note: no framework imports]
//! ```

use yuml_core::{
    diagram::{DiagramKind, Direction},
    graph::{ArrowKind, Edge, LineStyle, Node, NodeId, Shape},
};

use crate::{
    dialect::graph::{GraphDialect, boxed_node, record_or_note, unrecognized},
    error::Result,
    expr::{EdgeExpr, Expr, NodeExpr, non_empty},
    label::format_label,
    lexer::{Token, strip_unescaped_suffix},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct PackageDialect;

impl GraphDialect for PackageDialect {
    const KIND: DiagramKind = DiagramKind::Package;
    const OPENERS: &'static str = "[";
    const RANKSEP: f32 = 0.5;

    fn parse_token(&self, token: &Token<'_>) -> Result<Expr> {
        let span = token.span();
        if let Some(content) = token.enclosed('[', ']') {
            return Ok(record_or_note(content, span));
        }
        if token.text() == "-" {
            return Ok(Expr::Edge(EdgeExpr {
                line: LineStyle::Dashed,
                span,
                ..EdgeExpr::default()
            }));
        }
        if let Some(label) = strip_unescaped_suffix(token.text(), "->") {
            return Ok(Expr::Edge(EdgeExpr {
                head: ArrowKind::Vee,
                label: non_empty(label),
                line: LineStyle::Dashed,
                span,
                ..EdgeExpr::default()
            }));
        }
        Err(unrecognized(
            token,
            Self::KIND,
            "expected `[package]`, `label->` or `-`",
        ))
    }

    fn node(&self, id: NodeId, expr: &NodeExpr, _direction: Direction) -> Node {
        let shape = if expr.is_note() { Shape::Note } else { Shape::Tab };
        boxed_node(id, shape, format_label(&expr.label, 20, true)).with_fill(expr.fill.clone())
    }

    fn style_edge(&self, edge: &mut Edge, _from: &NodeExpr, _to: &NodeExpr) {
        edge.label_distance = Some(2.0);
    }
}
