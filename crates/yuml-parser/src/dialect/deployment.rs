//! Deployment diagrams.
//!
//! ```text
//! [Web Server]https-[App Server]
//! [App Server]-[Database{bg:steelblue}]
//! [Database]-[note: replicated nightly]
//! ```

use yuml_core::{
    diagram::{DiagramKind, Direction},
    graph::{Edge, Node, NodeId, Shape},
};

use crate::{
    dialect::graph::{GraphDialect, boxed_node, record_or_note, unrecognized},
    error::Result,
    expr::{EdgeExpr, Expr, NodeExpr, non_empty},
    label::format_label,
    lexer::{Token, strip_unescaped_suffix},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct DeploymentDialect;

impl GraphDialect for DeploymentDialect {
    const KIND: DiagramKind = DiagramKind::Deployment;
    const OPENERS: &'static str = "[";
    const RANKSEP: f32 = 0.5;

    fn parse_token(&self, token: &Token<'_>) -> Result<Expr> {
        if let Some(content) = token.enclosed('[', ']') {
            return Ok(record_or_note(content, token.span()));
        }
        match strip_unescaped_suffix(token.text(), "-") {
            Some(label) => Ok(Expr::Edge(EdgeExpr {
                label: non_empty(label),
                span: token.span(),
                ..EdgeExpr::default()
            })),
            None => Err(unrecognized(
                token,
                Self::KIND,
                "expected `[node]` or an association such as `label-`",
            )),
        }
    }

    fn node(&self, id: NodeId, expr: &NodeExpr, _direction: Direction) -> Node {
        let shape = if expr.is_note() {
            Shape::Note
        } else {
            Shape::Box3d
        };
        boxed_node(id, shape, format_label(&expr.label, 20, true)).with_fill(expr.fill.clone())
    }

    fn style_edge(&self, edge: &mut Edge, _from: &NodeExpr, _to: &NodeExpr) {
        edge.label_distance = Some(2.0);
    }
}
