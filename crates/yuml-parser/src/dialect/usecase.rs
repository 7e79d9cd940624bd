//! Use-case diagrams.
//!
//! ```text
//! [Customer]-(Login)
//! (Login)<(Forgot Password)
//! (Register)>(Confirm Email)
//! [Admin]^[User]
//! ```

use yuml_core::{
    diagram::{DiagramKind, Direction},
    graph::{ArrowKind, Edge, LineStyle, Node, NodeId, Shape},
};

use crate::{
    dialect::graph::{GraphDialect, boxed_node, record_or_note, unrecognized},
    error::Result,
    expr::{EdgeExpr, Expr, NodeExpr, NodeRole},
    label::format_label,
    lexer::Token,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct UsecaseDialect;

impl GraphDialect for UsecaseDialect {
    const KIND: DiagramKind = DiagramKind::Usecase;
    const OPENERS: &'static str = "[(";
    const RANKSEP: f32 = 0.7;

    fn parse_token(&self, token: &Token<'_>) -> Result<Expr> {
        let span = token.span();
        if let Some(content) = token.enclosed('(', ')') {
            return Ok(record_or_note(content, span));
        }
        if let Some(content) = token.enclosed('[', ']') {
            return Ok(Expr::Node(NodeExpr {
                role: NodeRole::Actor,
                label: content.trim().to_string(),
                fill: None,
                span,
            }));
        }

        let edge = match token.text() {
            "<" => EdgeExpr {
                tail: ArrowKind::Vee,
                label: Some("<<extend>>".to_string()),
                line: LineStyle::Dashed,
                ..EdgeExpr::default()
            },
            ">" => EdgeExpr {
                head: ArrowKind::Vee,
                label: Some("<<include>>".to_string()),
                line: LineStyle::Dashed,
                ..EdgeExpr::default()
            },
            "-" => EdgeExpr::default(),
            "^" => EdgeExpr {
                head: ArrowKind::Empty,
                ..EdgeExpr::default()
            },
            _ => {
                return Err(unrecognized(
                    token,
                    Self::KIND,
                    "expected `(use case)`, `[actor]`, `<`, `>`, `-` or `^`",
                ));
            }
        };
        Ok(Expr::Edge(EdgeExpr { span, ..edge }))
    }

    fn node(&self, id: NodeId, expr: &NodeExpr, _direction: Direction) -> Node {
        let label = format_label(&expr.label, 20, false);
        match expr.role {
            NodeRole::Actor => Node::new(id, Shape::None, format!("{{img:actor}} {label}"))
                .with_height(1.0)
                .with_margin(0.05, 0.05)
                .with_font_size(10.0),
            NodeRole::Note => boxed_node(id, Shape::Note, label).with_fill(expr.fill.clone()),
            _ => boxed_node(id, Shape::Ellipse, label).with_fill(expr.fill.clone()),
        }
    }

    fn style_edge(&self, edge: &mut Edge, _from: &NodeExpr, _to: &NodeExpr) {
        edge.label_distance = Some(2.0);
    }
}

#[cfg(test)]
mod tests {
    use yuml_core::graph::Graph;

    use super::*;
    use crate::dialect::{Artifact, Dialect, SourceLine};

    fn compile(source: &[&str]) -> Graph {
        let lines: Vec<SourceLine<'_>> = source
            .iter()
            .map(|text| SourceLine { text, offset: 0 })
            .collect();
        match UsecaseDialect.compile(&lines, Direction::TopDown).unwrap() {
            Artifact::Graph(graph) => graph,
            other => panic!("expected a graph, got {other:?}"),
        }
    }

    #[test]
    fn test_actor_and_use_case_nodes() {
        let graph = compile(&["[Customer]-(Make Order{bg:red})"]);
        let actor = graph.node(&NodeId::new("A0")).unwrap();
        assert_eq!(actor.shape(), Shape::None);
        assert_eq!(actor.label(), "{img:actor} Customer");
        assert_eq!(actor.height(), Some(1.0));

        let case = graph.node(&NodeId::new("A1")).unwrap();
        assert_eq!(case.shape(), Shape::Ellipse);
        assert_eq!(case.label(), "Make\\ Order");
        assert_eq!(case.fill().unwrap().color(), "#FF0000");
    }

    #[test]
    fn test_actor_ignores_bg_decoration() {
        let graph = compile(&["[Admin{bg:red}]"]);
        let actor = graph.node(&NodeId::new("A0")).unwrap();
        assert!(actor.fill().is_none());
    }

    #[test]
    fn test_extend_and_include() {
        let graph = compile(&["(Login)<(Forgot Password)", "(Register)>(Confirm Email)"]);
        let edges: Vec<&Edge> = graph.edges().collect();

        assert_eq!(edges[0].tail, ArrowKind::Vee);
        assert_eq!(edges[0].label.as_deref(), Some("<<extend>>"));
        assert_eq!(edges[0].line, LineStyle::Dashed);

        assert_eq!(edges[1].head, ArrowKind::Vee);
        assert_eq!(edges[1].label.as_deref(), Some("<<include>>"));
    }

    #[test]
    fn test_note_edges_are_dashed_but_not_same_rank() {
        let graph = compile(&["[Admin]^[User]", "[Admin]-(note: Most privileged user)"]);
        let edges: Vec<&Edge> = graph.edges().collect();
        assert_eq!(edges[0].head, ArrowKind::Empty);
        assert_eq!(edges[1].line, LineStyle::Dashed);
        assert!(!edges[1].same_rank);
    }

    #[test]
    fn test_rejects_unknown_connector() {
        let err = UsecaseDialect.parse_line("(A)->(B)", 0).unwrap_err();
        assert!(err.message().contains("->"));
    }
}
