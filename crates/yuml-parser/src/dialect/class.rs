//! Class diagrams.
//!
//! ```text
//! [Customer|Forename;Surname|Save()]<>1->*[Order{bg:green}]
//! [Customer]^[Cool Customer]
//! [Customer]uses-.->[PaymentStrategy]
//! [Student]*-*[Course][Enrollment]
//! ```

use yuml_core::{
    diagram::{DiagramKind, Direction},
    graph::{ArrowKind, Edge, LineStyle, Node, NodeId, NodeStyle, Shape},
};

use crate::{
    dialect::graph::{
        GraphCompiler, GraphDialect, boxed_node, record_label, record_or_note, sandwiched,
        unrecognized,
    },
    error::{Diagnostic, ErrorCode, Result},
    expr::{EdgeExpr, Expr, NodeExpr, NodeRole, non_empty},
    label::format_label,
    lexer::{Token, contains_unescaped, split_unescaped},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ClassDialect;

impl GraphDialect for ClassDialect {
    const KIND: DiagramKind = DiagramKind::Class;
    const OPENERS: &'static str = "[";
    const RANKSEP: f32 = 0.7;

    fn parse_token(&self, token: &Token<'_>) -> Result<Expr> {
        let text = token.text();
        if let Some(content) = token.enclosed('[', ']') {
            return Ok(record_or_note(content, token.span()));
        }
        if text == "^" {
            return Ok(Expr::Edge(EdgeExpr {
                tail: ArrowKind::Empty,
                span: token.span(),
                ..EdgeExpr::default()
            }));
        }
        if contains_unescaped(text, "-") {
            return association(token).map(Expr::Edge);
        }
        Err(unrecognized(
            token,
            Self::KIND,
            "expected `[class]`, `^` or an association such as `1-*`",
        ))
    }

    fn node(&self, id: NodeId, expr: &NodeExpr, direction: Direction) -> Node {
        let node = if expr.is_note() {
            boxed_node(id, Shape::Note, format_label(&expr.label, 20, true))
        } else {
            boxed_node(id, Shape::Record, record_label(&expr.label, direction))
        };
        node.with_fill(expr.fill.clone())
    }

    fn style_edge(&self, edge: &mut Edge, from: &NodeExpr, to: &NodeExpr) {
        edge.label_distance = Some(2.0);
        edge.same_rank = from.is_note() || to.is_note();
    }

    fn compile_line(&self, compiler: &mut GraphCompiler, exprs: &[Expr]) {
        compiler.declare_nodes(exprs, |id, expr, direction| self.node(id, expr, direction));

        if let [
            Expr::Node(from),
            Expr::Edge(edge),
            Expr::Node(to),
            Expr::Node(class),
        ] = exprs
        {
            let records = [from, to, class]
                .iter()
                .all(|node| node.role == NodeRole::Record);
            if records {
                association_class(compiler, from, edge, to, class);
                return;
            }
        }

        for (from, edge, to) in sandwiched(exprs) {
            if let Some(mut out) = compiler.connect(from, edge, to) {
                self.style_edge(&mut out, from, to);
                compiler.add_edge(out);
            }
        }
    }
}

/// Splits an association token into its two ends.
fn association(token: &Token<'_>) -> Result<EdgeExpr> {
    let text = token.text();
    let (line, separator) = if contains_unescaped(text, "-.-") {
        (LineStyle::Dashed, "-.-")
    } else {
        (LineStyle::Solid, "-")
    };

    let sides = split_unescaped(text, separator);
    let [left, right] = sides.as_slice() else {
        return Err(Diagnostic::error(format!("malformed association `{text}`"))
            .with_code(ErrorCode::E101)
            .with_label(
                token.span(),
                "expected a single `-` or `-.-` between the two ends",
            ));
    };

    let (tail, tail_text) = left_end(left);
    let (head, head_text) = right_end(right);
    Ok(EdgeExpr {
        tail,
        head,
        tail_label: non_empty(tail_text),
        head_label: non_empty(head_text),
        line,
        span: token.span(),
        ..EdgeExpr::default()
    })
}

fn left_end(side: &str) -> (ArrowKind, &str) {
    if let Some(rest) = side.strip_prefix("<>") {
        (ArrowKind::ODiamond, rest)
    } else if let Some(rest) = side.strip_prefix("++") {
        (ArrowKind::Diamond, rest)
    } else if let Some(rest) = side.strip_prefix('+') {
        (ArrowKind::ODiamond, rest)
    } else if let Some(rest) = side.strip_prefix('<') {
        (ArrowKind::Vee, rest)
    } else if let Some(rest) = side.strip_suffix('>') {
        (ArrowKind::Vee, rest)
    } else if let Some(rest) = side.strip_prefix('^') {
        (ArrowKind::Empty, rest)
    } else {
        (ArrowKind::None, side)
    }
}

fn right_end(side: &str) -> (ArrowKind, &str) {
    if let Some(rest) = side.strip_suffix("<>") {
        (ArrowKind::ODiamond, rest)
    } else if let Some(rest) = side.strip_suffix("++") {
        (ArrowKind::Diamond, rest)
    } else if let Some(rest) = side.strip_suffix('+') {
        (ArrowKind::ODiamond, rest)
    } else if let Some(rest) = side.strip_suffix('>') {
        (ArrowKind::Vee, rest)
    } else if let Some(rest) = side.strip_suffix('^') {
        (ArrowKind::Empty, rest)
    } else if let Some(rest) = side.strip_prefix('>') {
        (ArrowKind::Vee, rest)
    } else {
        left_end(side)
    }
}

/// `[A]-[B][C]`: `C` qualifies the association between `A` and `B` through
/// an invisible junction point.
fn association_class(
    compiler: &mut GraphCompiler,
    from: &NodeExpr,
    edge: &EdgeExpr,
    to: &NodeExpr,
    class: &NodeExpr,
) {
    let (Some(a), Some(b), Some(c)) = (compiler.id(from), compiler.id(to), compiler.id(class))
    else {
        return;
    };
    let junction = a.junction(&b);
    compiler.add_node(
        Node::new(junction.clone(), Shape::Point, "")
            .with_style(NodeStyle::Invisible)
            .with_height(0.01)
            .with_width(0.01),
    );

    let mut to_junction = Edge::new(a, junction.clone());
    to_junction.tail = edge.tail;
    to_junction.tail_label = edge.tail_label.clone();
    to_junction.line = edge.line;
    to_junction.label_distance = Some(2.0);
    to_junction.font_size = Some(10.0);
    compiler.add_edge(to_junction);

    let mut from_junction = Edge::new(junction.clone(), b);
    from_junction.head = edge.head;
    from_junction.head_label = edge.head_label.clone();
    from_junction.line = edge.line;
    from_junction.label_distance = Some(2.0);
    from_junction.font_size = Some(10.0);
    compiler.add_edge(from_junction);

    let mut qualifier = Edge::new(c, junction);
    qualifier.head = ArrowKind::Vee;
    qualifier.line = LineStyle::Dashed;
    qualifier.label_distance = Some(2.0);
    qualifier.same_rank = true;
    compiler.add_edge(qualifier);
}
