//! Sequence diagrams.
//!
//! ```text
//! [Patron]order food>[Waiter]
//! [Waiter]serve wine.>[Patron]
//! [Patron]tip>>[Waiter]
//! [Source](open>([Dest]
//! [Waiter]-[note: busy night{bg:wheat}]
//! ```
//!
//! Sequence diagrams bypass the layout engine: lines compile into a
//! [`SequenceModel`] of participants and events in document order.

use std::{collections::HashMap, sync::OnceLock};

use log::debug;
use regex::Regex;
use yuml_core::{
    diagram::{DiagramKind, Direction},
    graph::{LineStyle, NodeId},
    sequence::{Activation, ArrowHead, Event, Message, Note, Participant, SequenceModel},
};

use crate::{
    dialect::{Artifact, Dialect, SourceLine, graph::record_or_note},
    error::{Diagnostic, ErrorCode, Result},
    expr::{EdgeExpr, Expr, MessageStyle, NodeExpr, NodeRole, SignalExpr},
    label::{plain_label, record_name},
    lexer::{Token, tokenize},
    uid::UidRegistry,
};

static ARROW_TAIL: OnceLock<Regex> = OnceLock::new();

fn arrow_tail() -> &'static Regex {
    ARROW_TAIL.get_or_init(|| Regex::new(r"[.>]?>[()]?$").expect("arrow tail regex must compile"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceDialect;

impl SequenceDialect {
    fn parse_token(&self, token: &Token<'_>) -> Result<Expr> {
        if let Some(content) = token.enclosed('[', ']') {
            return Ok(record_or_note(content, token.span()));
        }
        if token.text().contains('>') {
            return signal(token).map(Expr::Signal);
        }
        if token.text() == "-" {
            return Ok(Expr::Edge(EdgeExpr {
                span: token.span(),
                ..EdgeExpr::default()
            }));
        }
        Err(Diagnostic::error(format!("unrecognized token `{}`", token.text()))
            .with_code(ErrorCode::E100)
            .with_label(token.span(), "not valid in a sequence diagram")
            .with_help("expected `[object]`, a message such as `call>` or `-`"))
    }
}

impl Dialect for SequenceDialect {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Sequence
    }

    fn parse_line(&self, line: &str, offset: usize) -> Result<Vec<Expr>> {
        tokenize(line, "[", offset)
            .iter()
            .map(|token| self.parse_token(token))
            .collect()
    }

    fn compile(&self, lines: &[SourceLine<'_>], _direction: Direction) -> Result<Artifact> {
        let mut compiler = SequenceCompiler::new();
        for line in lines {
            let exprs = self.parse_line(line.text, line.offset)?;
            compiler.compile_line(&exprs);
        }
        let model = compiler.finish();
        debug!(
            participants = model.participants().len(),
            events = model.events().len();
            "Compiled sequence"
        );
        Ok(Artifact::Sequence(model))
    }
}

/// Parses a message token: `[(|)]text[.|>]>[(|)]`.
fn signal(token: &Token<'_>) -> Result<SignalExpr> {
    let text = token.text();
    let style = if text.contains(">>") {
        MessageStyle::Async
    } else if text.contains(".>") {
        MessageStyle::Dashed
    } else {
        MessageStyle::Solid
    };

    let source = text.chars().next().and_then(Activation::from_marker);
    let body = if source.is_some() { &text[1..] } else { text };

    let Some(tail) = arrow_tail().find(body) else {
        return Err(Diagnostic::error(format!("malformed message `{text}`"))
            .with_code(ErrorCode::E102)
            .with_label(token.span(), "a message must end with `>`, `.>` or `>>`")
            .with_help("activation markers `(` and `)` may follow the arrow"));
    };
    let target = tail.as_str().chars().last().and_then(Activation::from_marker);

    Ok(SignalExpr {
        text: body[..tail.start()].trim().to_string(),
        style,
        source,
        target,
        span: token.span(),
    })
}

/// Per-document sequence compilation state.
struct SequenceCompiler {
    uids: UidRegistry,
    indices: HashMap<NodeId, usize>,
    model: SequenceModel,
}

impl SequenceCompiler {
    fn new() -> Self {
        Self {
            uids: UidRegistry::new(),
            indices: HashMap::new(),
            model: SequenceModel::new(),
        }
    }

    fn compile_line(&mut self, exprs: &[Expr]) {
        for expr in exprs.iter().filter_map(Expr::as_node) {
            if expr.role == NodeRole::Record {
                self.declare(expr);
            }
        }

        for window in exprs.windows(3) {
            match window {
                [Expr::Node(from), Expr::Signal(signal), Expr::Node(to)]
                    if from.role == NodeRole::Record && to.role == NodeRole::Record =>
                {
                    self.message(from, signal, to);
                }
                [Expr::Node(from), Expr::Signal(_) | Expr::Edge(_), Expr::Node(note)]
                    if from.role == NodeRole::Record && note.is_note() =>
                {
                    self.note(from, note);
                }
                _ => {}
            }
        }
    }

    fn declare(&mut self, expr: &NodeExpr) {
        let Some(id) = self.uids.create(&expr.label) else {
            return;
        };
        let index = self.model.add_participant(Participant {
            name: record_name(&expr.label).to_string(),
            label: plain_label(&expr.label, 20),
            fill: expr.fill.clone(),
        });
        self.indices.insert(id, index);
    }

    fn index(&self, expr: &NodeExpr) -> Option<usize> {
        self.uids
            .get(&expr.label)
            .and_then(|id| self.indices.get(&id).copied())
    }

    fn message(&mut self, from: &NodeExpr, signal: &SignalExpr, to: &NodeExpr) {
        let (Some(from), Some(to)) = (self.index(from), self.index(to)) else {
            return;
        };
        let (line, arrow) = match signal.style {
            MessageStyle::Solid => (LineStyle::Solid, ArrowHead::Filled),
            MessageStyle::Dashed => (LineStyle::Dashed, ArrowHead::Filled),
            MessageStyle::Async => (LineStyle::Solid, ArrowHead::Open),
        };
        self.model.push(Event::Message(Message {
            from,
            to,
            text: signal.text.clone(),
            line,
            arrow,
            source_activation: signal.source,
            target_activation: signal.target,
        }));
    }

    fn note(&mut self, from: &NodeExpr, note: &NodeExpr) {
        if let Some(participant) = self.index(from) {
            self.model.push(Event::Note(Note {
                participant,
                text: plain_label(&note.label, 20),
                fill: note.fill.clone(),
            }));
        }
    }

    fn finish(self) -> SequenceModel {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(source: &[&str]) -> SequenceModel {
        let lines: Vec<SourceLine<'_>> = source
            .iter()
            .map(|text| SourceLine { text, offset: 0 })
            .collect();
        match SequenceDialect.compile(&lines, Direction::TopDown).unwrap() {
            Artifact::Sequence(model) => model,
            other => panic!("expected a sequence, got {other:?}"),
        }
    }

    fn parse_signal(text: &str) -> SignalExpr {
        let tokens = tokenize(text, "[", 0);
        signal(&tokens[0]).unwrap()
    }

    fn messages(model: &SequenceModel) -> Vec<&Message> {
        model
            .events()
            .iter()
            .filter_map(|event| match event {
                Event::Message(message) => Some(message),
                Event::Note(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_signal_styles() {
        assert_eq!(parse_signal("order food>").style, MessageStyle::Solid);
        assert_eq!(parse_signal("serve wine.>").style, MessageStyle::Dashed);
        assert_eq!(parse_signal("tip>>").style, MessageStyle::Async);
        assert_eq!(parse_signal("order food>").text, "order food");
        assert_eq!(parse_signal("serve wine.>").text, "serve wine");
        assert_eq!(parse_signal("tip>>").text, "tip");
    }

    #[test]
    fn test_activation_markers() {
        let open = parse_signal("(call>(");
        assert_eq!(open.source, Some(Activation::Open));
        assert_eq!(open.target, Some(Activation::Open));
        assert_eq!(open.text, "call");

        let close = parse_signal(")reply.>)");
        assert_eq!(close.source, Some(Activation::Close));
        assert_eq!(close.target, Some(Activation::Close));
        assert_eq!(close.style, MessageStyle::Dashed);
        assert_eq!(close.text, "reply");

        let plain = parse_signal(">");
        assert_eq!(plain.source, None);
        assert_eq!(plain.target, None);
        assert_eq!(plain.text, "");
    }

    #[test]
    fn test_malformed_message() {
        let err = SequenceDialect.parse_line("[A]a>b[B]", 0).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E102));
        assert_eq!(err.labels()[0].span().range(), 3..6);
    }

    #[test]
    fn test_participants_in_first_seen_order() {
        let model = compile(&[
            "[Patron]order food>[Waiter]",
            "[Waiter]order food>[Cook]",
            "[Cook|chef]serve>[Waiter]",
        ]);
        let names: Vec<&str> = model.participants().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Patron", "Waiter", "Cook"]);

        let sent = messages(&model);
        assert_eq!(sent.len(), 3);
        assert_eq!((sent[2].from, sent[2].to), (2, 1));
    }

    #[test]
    fn test_message_line_and_arrow() {
        let model = compile(&[
            "[A]call>[B]",
            "[B]reply.>[A]",
            "[A]fire>>[B]",
            "[A]think>[A]",
        ]);
        let sent = messages(&model);
        assert_eq!((sent[0].line, sent[0].arrow), (LineStyle::Solid, ArrowHead::Filled));
        assert_eq!((sent[1].line, sent[1].arrow), (LineStyle::Dashed, ArrowHead::Filled));
        assert_eq!((sent[2].line, sent[2].arrow), (LineStyle::Solid, ArrowHead::Open));
        assert!(sent[3].is_self());
    }

    #[test]
    fn test_notes_attach_to_left_object() {
        let model = compile(&["[Waiter]-[note: busy night;really{bg:wheat}]"]);
        assert_eq!(model.participants().len(), 1);
        let Event::Note(note) = &model.events()[0] else {
            panic!("expected a note");
        };
        assert_eq!(note.participant, 0);
        assert_eq!(note.text, "busy night\nreally");
        assert!(note.fill.is_some());
    }

    #[test]
    fn test_participant_label_uses_line_breaks() {
        let model = compile(&["[Order Service|v2]"]);
        assert_eq!(model.participants()[0].label, "Order Service\nv2");
        assert!(model.events().is_empty());
    }
}
