use yuml_core::{
    diagram::{DiagramKind, Direction},
    dot::DotWriter,
    graph::Graph,
    sequence::Event,
};
use yuml_parser::{
    CompileOptions, compile,
    dialect::Artifact,
    error::{ErrorCategory, ErrorCode},
};

fn to_dot(source: &str) -> String {
    let compilation = compile(source, &CompileOptions::default()).expect("Failed to compile");
    match compilation.artifact {
        Artifact::Graph(graph) => DotWriter::default().write(&graph),
        other => panic!("Expected a graph, got {other:?}"),
    }
}

fn graph(source: &str) -> Graph {
    match compile(source, &CompileOptions::default())
        .expect("Failed to compile")
        .artifact
    {
        Artifact::Graph(graph) => graph,
        other => panic!("Expected a graph, got {other:?}"),
    }
}

#[test]
fn test_customer_order_dot() {
    let dot = to_dot("[Customer]-[Order]");
    let expected = "\
digraph G {
    graph [fontname=Helvetica]
    node [fontname=Helvetica, shape=none, margin=0]
    edge [fontname=Helvetica]
    ranksep=0.7
    rankdir=TB
    A0 [shape=\"rectangle\", height=0.5, margin=\"0.2,0.05\", fontsize=10, label=\"Customer\"]
    A1 [shape=\"rectangle\", height=0.5, margin=\"0.2,0.05\", fontsize=10, label=\"Order\"]
    A0 -> A1 [dir=\"both\", style=\"solid\", arrowtail=\"none\", arrowhead=\"none\", labeldistance=2, fontsize=10]
}
";
    assert_eq!(dot, expected);
}

#[test]
fn test_full_class_with_fields() {
    let dot = to_dot("[Customer|Forename;Surname;Email|Save()]");
    assert!(dot.contains(
        "A0 [shape=\"record\", height=0.5, margin=\"0.2,0.05\", fontsize=10, \
         label=\"{Customer|Forename\\nSurname\\nEmail|Save()}\"]"
    ));
}

#[test]
fn test_left_to_right_fields_are_not_braced() {
    let options = CompileOptions {
        direction: Direction::LeftToRight,
        ..CompileOptions::default()
    };
    let compilation = compile("[A|x]", &options).unwrap();
    let Artifact::Graph(graph) = compilation.artifact else {
        panic!("Expected a graph");
    };
    let dot = DotWriter::default().write(&graph);
    assert!(dot.contains("rankdir=LR"));
    assert!(dot.contains("label=\"A|x\""));
}

#[test]
fn test_color_splash() {
    let dot = to_dot("[Customer{bg:orange}]<>1->*[Order{bg:green}]");
    assert!(dot.contains("style=\"filled\", fillcolor=\"#FFA500\", fontcolor=\"black\""));
    assert!(dot.contains("style=\"filled\", fillcolor=\"#008000\", fontcolor=\"white\""));
    assert!(dot.contains(
        "A0 -> A1 [dir=\"both\", style=\"solid\", arrowtail=\"odiamond\", arrowhead=\"vee\", \
         taillabel=\"1\", headlabel=\"*\", labeldistance=2, fontsize=10]"
    ));
}

#[test]
fn test_node_identity_across_lines() {
    let graph = graph("[Customer|name]\n[Customer]->[Order]\n[Order]<-[Customer]");
    assert_eq!(graph.nodes().count(), 2);
    assert_eq!(graph.edges().count(), 2);
}

#[test]
fn test_note_edges_render_same_rank() {
    let dot = to_dot("[Address]-[note: Value Object]");
    assert!(dot.contains("{ rank=same; A0 -> A1 [dir=\"both\", style=\"dashed\""));
}

#[test]
fn test_activity_bar_ports() {
    let dot = to_dot("// {type:activity}\n(a)->|join|\n(b)->|join|\n|join|->(end)");
    assert!(dot.contains("A1 [shape=\"record\", height=0.05, width=0.5, margin=\"0,0\", fontsize=1, style=\"filled\", penwidth=4, label=\"<f1>|<f2>\"]"));
    assert!(dot.contains("A0 -> A1:f1:n"));
    assert!(dot.contains("A2 -> A1:f2:n"));
    assert!(dot.contains("A1 -> A3 ["));
}

#[test]
fn test_usecase_actor_label() {
    let dot = to_dot("// {type:usecase}\n[Customer]-(Login)");
    assert!(dot.contains("A0 [shape=\"none\", height=1, margin=\"0.05,0.05\", fontsize=10, label=\"{img:actor} Customer\"]"));
    assert!(dot.contains("ranksep=0.7"));
}

#[test]
fn test_every_graph_kind_compiles_a_simple_line() {
    let samples = [
        (DiagramKind::Class, "[a]-[b]"),
        (DiagramKind::Usecase, "(a)-(b)"),
        (DiagramKind::Activity, "(a)->(b)"),
        (DiagramKind::State, "(a)->(b)"),
        (DiagramKind::Deployment, "[a]-[b]"),
        (DiagramKind::Package, "[a]->[b]"),
    ];
    for (kind, line) in samples {
        let options = CompileOptions {
            kind: Some(kind),
            ..CompileOptions::default()
        };
        let compilation = compile(line, &options).expect("Failed to compile");
        let Artifact::Graph(graph) = compilation.artifact else {
            panic!("Expected a graph for {kind}");
        };
        assert_eq!(graph.nodes().count(), 2, "{kind}");
        assert_eq!(graph.edges().count(), 1, "{kind}");
    }
}

#[test]
fn test_sequence_document() {
    let source = "\
// {type:sequence}
[Patron]order food>[Waiter]
[Waiter]order food>[Cook]
[Waiter]serve wine.>[Patron]
[Cook]pickup.>[Waiter]
[Waiter]serve food.>[Patron]
[Patron]pay>>[Cashier]
[Waiter]-[note: busy night]
";
    let compilation = compile(source, &CompileOptions::default()).unwrap();
    assert_eq!(compilation.kind, Some(DiagramKind::Sequence));
    let Artifact::Sequence(model) = compilation.artifact else {
        panic!("Expected a sequence model");
    };
    assert_eq!(model.participants().len(), 4);
    assert_eq!(model.events().len(), 7);
    assert!(matches!(model.events()[6], Event::Note(_)));
}

#[test]
fn test_errors_carry_category_and_span() {
    let source = "[A]-[B]\n[B]1-2-3[C]";
    let err = compile(source, &CompileOptions::default()).unwrap_err();
    let diag = err.primary().unwrap();
    assert_eq!(diag.code(), Some(ErrorCode::E101));
    assert_eq!(diag.category(), Some(ErrorCategory::Grammar));
    assert_eq!(&source[diag.labels()[0].span().range()], "1-2-3");
    assert!(err.to_string().starts_with("error[E101]"));
}
