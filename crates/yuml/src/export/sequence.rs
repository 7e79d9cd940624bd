//! SVG rendering for sequence diagrams.

use svg::{self, node::element as svg_element};

use yuml_core::{
    color::Fill,
    graph::LineStyle,
    sequence::{Event, Message, Note, SequenceModel},
};

use crate::layout::sequence::{
    ACTIVATION_WIDTH, ACTOR_MARGIN, Column, LINE_HEIGHT, Layout, NOTE_MARGIN, Row,
    SELF_SIGNAL_WIDTH, SIGNAL_MARGIN, SIGNAL_PADDING,
};

/// Size of the folded corner of a note.
const NOTE_FOLD: f32 = 7.0;

/// Draws a sequence diagram as a standalone SVG document.
pub fn render(model: &SequenceModel, dark: bool) -> String {
    let layout = Layout::compute(model);
    let painter = Painter::new(dark);

    let mut doc = svg::Document::new()
        .set("viewBox", format!("0 0 {} {}", layout.width(), layout.height()))
        .set("width", layout.width())
        .set("height", layout.height())
        .add(painter.marker_definitions());

    for node in painter.draw(model, &layout) {
        doc = doc.add(node);
    }

    doc.to_string()
}

/// Draws the shapes of a laid-out diagram in one ink color.
struct Painter {
    ink: &'static str,
    paper: &'static str,
}

impl Painter {
    fn new(dark: bool) -> Self {
        if dark {
            Self {
                ink: "white",
                paper: "black",
            }
        } else {
            Self {
                ink: "black",
                paper: "white",
            }
        }
    }

    fn draw(&self, model: &SequenceModel, layout: &Layout) -> Vec<Box<dyn svg::Node>> {
        let mut nodes: Vec<Box<dyn svg::Node>> = Vec::new();

        for (participant, column) in model.participants().iter().zip(layout.columns()) {
            let fill = participant.fill.as_ref();
            for y in [layout.top_actors_y(), layout.bottom_actors_y()] {
                let height = layout.actors_height();
                nodes.extend(self.actor(column, y, height, &participant.label, fill));
            }
            let lifeline = format!(
                "M{},{} v{}",
                column.center(),
                layout.lifeline_start(),
                layout.lifeline_end() - layout.lifeline_start()
            );
            nodes.push(Box::new(self.path(lifeline, LineStyle::Solid, None)));
        }

        for activation in layout.activation_boxes() {
            let center = layout.columns()[activation.participant()].center();
            nodes.push(Box::new(self.rect(
                activation.x(center),
                activation.top(),
                ACTIVATION_WIDTH,
                activation.bottom() - activation.top(),
                Some(self.paper),
            )));
        }

        for (event, row) in model.events().iter().zip(layout.rows()) {
            match event {
                Event::Message(message) if message.is_self() => {
                    let column = &layout.columns()[message.from];
                    nodes.extend(self.self_message(message, column, row));
                }
                Event::Message(message) => {
                    let from = &layout.columns()[message.from];
                    let to = &layout.columns()[message.to];
                    nodes.extend(self.message(message, from, to, row));
                }
                Event::Note(note) => {
                    let column = &layout.columns()[note.participant];
                    nodes.extend(self.note(note, column, row));
                }
            }
        }

        nodes
    }

    /// Arrow heads referenced by message lines.
    fn marker_definitions(&self) -> svg_element::Definitions {
        let filled = svg_element::Marker::new()
            .set("id", "arrow-filled")
            .set("viewBox", "0 0 10 10")
            .set("refX", 10)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", self.ink),
            );

        let open = svg_element::Marker::new()
            .set("id", "arrow-open")
            .set("viewBox", "0 0 10 10")
            .set("refX", 10)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10")
                    .set("fill", "none")
                    .set("stroke", self.ink),
            );

        svg_element::Definitions::new().add(filled).add(open)
    }

    fn actor(
        &self,
        column: &Column,
        y: f32,
        height: f32,
        label: &str,
        fill: Option<&Fill>,
    ) -> Vec<Box<dyn svg::Node>> {
        let frame = self.rect(
            column.x() + ACTOR_MARGIN,
            y + ACTOR_MARGIN,
            column.width() - 2.0 * ACTOR_MARGIN,
            height - 2.0 * ACTOR_MARGIN,
            fill.map(Fill::color),
        );
        let color = fill.and_then(Fill::text_color).map(|color| color.as_str());
        let text = self.text(column.center(), y + height / 2.0, label, color);
        vec![Box::new(frame) as Box<dyn svg::Node>, Box::new(text)]
    }

    fn message(
        &self,
        message: &Message,
        from: &Column,
        to: &Column,
        row: &Row,
    ) -> Vec<Box<dyn svg::Node>> {
        let (a, b) = (from.center(), to.center());
        let mut nodes: Vec<Box<dyn svg::Node>> = Vec::new();

        if !message.text.is_empty() {
            let y = row.y() + SIGNAL_MARGIN + 2.0 * SIGNAL_PADDING;
            nodes.push(Box::new(self.text((a + b) / 2.0, y, &message.text, None)));
        }

        let line = format!("M{},{} h{}", a, row.signal_y(), b - a);
        nodes.push(Box::new(
            self.path(line, message.line, None)
                .set("marker-end", format!("url(#{})", message.arrow.marker_id())),
        ));
        nodes
    }

    fn self_message(
        &self,
        message: &Message,
        column: &Column,
        row: &Row,
    ) -> Vec<Box<dyn svg::Node>> {
        let a = column.center();
        let mut nodes: Vec<Box<dyn svg::Node>> = Vec::new();

        if !message.text.is_empty() {
            let x = a + SELF_SIGNAL_WIDTH + SIGNAL_PADDING + row.text().width / 2.0;
            let y = row.y() + row.height() / 2.0;
            nodes.push(Box::new(self.text(x, y, &message.text, None)));
        }

        let top = row.y() + SIGNAL_MARGIN;
        let bottom = row.y() + row.height();
        let loop_x = a + SELF_SIGNAL_WIDTH * 2.0;
        let curve = format!("M{a},{top} C{loop_x},{top} {loop_x},{bottom} {a},{bottom}");
        nodes.push(Box::new(
            self.path(curve, message.line, None)
                .set("marker-end", format!("url(#{})", message.arrow.marker_id())),
        ));
        nodes
    }

    /// A note box with a folded top-right corner, right of the lifeline.
    fn note(&self, note: &Note, column: &Column, row: &Row) -> Vec<Box<dyn svg::Node>> {
        let x = column.center() + ACTOR_MARGIN;
        let y = row.y();
        let (width, height) = (row.width(), row.height());
        let m = NOTE_MARGIN;

        let fold_x = x - m + width - NOTE_FOLD;
        let right = x - m + width;
        let outline = format!(
            "M{fold_x},{top} L{fold_x},{fold_y} L{right},{fold_y} L{fold_x},{top} \
             L{left},{top} L{left},{bottom} L{right},{bottom} L{right},{fold_y} Z",
            top = y + m,
            fold_y = y + m + NOTE_FOLD,
            left = x + m,
            bottom = y - m + height,
        );

        let fill = note.fill.as_ref();
        let color = fill.and_then(Fill::text_color).map(|color| color.as_str());
        let shape = self.path(outline, LineStyle::Solid, fill.map(Fill::color));
        let text = self.text(x + width / 2.0, y + height / 2.0, &note.text, color);
        vec![Box::new(shape) as Box<dyn svg::Node>, Box::new(text)]
    }

    fn style(&self, fill: Option<&str>) -> String {
        format!(
            "stroke-width: 1; fill: {}; stroke: {};",
            fill.unwrap_or("none"),
            self.ink
        )
    }

    fn path(&self, d: String, line: LineStyle, fill: Option<&str>) -> svg_element::Path {
        let path = svg_element::Path::new()
            .set("d", d)
            .set("style", self.style(fill));
        match line {
            LineStyle::Dashed => path.set("stroke-dasharray", "7,4"),
            _ => path,
        }
    }

    fn rect(
        &self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<&str>,
    ) -> svg_element::Rectangle {
        svg_element::Rectangle::new()
            .set("x", x)
            .set("y", y)
            .set("width", width)
            .set("height", height)
            .set("style", self.style(fill))
    }

    /// Centered text, one element per line, stacked around `y`.
    fn text(&self, x: f32, y: f32, text: &str, color: Option<&str>) -> svg_element::Group {
        let lines: Vec<&str> = text.split('\n').collect();
        let first = y - (lines.len() - 1) as f32 / 2.0 * LINE_HEIGHT;

        lines
            .iter()
            .enumerate()
            .fold(svg_element::Group::new(), |group, (index, line)| {
                group.add(
                    svg_element::Text::new(*line)
                        .set("x", x)
                        .set("y", first + index as f32 * LINE_HEIGHT)
                        .set("fill", color.unwrap_or(self.ink))
                        .set("font-family", "Helvetica")
                        .set("text-anchor", "middle")
                        .set("dominant-baseline", "central"),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use yuml_core::sequence::{Activation, ArrowHead, Participant};

    use super::*;

    fn model() -> SequenceModel {
        let mut model = SequenceModel::new();
        for name in ["Patron", "Waiter"] {
            model.add_participant(Participant {
                name: name.to_string(),
                label: name.to_string(),
                fill: None,
            });
        }
        model
    }

    fn message(from: usize, to: usize, line: LineStyle, arrow: ArrowHead) -> Event {
        Event::Message(Message {
            from,
            to,
            text: "order food".to_string(),
            line,
            arrow,
            source_activation: None,
            target_activation: None,
        })
    }

    #[test]
    fn test_participants_drawn_twice_with_lifelines() {
        let svg = render(&model(), false);
        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<rect").count(), 4);
        assert_eq!(svg.matches("Patron").count(), 2);
        assert!(svg.contains("stroke: black;"));
        assert!(!svg.contains("stroke: white;"));
    }

    #[test]
    fn test_message_lines_reference_markers() {
        let mut model = model();
        model.push(message(0, 1, LineStyle::Solid, ArrowHead::Filled));
        model.push(message(1, 0, LineStyle::Dashed, ArrowHead::Filled));
        model.push(message(0, 1, LineStyle::Solid, ArrowHead::Open));
        let svg = render(&model, false);

        assert!(svg.contains(r#"id="arrow-filled""#));
        assert!(svg.contains(r#"id="arrow-open""#));
        assert_eq!(svg.matches("url(#arrow-filled)").count(), 2);
        assert_eq!(svg.matches("url(#arrow-open)").count(), 1);
        assert_eq!(svg.matches(r#"stroke-dasharray="7,4""#).count(), 1);
    }

    #[test]
    fn test_self_message_is_a_curve() {
        let mut model = model();
        model.push(message(1, 1, LineStyle::Solid, ArrowHead::Filled));
        let svg = render(&model, false);
        assert!(svg.contains(" C"));
    }

    #[test]
    fn test_note_fill_and_text_color() {
        let mut model = model();
        model.push(Event::Note(Note {
            participant: 0,
            text: "busy\nnight".to_string(),
            fill: Some(Fill::from_spec("navy")),
        }));
        let svg = render(&model, false);

        assert!(svg.contains("fill: #000080;"));
        assert!(svg.contains(r#"fill="white""#));
        assert!(svg.contains("busy"));
        assert!(svg.contains("night"));
    }

    #[test]
    fn test_activation_boxes_are_drawn() {
        let mut model = model();
        model.push(Event::Message(Message {
            from: 0,
            to: 1,
            text: "call".to_string(),
            line: LineStyle::Solid,
            arrow: ArrowHead::Filled,
            source_activation: None,
            target_activation: Some(Activation::Open),
        }));
        let svg = render(&model, false);
        assert_eq!(svg.matches("<rect").count(), 5);
    }

    #[test]
    fn test_dark_palette() {
        let svg = render(&model(), true);
        assert!(svg.contains("stroke: white;"));
        assert!(svg.contains(r#"fill="white""#));
        assert!(!svg.contains("stroke: black;"));
    }
}
