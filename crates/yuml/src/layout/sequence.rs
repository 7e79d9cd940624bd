//! Geometry of sequence diagrams.
//!
//! Participants are laid out as columns from left to right, events as rows
//! from top to bottom. Text extents are estimated from character counts, so
//! the layout does not depend on installed fonts.
//!
//! Every event asks for a minimum distance between the centers of the two
//! columns it spans (a self message or a note spans its column and the next
//! one). Columns are then pushed right until every requested distance holds.

use std::collections::BTreeMap;

use log::{trace, warn};

use yuml_core::sequence::{Activation, Event, Message, SequenceModel};

pub const DIAGRAM_MARGIN: f32 = 10.0;
pub const ACTOR_MARGIN: f32 = 10.0;
pub const ACTOR_PADDING: f32 = 10.0;
pub const SIGNAL_MARGIN: f32 = 5.0;
pub const SIGNAL_PADDING: f32 = 5.0;
pub const NOTE_MARGIN: f32 = 10.0;
pub const NOTE_PADDING: f32 = 5.0;
/// How far a self message loops out of its lifeline.
pub const SELF_SIGNAL_WIDTH: f32 = 20.0;
pub const LINE_HEIGHT: f32 = 18.0;
const CHAR_WIDTH: f32 = 8.5;

pub const ACTIVATION_WIDTH: f32 = 10.0;
/// Horizontal shift of each nested activation box.
pub const ACTIVATION_NESTING_OFFSET: f32 = 5.0;

/// Estimated extent of a block of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

impl TextSize {
    /// Measures `text`, whose lines are separated by `\n`.
    pub fn of(text: &str) -> Self {
        let (lines, longest) = text
            .split('\n')
            .fold((0usize, 0usize), |(lines, longest), line| {
                (lines + 1, longest.max(line.chars().count()))
            });
        Self {
            width: CHAR_WIDTH * longest as f32,
            height: LINE_HEIGHT * lines as f32,
        }
    }
}

/// Horizontal slot of one participant.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    x: f32,
    width: f32,
    text: TextSize,
}

impl Column {
    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn center(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn text(&self) -> TextSize {
        self.text
    }
}

/// Vertical slot of one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    y: f32,
    width: f32,
    height: f32,
    text: TextSize,
}

impl Row {
    /// Top of the row.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Width requested by the event, margins included.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn text(&self) -> TextSize {
        self.text
    }

    /// Height of the line of a message between two lifelines.
    pub fn signal_y(&self) -> f32 {
        self.y + self.height - SIGNAL_MARGIN - SIGNAL_PADDING
    }
}

/// A period during which a participant holds the focus of control.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationBox {
    participant: usize,
    level: usize,
    top: f32,
    bottom: f32,
}

impl ActivationBox {
    pub fn participant(&self) -> usize {
        self.participant
    }

    /// Nesting depth; `0` for a box opened on an inactive lifeline.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Left edge of the box on a lifeline centered at `center`.
    pub fn x(&self, center: f32) -> f32 {
        center - ACTIVATION_WIDTH / 2.0 + self.level as f32 * ACTIVATION_NESTING_OFFSET
    }
}

/// Positions of every participant, event and activation of a sequence
/// diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    columns: Vec<Column>,
    rows: Vec<Row>,
    activations: Vec<ActivationBox>,
    actors_height: f32,
    signals_height: f32,
    width: f32,
    height: f32,
}

impl Layout {
    pub fn compute(model: &SequenceModel) -> Self {
        let participants = model.participants();

        let mut columns: Vec<Column> = participants
            .iter()
            .map(|participant| {
                let text = TextSize::of(&participant.label);
                Column {
                    x: 0.0,
                    width: text.width + (ACTOR_PADDING + ACTOR_MARGIN) * 2.0,
                    text,
                }
            })
            .collect();
        let actors_height = participants
            .iter()
            .map(|participant| {
                TextSize::of(&participant.label).height + (ACTOR_PADDING + ACTOR_MARGIN) * 2.0
            })
            .fold(0.0, f32::max);

        let mut spacing = Spacing::new(columns.len());
        let mut rows = Vec::with_capacity(model.events().len());
        let mut signals_height = 0.0;

        for event in model.events() {
            let (text, left, right, width, height) = match event {
                Event::Message(message) => {
                    let text = TextSize::of(&message.text);
                    let mut width = text.width + (SIGNAL_MARGIN + SIGNAL_PADDING) * 2.0;
                    let height = text.height + (SIGNAL_MARGIN + SIGNAL_PADDING) * 2.0;
                    let (left, right) = if message.is_self() {
                        width += SELF_SIGNAL_WIDTH;
                        (message.from, message.from + 1)
                    } else {
                        (message.from.min(message.to), message.from.max(message.to))
                    };
                    spacing.ensure(left, right, width);
                    (text, left, right, width, height)
                }
                Event::Note(note) => {
                    let text = TextSize::of(&note.text);
                    let width = text.width + (NOTE_MARGIN + NOTE_PADDING) * 2.0;
                    let height = text.height + (NOTE_MARGIN + NOTE_PADDING) * 2.0;
                    let (left, right) = (note.participant, note.participant + 1);
                    spacing.ensure(left, right, width + 2.0 * ACTOR_MARGIN);
                    (text, left, right, width, height)
                }
            };
            trace!(left, right, width, height; "Measured event");

            rows.push(Row {
                y: DIAGRAM_MARGIN + actors_height + signals_height,
                width,
                height,
                text,
            });
            signals_height += height;
        }

        let actors_x = spacing.place(&mut columns);
        let mut layout = Self {
            columns,
            rows,
            activations: Vec::new(),
            actors_height,
            signals_height,
            width: 2.0 * DIAGRAM_MARGIN + actors_x,
            height: 2.0 * DIAGRAM_MARGIN + 2.0 * actors_height + signals_height,
        };
        layout.activations = layout.replay_activations(model);
        layout
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// One row per event, in event order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Activation boxes, outermost first.
    pub fn activation_boxes(&self) -> &[ActivationBox] {
        &self.activations
    }

    pub fn actors_height(&self) -> f32 {
        self.actors_height
    }

    pub fn signals_height(&self) -> f32 {
        self.signals_height
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Top of the upper row of participant boxes.
    pub fn top_actors_y(&self) -> f32 {
        DIAGRAM_MARGIN
    }

    /// Top of the lower row of participant boxes.
    pub fn bottom_actors_y(&self) -> f32 {
        DIAGRAM_MARGIN + self.actors_height + self.signals_height
    }

    pub fn lifeline_start(&self) -> f32 {
        DIAGRAM_MARGIN + self.actors_height - ACTOR_MARGIN
    }

    pub fn lifeline_end(&self) -> f32 {
        self.lifeline_start() + 2.0 * ACTOR_MARGIN + self.signals_height
    }

    /// Replays the activation markers of every message, keeping a stack of
    /// open boxes per participant. Boxes still open at the end of the
    /// diagram run to the end of the lifeline.
    fn replay_activations(&self, model: &SequenceModel) -> Vec<ActivationBox> {
        let mut open: Vec<Vec<f32>> = vec![Vec::new(); self.columns.len()];
        let mut boxes = Vec::new();

        for (event, row) in model.events().iter().zip(&self.rows) {
            let Event::Message(message) = event else {
                continue;
            };
            let (source_y, target_y) = endpoints_y(message, row);
            let markers = [
                (message.from, message.source_activation, source_y),
                (message.to, message.target_activation, target_y),
            ];
            for (participant, marker, y) in markers {
                let stack = &mut open[participant];
                match marker {
                    Some(Activation::Open) => stack.push(y),
                    Some(Activation::Close) => match stack.pop() {
                        Some(top) => boxes.push(ActivationBox {
                            participant,
                            level: stack.len(),
                            top,
                            bottom: y,
                        }),
                        None => warn!(participant; "Activation closed on an inactive lifeline"),
                    },
                    None => {}
                }
            }
        }

        let end = self.bottom_actors_y();
        for (participant, stack) in open.into_iter().enumerate() {
            for (level, top) in stack.into_iter().enumerate() {
                boxes.push(ActivationBox {
                    participant,
                    level,
                    top,
                    bottom: end,
                });
            }
        }

        boxes.sort_by_key(|activation| activation.level);
        boxes
    }
}

/// Heights at which a message leaves its source and reaches its target.
fn endpoints_y(message: &Message, row: &Row) -> (f32, f32) {
    if message.is_self() {
        (row.y + SIGNAL_MARGIN, row.y + row.height)
    } else {
        (row.signal_y(), row.signal_y())
    }
}

/// Distances requested between column centers.
struct Spacing {
    distances: Vec<BTreeMap<usize, f32>>,
    padding_right: Vec<f32>,
}

impl Spacing {
    fn new(columns: usize) -> Self {
        Self {
            distances: vec![BTreeMap::new(); columns],
            padding_right: vec![0.0; columns],
        }
    }

    /// Requests at least `distance` between the centers of columns `left`
    /// and `right`. Past the last column the distance becomes right padding.
    fn ensure(&mut self, left: usize, right: usize, distance: f32) {
        if right >= self.distances.len() {
            if let Some(padding) = self.padding_right.get_mut(left) {
                *padding = padding.max(distance);
            }
            return;
        }
        let entry = self.distances[left].entry(right).or_insert(0.0);
        *entry = entry.max(distance);
    }

    /// Moves columns right until every requested distance holds and
    /// returns the right edge of the last column.
    fn place(&self, columns: &mut [Column]) -> f32 {
        let mut actors_x = 0.0_f32;
        for index in 0..columns.len() {
            columns[index].x = columns[index].x.max(actors_x);
            let (x, width) = (columns[index].x, columns[index].width);

            for (&right, &distance) in &self.distances[index] {
                let other = &mut columns[right];
                let distance = distance.max(width / 2.0).max(other.width / 2.0);
                other.x = other.x.max(x + width / 2.0 + distance - other.width / 2.0);
            }

            actors_x = x + width + self.padding_right[index];
        }
        actors_x
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use yuml_core::{
        graph::LineStyle,
        sequence::{ArrowHead, Note, Participant},
    };

    use super::*;

    fn model(names: &[&str]) -> SequenceModel {
        let mut model = SequenceModel::new();
        for name in names {
            model.add_participant(Participant {
                name: name.to_string(),
                label: name.to_string(),
                fill: None,
            });
        }
        model
    }

    fn message(from: usize, to: usize, text: &str) -> Message {
        Message {
            from,
            to,
            text: text.to_string(),
            line: LineStyle::Solid,
            arrow: ArrowHead::Filled,
            source_activation: None,
            target_activation: None,
        }
    }

    #[test]
    fn test_text_size() {
        let size = TextSize::of("abcd\nab");
        assert!(approx_eq!(f32, size.width, 34.0));
        assert!(approx_eq!(f32, size.height, 36.0));

        let empty = TextSize::of("");
        assert!(approx_eq!(f32, empty.width, 0.0));
        assert!(approx_eq!(f32, empty.height, 18.0));
    }

    #[test]
    fn test_columns_without_events_touch() {
        let layout = Layout::compute(&model(&["ab", "abcd"]));
        let columns = layout.columns();

        // 2 chars: 17 + 40, 4 chars: 34 + 40
        assert!(approx_eq!(f32, columns[0].width(), 57.0));
        assert!(approx_eq!(f32, columns[1].x(), 57.0));
        assert!(approx_eq!(f32, layout.width(), 2.0 * 10.0 + 57.0 + 74.0));
        assert!(approx_eq!(f32, layout.actors_height(), 58.0));
        assert!(approx_eq!(f32, layout.height(), 20.0 + 2.0 * 58.0));
    }

    #[test]
    fn test_long_message_pushes_columns_apart() {
        let mut model = model(&["A", "B"]);
        model.push(Event::Message(message(0, 1, "a rather long message")));
        let layout = Layout::compute(&model);

        let row = &layout.rows()[0];
        let requested = 21.0 * 8.5 + 20.0;
        assert!(approx_eq!(f32, row.width(), requested));
        assert!(approx_eq!(f32, row.height(), 18.0 + 20.0));

        let [a, b] = layout.columns() else {
            panic!("expected two columns");
        };
        assert!(approx_eq!(f32, b.center() - a.center(), requested));
    }

    #[test]
    fn test_self_message_and_note_pad_last_column() {
        let mut model = model(&["A"]);
        model.push(Event::Message(message(0, 0, "loop")));
        model.push(Event::Note(Note {
            participant: 0,
            text: "a note".to_string(),
            fill: None,
        }));
        let layout = Layout::compute(&model);

        let note_width = 6.0 * 8.5 + 30.0 + 20.0;
        let column = &layout.columns()[0];
        assert!(approx_eq!(
            f32,
            layout.width(),
            20.0 + column.width() + note_width
        ));
        assert!(approx_eq!(
            f32,
            layout.rows()[1].y(),
            layout.rows()[0].y() + layout.rows()[0].height()
        ));
    }

    #[test]
    fn test_activation_boxes_nest_and_close_at_lifeline_end() {
        let mut model = model(&["A", "B"]);
        let mut call = message(0, 1, "call");
        call.target_activation = Some(Activation::Open);
        let mut nested = message(0, 1, "nested");
        nested.target_activation = Some(Activation::Open);
        let mut reply = message(1, 0, "reply");
        reply.source_activation = Some(Activation::Close);
        model.push(Event::Message(call));
        model.push(Event::Message(nested));
        model.push(Event::Message(reply));

        let layout = Layout::compute(&model);
        let boxes = layout.activation_boxes();
        assert_eq!(boxes.len(), 2);

        assert_eq!(boxes[0].level(), 0);
        assert!(approx_eq!(f32, boxes[0].top(), layout.rows()[0].signal_y()));
        assert!(approx_eq!(f32, boxes[0].bottom(), layout.bottom_actors_y()));

        assert_eq!(boxes[1].level(), 1);
        assert!(approx_eq!(f32, boxes[1].top(), layout.rows()[1].signal_y()));
        assert!(approx_eq!(f32, boxes[1].bottom(), layout.rows()[2].signal_y()));
        assert!(approx_eq!(f32, boxes[1].x(100.0), 100.0));
    }

    #[test]
    fn test_unmatched_close_is_ignored() {
        let mut model = model(&["A", "B"]);
        let mut reply = message(1, 0, "reply");
        reply.target_activation = Some(Activation::Close);
        model.push(Event::Message(reply));

        assert!(Layout::compute(&model).activation_boxes().is_empty());
    }
}
