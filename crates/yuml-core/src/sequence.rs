//! Sequence diagram model.
//!
//! Sequence diagrams are not handed to the layout engine. They are compiled
//! into an ordered list of participants and events which is laid out and
//! drawn directly.

use crate::{color::Fill, graph::LineStyle};

/// Activation marker on a message: `(` opens an activation box, `)` closes
/// the innermost open one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Open,
    Close,
}

impl Activation {
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '(' => Some(Activation::Open),
            ')' => Some(Activation::Close),
            _ => None,
        }
    }
}

/// Arrow marker at the end of a message line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowHead {
    /// Synchronous call or reply.
    Filled,
    /// Asynchronous message.
    Open,
}

impl ArrowHead {
    /// Id of the SVG marker drawing this head.
    pub fn marker_id(self) -> &'static str {
        match self {
            ArrowHead::Filled => "arrow-filled",
            ArrowHead::Open => "arrow-open",
        }
    }
}

/// An object with a lifeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    /// Record name identifying the participant.
    pub name: String,
    /// Display text; lines are separated by `\n`.
    pub label: String,
    pub fill: Option<Fill>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Index of the sending participant.
    pub from: usize,
    /// Index of the receiving participant.
    pub to: usize,
    pub text: String,
    pub line: LineStyle,
    pub arrow: ArrowHead,
    pub source_activation: Option<Activation>,
    pub target_activation: Option<Activation>,
}

impl Message {
    pub fn is_self(&self) -> bool {
        self.from == self.to
    }
}

/// A note attached to the right of a participant's lifeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub participant: usize,
    pub text: String,
    pub fill: Option<Fill>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Message(Message),
    Note(Note),
}

/// A compiled sequence diagram.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceModel {
    participants: Vec<Participant>,
    events: Vec<Event>,
}

impl SequenceModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant and returns its index.
    pub fn add_participant(&mut self, participant: Participant) -> usize {
        self.participants.push(participant);
        self.participants.len() - 1
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
