//! Diagram kinds and layout directions.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a diagram kind or direction name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what} `{value}`")]
pub struct UnknownVariant {
    what: &'static str,
    value: String,
}

impl UnknownVariant {
    fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }

    /// Returns the rejected value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The seven yUML diagram dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    #[default]
    Class,
    Usecase,
    Activity,
    State,
    Deployment,
    Package,
    Sequence,
}

impl DiagramKind {
    /// All dialects, in documentation order.
    pub const ALL: [DiagramKind; 7] = [
        DiagramKind::Class,
        DiagramKind::Usecase,
        DiagramKind::Activity,
        DiagramKind::State,
        DiagramKind::Deployment,
        DiagramKind::Package,
        DiagramKind::Sequence,
    ];

    /// Returns the name used in `// {type:...}` directives.
    pub fn as_str(self) -> &'static str {
        match self {
            DiagramKind::Class => "class",
            DiagramKind::Usecase => "usecase",
            DiagramKind::Activity => "activity",
            DiagramKind::State => "state",
            DiagramKind::Deployment => "deployment",
            DiagramKind::Package => "package",
            DiagramKind::Sequence => "sequence",
        }
    }

    /// Returns `true` for dialects compiled into a graph for the layout engine.
    pub fn is_graph(self) -> bool {
        !matches!(self, DiagramKind::Sequence)
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagramKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("diagram type", s))
    }
}

/// Layout direction of a graph diagram.
///
/// Accepts both the Graphviz `rankdir` values (`TB`, `LR`, `RL`) and the
/// directive spellings (`topDown`, `leftToRight`, `rightToLeft`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TB", alias = "topDown")]
    TopDown,
    #[serde(rename = "LR", alias = "leftToRight")]
    LeftToRight,
    #[serde(rename = "RL", alias = "rightToLeft")]
    RightToLeft,
}

impl Direction {
    /// Returns the Graphviz `rankdir` value.
    pub fn rankdir(self) -> &'static str {
        match self {
            Direction::TopDown => "TB",
            Direction::LeftToRight => "LR",
            Direction::RightToLeft => "RL",
        }
    }

    /// Parses the value of a `// {direction:...}` directive.
    pub fn from_directive(value: &str) -> Option<Self> {
        match value {
            "topDown" => Some(Direction::TopDown),
            "leftToRight" => Some(Direction::LeftToRight),
            "rightToLeft" => Some(Direction::RightToLeft),
            _ => None,
        }
    }

    /// Returns `true` when ranks are stacked vertically.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::TopDown)
    }

    /// Compass point on which edges enter a node, facing the previous rank.
    pub fn entry_compass(self) -> &'static str {
        match self {
            Direction::TopDown => "n",
            Direction::LeftToRight => "w",
            Direction::RightToLeft => "e",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rankdir())
    }
}

impl FromStr for Direction {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TB" => Ok(Direction::TopDown),
            "LR" => Ok(Direction::LeftToRight),
            "RL" => Ok(Direction::RightToLeft),
            other => {
                Self::from_directive(other).ok_or_else(|| UnknownVariant::new("direction", s))
            }
        }
    }
}
