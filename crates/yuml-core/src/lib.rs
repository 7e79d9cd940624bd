//! yUML Core Types and Definitions
//!
//! This crate provides the foundational types shared by the yUML parser and
//! renderer. It includes:
//!
//! - **Colors**: Named and hex colors with label contrast ([`color::Color`])
//! - **Diagram**: Diagram kinds and layout directions ([`diagram`] module)
//! - **Graph**: The compiled graph model of nodes and edges ([`graph`] module)
//! - **DOT**: Serialization of a graph into a Graphviz document ([`dot`] module)
//! - **Sequence**: Participants and events of a sequence diagram ([`sequence`] module)

pub mod color;
pub mod diagram;
pub mod dot;
pub mod graph;
pub mod sequence;
