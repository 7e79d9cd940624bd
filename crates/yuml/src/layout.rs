//! Layout of diagrams drawn without the external layout engine.
//!
//! Graph diagrams are positioned by Graphviz; only sequence diagrams are laid
//! out here.

pub mod sequence;
