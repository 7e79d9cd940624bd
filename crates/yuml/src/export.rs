//! SVG export of laid-out diagrams.
//!
//! ```text
//! SequenceModel
//!     ↓ layout::sequence
//! Layout
//!     ↓ export::sequence (this module)
//! SVG document
//! ```

pub mod sequence;
