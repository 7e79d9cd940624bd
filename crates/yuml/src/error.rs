//! Error types for yUML operations.
//!
//! [`YumlError`] wraps everything that can go wrong between reading a
//! document and producing its output.

use std::io;

use thiserror::Error;

use yuml_parser::error::ParseError;

use crate::render::RenderError;

/// The main error type for yUML operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries structured diagnostics with source spans
/// together with the source they point into, for rich error reporting.
/// Configuration errors (`E201`, `E202`) use the same variant with an empty
/// source.
#[derive(Debug, Error)]
pub enum YumlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("document does not compile into a graph")]
    NotAGraph,
}

impl YumlError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
