//! Error and diagnostic system for the yUML compiler.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing into the source document
//! - Severity levels
//! - A diagnostic collector for warnings gathered across a document
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, source
//! locations, and help text. Fatal diagnostics are wrapped in [`ParseError`]
//! and abort the compilation of the whole document.
//!
//! # Example
//!
//! ```
//! # use yuml_parser::error::{Diagnostic, ErrorCode};
//! # use yuml_parser::Span;
//!
//! let span = Span::new(10..14);
//!
//! let diag = Diagnostic::error("unrecognized token `~~~~`")
//!     .with_code(ErrorCode::E100)
//!     .with_label(span, "not valid in a class diagram")
//!     .with_help("nodes are written as `[Name]`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::{ErrorCategory, ErrorCode};
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
