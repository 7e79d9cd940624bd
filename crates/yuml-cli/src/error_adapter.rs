//! Reporting [`YumlError`] through miette.
//!
//! A failed compilation carries the fatal diagnostic first, followed by the
//! directive warnings collected before it. Each one becomes its own
//! [`Reportable`].
//!
//! yUML error codes shape the report:
//! - the miette code is namespaced by category, e.g. `yuml::grammar::E101`;
//! - the primary label names what the code means;
//! - a diagnostic without its own help gets one for its code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity, SourceCode, SourceSpan};

use yuml::YumlError;
use yuml_parser::error::{Diagnostic, ErrorCategory, ErrorCode, Label};

const DIAGRAM_TYPES: &str = "class, usecase, activity, state, deployment, package, sequence";

#[derive(Debug)]
enum Origin<'a> {
    /// A parser diagnostic and the document it points into. Configuration
    /// diagnostics come with an empty document.
    Parse { diag: &'a Diagnostic, src: &'a str },
    /// Any other failure; there is nothing to point at.
    Failure(&'a YumlError),
}

/// One miette report: a single parser diagnostic, or a whole
/// non-diagnostic [`YumlError`].
#[derive(Debug)]
pub struct Reportable<'a> {
    origin: Origin<'a>,
}

impl<'a> Reportable<'a> {
    pub fn diagnostic(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self {
            origin: Origin::Parse { diag, src },
        }
    }

    pub fn failure(err: &'a YumlError) -> Self {
        Self {
            origin: Origin::Failure(err),
        }
    }

    /// The yUML code behind this report, if it came from the parser.
    pub fn yuml_code(&self) -> Option<ErrorCode> {
        match self.origin {
            Origin::Parse { diag, .. } => diag.code(),
            Origin::Failure(_) => None,
        }
    }

    /// The diagnostic, when it has a document to show.
    fn with_snippet(&self) -> Option<&'a Diagnostic> {
        match self.origin {
            Origin::Parse { diag, src } if !src.is_empty() => Some(diag),
            _ => None,
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.origin {
            Origin::Parse { diag, .. } => f.write_str(diag.message()),
            Origin::Failure(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.origin {
            Origin::Parse { .. } => None,
            Origin::Failure(err) => std::error::Error::source(err),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let code = match self.origin {
            Origin::Parse { diag, .. } => {
                let code = diag.code()?;
                format!("yuml::{}::{code}", category_name(code.category()))
            }
            Origin::Failure(YumlError::Io(_)) => "yuml::io".to_string(),
            Origin::Failure(YumlError::Parse { .. }) => return None,
            Origin::Failure(YumlError::Render(_)) => "yuml::render".to_string(),
            Origin::Failure(YumlError::NotAGraph) => "yuml::not_a_graph".to_string(),
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<Severity> {
        match self.origin {
            Origin::Parse { diag, .. } if diag.severity().is_warning() => Some(Severity::Warning),
            _ => Some(Severity::Error),
        }
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let help = match self.origin {
            Origin::Parse { diag, .. } => match diag.help() {
                Some(help) => help.to_string(),
                None => help_for(diag.code()?),
            },
            Origin::Failure(YumlError::Render(_)) => {
                "install Graphviz or pass `--dot` to write the DOT document".to_string()
            }
            Origin::Failure(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match &self.origin {
            Origin::Parse { src, .. } if !src.is_empty() => Some(src as &dyn SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let diag = self.with_snippet()?;
        if diag.labels().is_empty() {
            return None;
        }

        let code = diag.code();
        Some(Box::new(
            diag.labels()
                .iter()
                .map(move |label| labeled_span(label, code)),
        ))
    }
}

fn category_name(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Grammar => "grammar",
        ErrorCategory::Configuration => "configuration",
        ErrorCategory::Directive => "directive",
    }
}

/// Help shown for a coded diagnostic that carries none of its own.
fn help_for(code: ErrorCode) -> String {
    match (code.category(), code) {
        (ErrorCategory::Grammar, ErrorCode::E102) => {
            "a message ends in `>`, `.>` or `>>`, optionally followed by `(` or `)`".to_string()
        }
        (ErrorCategory::Grammar, _) => {
            "a `[`, `-` or `>` that is part of a name needs a `\\` before it".to_string()
        }
        (ErrorCategory::Configuration, ErrorCode::E202) => {
            "valid directions are TB, LR and RL".to_string()
        }
        (ErrorCategory::Configuration, _) => format!("valid diagram types are {DIAGRAM_TYPES}"),
        (ErrorCategory::Directive, ErrorCode::W302) => {
            "output is always generated, the directive can be removed".to_string()
        }
        (ErrorCategory::Directive, _) => {
            "directives look like `// {type:class}` or `// {direction:leftToRight}`".to_string()
        }
    }
}

/// The primary label also says what its diagnostic code means.
fn labeled_span(label: &Label, code: Option<ErrorCode>) -> LabeledSpan {
    let span = SourceSpan::new(label.span().start().into(), label.span().len());
    if !label.is_primary() {
        return LabeledSpan::new_with_span(Some(label.message().to_string()), span);
    }

    let message = match code {
        Some(code) if label.message().is_empty() => code.description().to_string(),
        Some(code) => format!("{} ({})", label.message(), code.description()),
        None => label.message().to_string(),
    };
    LabeledSpan::new_primary_with_span(Some(message), span)
}

/// Convert a [`YumlError`] into a list of reportable errors.
///
/// [`YumlError::Parse`] yields one [`Reportable`] per diagnostic, every other
/// variant a single one.
pub fn to_reportables(err: &YumlError) -> Vec<Reportable<'_>> {
    match err {
        YumlError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::diagnostic(diag, src))
            .collect(),
        _ => vec![Reportable::failure(err)],
    }
}
