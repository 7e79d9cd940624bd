//! Collector for the non-fatal diagnostics of one compilation.

use log::log;

use crate::error::{Diagnostic, ParseError};

/// Accumulates warnings while a document is compiled.
///
/// Every emitted diagnostic is also logged at the level matching its
/// severity, so that library users without a diagnostic UI still see it.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        let code = diagnostic.code().map(|code| code.as_str()).unwrap_or("-");
        log!(diagnostic.severity().log_level(), code; "{}", diagnostic.message());
        self.diagnostics.push(diagnostic);
    }

    /// Returns the collected diagnostics of a successful compilation.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Turns a fatal diagnostic into a [`ParseError`] carrying it first,
    /// followed by everything collected so far.
    pub fn fail(self, fatal: Diagnostic) -> ParseError {
        let mut diagnostics = Vec::with_capacity(self.diagnostics.len() + 1);
        diagnostics.push(fatal);
        diagnostics.extend(self.diagnostics);
        ParseError::new(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_collector_finish_returns_warnings() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("generate has no effect").with_code(ErrorCode::W302));

        let warnings = collector.finish();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::W302));
    }

    #[test]
    fn test_collector_fail_puts_fatal_first() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("unknown directive `foo`"));

        let err = collector.fail(Diagnostic::error("missing diagram type"));
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[0].message(), "missing diagram type");
        assert!(err.diagnostics()[1].severity().is_warning());
    }
}
