//! Error codes for yUML diagnostics.
//!
//! Codes are grouped by where the problem was found:
//! - `E1xx` - notation grammar errors, always fatal
//! - `E2xx` - configuration errors, always fatal
//! - `W3xx` - directive warnings, collected and reported

use std::fmt;

/// Broad family an [`ErrorCode`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A notation line could not be parsed.
    Grammar,
    /// The diagram type or direction could not be resolved.
    Configuration,
    /// A `// {key:value}` directive was ignored.
    Directive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Grammar Errors (E1xx)
    // =========================================================================
    /// Unrecognized token.
    ///
    /// A token on a notation line matches none of the rules of the active
    /// dialect, e.g. `[A]~[B]` in a class diagram.
    E100,

    /// Malformed association.
    ///
    /// A class association must have exactly one `-` (or `-.-`) separating
    /// its two ends, e.g. `[A]1-2-3[B]` is rejected.
    E101,

    /// Malformed message.
    ///
    /// A sequence message did not end in `>`, `.>` or `>>`, optionally
    /// followed by an activation marker.
    E102,

    // =========================================================================
    // Configuration Errors (E2xx)
    // =========================================================================
    /// Missing diagram type.
    E200,

    /// Invalid diagram type.
    ///
    /// Valid types: `class`, `usecase`, `activity`, `state`, `deployment`,
    /// `package`, `sequence`.
    E201,

    /// Invalid direction.
    ///
    /// Valid directions: `TB`, `LR`, `RL` or `topDown`, `leftToRight`,
    /// `rightToLeft`.
    E202,

    // =========================================================================
    // Directive Warnings (W3xx)
    // =========================================================================
    /// Invalid value for the `type` directive; the previous type is kept.
    W300,

    /// Invalid value for the `direction` directive; the previous direction
    /// is kept.
    W301,

    /// The `generate` directive is accepted but has no effect.
    W302,

    /// Unknown directive key.
    W303,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::W300 => "W300",
            ErrorCode::W301 => "W301",
            ErrorCode::W302 => "W302",
            ErrorCode::W303 => "W303",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unrecognized token",
            ErrorCode::E101 => "malformed association",
            ErrorCode::E102 => "malformed message",
            ErrorCode::E200 => "missing diagram type",
            ErrorCode::E201 => "invalid diagram type",
            ErrorCode::E202 => "invalid direction",
            ErrorCode::W300 => "invalid type directive",
            ErrorCode::W301 => "invalid direction directive",
            ErrorCode::W302 => "directive has no effect",
            ErrorCode::W303 => "unknown directive",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::E100 | ErrorCode::E101 | ErrorCode::E102 => ErrorCategory::Grammar,
            ErrorCode::E200 | ErrorCode::E201 | ErrorCode::E202 => ErrorCategory::Configuration,
            ErrorCode::W300 | ErrorCode::W301 | ErrorCode::W302 | ErrorCode::W303 => {
                ErrorCategory::Directive
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
