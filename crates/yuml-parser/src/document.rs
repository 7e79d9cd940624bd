//! Splitting a document into directives and instruction lines.

use std::sync::OnceLock;

use regex::Regex;
use yuml_core::diagram::{DiagramKind, Direction};

use crate::{
    dialect::SourceLine,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
};

static DIRECTIVE: OnceLock<Regex> = OnceLock::new();

fn directive() -> &'static Regex {
    DIRECTIVE.get_or_init(|| {
        Regex::new(r"^//\s+\{\s*(\w+)\s*:\s*(\w+)\s*\}$").expect("directive regex must compile")
    })
}

/// Instruction lines of a document and the settings its directives chose.
#[derive(Debug)]
pub(crate) struct Document<'a> {
    pub kind: Option<DiagramKind>,
    pub direction: Direction,
    pub lines: Vec<SourceLine<'a>>,
}

impl<'a> Document<'a> {
    /// Scans `source`, starting from the given settings.
    ///
    /// Directives apply to the whole document wherever they appear. A
    /// directive with an invalid value leaves the previous setting in place
    /// and emits a warning.
    pub fn scan(
        source: &'a str,
        kind: Option<DiagramKind>,
        direction: Direction,
        collector: &mut DiagnosticCollector,
    ) -> Self {
        let mut document = Self {
            kind,
            direction,
            lines: Vec::new(),
        };

        let mut offset = 0;
        for piece in source.split(['\r', '\n']) {
            let start = offset;
            offset += piece.len() + 1;

            let text = piece.trim();
            if text.is_empty() {
                continue;
            }
            let line = SourceLine {
                text,
                offset: start + piece.len() - piece.trim_start().len(),
            };

            if text.starts_with("//") {
                document.apply_directive(line, collector);
            } else {
                document.lines.push(line);
            }
        }
        document
    }

    fn apply_directive(&mut self, line: SourceLine<'_>, collector: &mut DiagnosticCollector) {
        let Some(captures) = directive().captures(line.text) else {
            return;
        };
        let (Some(key), Some(value)) = (captures.get(1), captures.get(2)) else {
            return;
        };
        let span = |m: regex::Match<'_>| Span::new(m.range()).offset(line.offset);

        match key.as_str() {
            "type" => match value.as_str().parse::<DiagramKind>() {
                Ok(kind) => self.kind = Some(kind),
                Err(_) => collector.emit(
                    Diagnostic::warning(format!("invalid diagram type `{}`", value.as_str()))
                        .with_code(ErrorCode::W300)
                        .with_label(span(value), "not a yUML diagram type")
                        .with_help(
                            "expected one of class, usecase, activity, state, deployment, \
                             package or sequence",
                        ),
                ),
            },
            "direction" => match Direction::from_directive(value.as_str()) {
                Some(direction) => self.direction = direction,
                None => collector.emit(
                    Diagnostic::warning(format!("invalid direction `{}`", value.as_str()))
                        .with_code(ErrorCode::W301)
                        .with_label(span(value), "not a layout direction")
                        .with_help("expected topDown, leftToRight or rightToLeft"),
                ),
            },
            "generate" => {
                let message = match value.as_str() {
                    "true" | "false" => "the generate directive has no effect".to_string(),
                    other => format!("invalid generate value `{other}`"),
                };
                collector.emit(
                    Diagnostic::warning(message)
                        .with_code(ErrorCode::W302)
                        .with_label(span(value), "ignored"),
                );
            }
            other => collector.emit(
                Diagnostic::warning(format!("unknown directive `{other}`"))
                    .with_code(ErrorCode::W303)
                    .with_label(span(key), "ignored"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> (Document<'_>, Vec<Diagnostic>) {
        let mut collector = DiagnosticCollector::new();
        let document = Document::scan(source, None, Direction::TopDown, &mut collector);
        (document, collector.finish())
    }

    #[test]
    fn test_lines_are_trimmed_with_offsets() {
        let (document, _) = scan("[A]\r\n  [B]-[C]  \n\n");
        let lines: Vec<(&str, usize)> = document.lines.iter().map(|l| (l.text, l.offset)).collect();
        assert_eq!(lines, vec![("[A]", 0), ("[B]-[C]", 7)]);
    }

    #[test]
    fn test_directives_set_kind_and_direction() {
        let (document, warnings) =
            scan("[A]->[B]\n// {type:activity}\n//   { direction : leftToRight }");
        assert_eq!(document.kind, Some(DiagramKind::Activity));
        assert_eq!(document.direction, Direction::LeftToRight);
        assert_eq!(document.lines.len(), 1);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_plain_comments_are_ignored() {
        let (document, warnings) = scan("// just a comment\n//{type:class}");
        assert_eq!(document.kind, None);
        assert!(document.lines.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_invalid_values_keep_previous_settings() {
        let (document, warnings) = scan(
            "// {type:state}\n// {type:flowchart}\n// {direction:sideways}\n// {generate:true}\n// {colour:red}",
        );
        assert_eq!(document.kind, Some(DiagramKind::State));
        assert_eq!(document.direction, Direction::TopDown);

        let codes: Vec<_> = warnings.iter().filter_map(Diagnostic::code).collect();
        assert_eq!(
            codes,
            vec![ErrorCode::W300, ErrorCode::W301, ErrorCode::W302, ErrorCode::W303]
        );
    }

    #[test]
    fn test_warning_spans_point_at_value() {
        let source = "[A]\n// {type:flowchart}";
        let (_, warnings) = scan(source);
        let range = warnings[0].labels()[0].span().range();
        assert_eq!(&source[range], "flowchart");
    }
}
