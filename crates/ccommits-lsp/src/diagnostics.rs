use ccommits_syntax::{ParseError, header_is_empty, parse_commit};
use tower_lsp::lsp_types::*;
use tracing::debug;

pub const SOURCE: &str = "ccommits";

/// Zero-based position of the first violation.
pub fn map_position(error: &ParseError) -> Position {
    let span = error.span();
    Position {
        line: span.line as u32,
        character: span.col as u32,
    }
}

/// One code unit wide, starting at the violation, regardless of how long
/// the offending token is.
pub fn violation_range(error: &ParseError) -> Range {
    let start = map_position(error);
    Range {
        start,
        end: Position {
            line: start.line,
            character: start.character + 1,
        },
    }
}

pub fn violation_to_diagnostic(error: &ParseError, severity: DiagnosticSeverity) -> Diagnostic {
    Diagnostic {
        range: violation_range(error),
        severity: Some(severity),
        code: None,
        code_description: None,
        source: Some(SOURCE.to_string()),
        message: format!("Violation: {}", error),
        related_information: None,
        tags: None,
        data: None,
    }
}

/// Validates a commit message buffer, returning at most one diagnostic.
pub fn analyze(content: &str) -> Vec<Diagnostic> {
    analyze_with(content, DiagnosticSeverity::ERROR)
}

pub fn analyze_with(content: &str, severity: DiagnosticSeverity) -> Vec<Diagnostic> {
    // Git rejects messages with an empty first line on its own.
    if header_is_empty(content) {
        return Vec::new();
    }

    match parse_commit(content) {
        Ok(_) => Vec::new(),
        Err(error) => {
            debug!("Commit message violation: {}", error);
            vec![violation_to_diagnostic(&error, severity)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(content: &str) -> Diagnostic {
        let mut diagnostics = analyze(content);
        assert_eq!(diagnostics.len(), 1, "expected one diagnostic for {:?}", content);
        diagnostics.remove(0)
    }

    #[test]
    fn test_valid_header() {
        assert!(analyze("feat: add login\n").is_empty());
        assert!(analyze("feat(api)!: change shape\n").is_empty());
    }

    #[test]
    fn test_range_is_one_character_wide() {
        let diagnostic = single("foobar");
        assert_eq!(diagnostic.range.start, Position::new(0, 0));
        assert_eq!(diagnostic.range.end, Position::new(0, 1));
    }

    #[test]
    fn test_message_and_metadata() {
        let diagnostic = single("feat:my message\n");
        assert_eq!(
            diagnostic.message,
            "Violation: 1:6: unexpected text \"my message\" (expected whitespace)"
        );
        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(diagnostic.source.as_deref(), Some(SOURCE));
    }

    #[test]
    fn test_lex_error_position() {
        let error = parse_commit("fix: a\rb").unwrap_err();
        assert_eq!(map_position(&error), Position::new(0, 6));
    }

    #[test]
    fn test_configured_severity() {
        let diagnostics = analyze_with("nope", DiagnosticSeverity::WARNING);
        assert_eq!(diagnostics[0].severity, Some(DiagnosticSeverity::WARNING));
    }
}
