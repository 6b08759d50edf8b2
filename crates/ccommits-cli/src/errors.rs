use ccommits_syntax::{CommitType, ParseError, Span, TokenKind};
use colored::*;
use std::fmt;

/// Violation report with the offending header line and a caret under the
/// first bad character.
pub struct EnhancedError {
    pub message: String,
    pub span: Option<Span>,
    pub file: Option<String>,
    pub source: Option<String>,
    pub suggestion: Option<String>,
}

impl EnhancedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
            file: None,
            source: None,
            suggestion: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Display the error with colored output and context
    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.message.bold());

        if let (Some(file), Some(span)) = (&self.file, &self.span) {
            eprintln!(
                "  {} {}:{}:{}",
                "-->".blue().bold(),
                file,
                span.line + 1,
                span.col + 1
            );
        }

        if let (Some(source), Some(span)) = (&self.source, &self.span) {
            eprintln!();
            self.display_source_with_span(source, span);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!();
            eprintln!("{} {}", "suggestion:".green().bold(), suggestion);
        }
    }

    fn display_source_with_span(&self, source: &str, span: &Span) {
        let Some(line) = source.lines().nth(span.line) else {
            return;
        };

        let line_num = (span.line + 1).to_string();
        let width = line_num.len();

        eprintln!("{:>width$} {}", "", "|".blue().bold(), width = width);
        eprintln!(
            "{} {} {}",
            line_num.blue().bold(),
            "|".blue().bold(),
            line
        );
        eprintln!(
            "{:>width$} {} {}{}",
            "",
            "|".blue().bold(),
            " ".repeat(visual_column(line, span.col)),
            "^".red().bold(),
            width = width
        );
    }
}

/// Number of chars before the given UTF-16 column.
fn visual_column(line: &str, col: usize) -> usize {
    let mut units = 0;
    let mut chars = 0;
    for ch in line.chars() {
        if units >= col {
            break;
        }
        units += ch.len_utf16();
        chars += 1;
    }
    chars
}

impl fmt::Display for EnhancedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for EnhancedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnhancedError: {}", self.message)
    }
}

impl std::error::Error for EnhancedError {}

/// Builds the report for a commit message that failed to parse.
pub fn enhance_error(err: &ParseError, file: String, source: String) -> EnhancedError {
    let mut enhanced = EnhancedError::new(format!("Violation: {}", err))
        .with_span(err.span())
        .with_file(file)
        .with_source(source);

    if let Some(suggestion) = suggestion_for(err) {
        enhanced = enhanced.with_suggestion(suggestion);
    }

    enhanced
}

fn suggestion_for(err: &ParseError) -> Option<String> {
    let ParseError::Grammar(failure) = err else {
        return Some("Remove the stray control character".to_string());
    };

    if failure.expects(TokenKind::CommitType) {
        let types: Vec<&str> = CommitType::ALL.iter().map(|t| t.as_str()).collect();
        Some(format!("Start the header with one of: {}", types.join(", ")))
    } else if failure.expects(TokenKind::Colon) {
        Some("Separate the type from the description with ': '".to_string())
    } else if failure.expects(TokenKind::Whitespace) {
        Some("Add a space after ':'".to_string())
    } else if failure.expects(TokenKind::Text) {
        Some("Describe the change after 'type: '".to_string())
    } else {
        None
    }
}
