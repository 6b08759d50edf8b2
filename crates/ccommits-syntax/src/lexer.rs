use crate::error::{LexError, Span};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Prefix that opens the diff git appends to verbose commit buffers.
pub const DIFF_MARKER: &str = "diff --git";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    CommitType,
    Scope,
    BreakingModifier,
    Colon,
    Whitespace,
    Newline,
    Comment,
    DiffMarker,
    Text,
    /// Never produced by the lexer; stands in for the end of input in errors.
    Eof,
}

impl TokenKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::CommitType => "commit type",
            TokenKind::Scope => "scope",
            TokenKind::BreakingModifier => "'!'",
            TokenKind::Colon => "':'",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Newline => "newline",
            TokenKind::Comment => "comment",
            TokenKind::DiffMarker => "diff marker",
            TokenKind::Text => "description",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The matched lexeme, verbatim. Use [`Token::value`] for the scope
    /// without its parentheses.
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn eof(span: Span) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: String::new(),
            span,
        }
    }

    pub fn value(&self) -> &str {
        match self.kind {
            TokenKind::Scope => self
                .text
                .strip_prefix('(')
                .and_then(|s| s.strip_suffix(')'))
                .unwrap_or(&self.text),
            _ => &self.text,
        }
    }

    /// Zero-width span just past this token.
    pub fn end_span(&self) -> Span {
        if self.kind == TokenKind::Newline {
            Span::empty(self.span.line + 1, 0, self.span.end)
        } else {
            let width = self.text.encode_utf16().count();
            Span::empty(self.span.line, self.span.col + width, self.span.end)
        }
    }

    /// Human readable form used in error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Newline => "newline".to_string(),
            kind => format!("{} {:?}", kind_noun(kind), self.text),
        }
    }
}

fn kind_noun(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::CommitType => "commit type",
        TokenKind::Scope => "scope",
        TokenKind::BreakingModifier | TokenKind::Colon => "token",
        TokenKind::Whitespace => "whitespace",
        TokenKind::Comment => "comment",
        TokenKind::DiffMarker => "diff marker",
        TokenKind::Text | TokenKind::Newline | TokenKind::Eof => "text",
    }
}

struct Rule {
    kind: TokenKind,
    pattern: Regex,
    line_start_only: bool,
}

impl Rule {
    fn new(kind: TokenKind, pattern: &str) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("lexer rule must be a valid regex"),
            line_start_only: false,
        }
    }

    fn at_line_start(kind: TokenKind, pattern: &str) -> Self {
        Self {
            line_start_only: true,
            ..Self::new(kind, pattern)
        }
    }
}

// Order matters: the first rule with a non-empty match wins, so the keyword
// alternation has to come before the catch-all `Text` rule.
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            TokenKind::CommitType,
            r"^(?:feat|fix|chore|ci|docs|refactor|test)",
        ),
        // One level of nested parentheses, so `(a(b))` is a scope but the
        // scope never runs on into a parenthesised description.
        Rule::new(TokenKind::Scope, r"^\((?:[^()\r\n]|\([^()\r\n]*\))*\)"),
        Rule::new(TokenKind::BreakingModifier, r"^!"),
        Rule::new(TokenKind::Colon, r"^:"),
        Rule::new(TokenKind::Whitespace, r"^[ \t]+"),
        Rule::new(TokenKind::Newline, r"^\r?\n"),
        Rule::at_line_start(TokenKind::Comment, r"^#[^\r\n]*"),
        Rule::at_line_start(TokenKind::DiffMarker, r"^diff --git[^\r\n]*"),
        Rule::new(TokenKind::Text, r"^[^\r\n]+"),
    ]
});

/// Lazy tokenizer over a commit message.
///
/// Yields one token per call to `next`. After the first [`LexError`] the
/// lexer is exhausted; lex new text by constructing a new `Lexer`.
pub struct Lexer<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
    col: usize,
    at_line_start: bool,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            line: 0,
            col: 0,
            at_line_start: true,
            failed: false,
        }
    }

    fn emit(&mut self, kind: TokenKind, lexeme: &str) -> Token {
        let span = Span::new(self.line, self.col, self.offset, self.offset + lexeme.len());

        for ch in lexeme.chars() {
            if ch == '\n' {
                self.line += 1;
                self.col = 0;
            } else {
                self.col += ch.len_utf16();
            }
        }
        self.offset += lexeme.len();
        self.at_line_start = kind == TokenKind::Newline;

        Token {
            kind,
            text: lexeme.to_string(),
            span,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let input = self.input;
        let rest = input.get(self.offset..)?;
        let ch = rest.chars().next()?;

        for rule in RULES.iter() {
            if rule.line_start_only && !self.at_line_start {
                continue;
            }
            if let Some(m) = rule.pattern.find(rest)
                && !m.is_empty()
            {
                return Some(Ok(self.emit(rule.kind, m.as_str())));
            }
        }

        self.failed = true;
        Some(Err(LexError::UnexpectedChar {
            ch,
            span: Span::new(self.line, self.col, self.offset, self.offset + ch.len_utf8()),
        }))
    }
}

/// Tokenizes the whole input, stopping at the first lexical error.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).collect()
}

/// Cuts `input` right after the first line that starts with `diff --git`.
///
/// The marker line itself is kept so the parser still sees where the diff
/// section begins; whatever git appended after it never reaches the lexer.
pub fn truncate_diff(input: &str) -> &str {
    let mut line_start = 0;
    for line in input.split_inclusive('\n') {
        if line.starts_with(DIFF_MARKER) {
            return &input[..line_start + line.len()];
        }
        line_start += line.len();
    }
    input
}
