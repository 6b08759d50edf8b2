use crate::lexer::{Token, TokenKind};
use smallvec::SmallVec;
use std::fmt;

/// Source location of a token.
///
/// `line` and `col` are zero-based; `col` counts UTF-16 code units so it can
/// be handed to an editor unchanged. `start`/`end` are byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub col: usize,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(line: usize, col: usize, start: usize, end: usize) -> Self {
        Self { line, col, start, end }
    }

    /// Zero-width span at a single position.
    pub fn empty(line: usize, col: usize, offset: usize) -> Self {
        Self { line, col, start: offset, end: offset }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    UnexpectedChar { ch: char, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
        }
    }

    /// Byte offset at which no lexer rule matched.
    pub fn offset(&self) -> usize {
        self.span().start
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedChar { ch, span } => {
                write!(f, "unexpected character {:?} at byte {}", ch, span.start)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// The first token that did not fit the grammar, together with every token
/// kind that would have been accepted in its place.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    pub found: Token,
    pub expected: SmallVec<[TokenKind; 4]>,
}

impl ParseFailure {
    pub fn new(found: Token, expected: &[TokenKind]) -> Self {
        let mut kinds: SmallVec<[TokenKind; 4]> = SmallVec::new();
        for kind in expected {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }
        Self { found, expected: kinds }
    }

    pub fn span(&self) -> Span {
        self.found.span
    }

    pub fn expects(&self, kind: TokenKind) -> bool {
        self.expected.contains(&kind)
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unexpected {}", self.found.describe())?;

        let names: Vec<&str> = self.expected.iter().map(|k| k.display_name()).collect();
        match names.split_last() {
            None => Ok(()),
            Some((last, [])) => write!(f, " (expected {})", last),
            Some((last, rest)) => write!(f, " (expected {} or {})", rest.join(", "), last),
        }
    }
}

impl std::error::Error for ParseFailure {}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Lex(LexError),
    Grammar(ParseFailure),
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(e) => e.span(),
            ParseError::Grammar(e) => e.span(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = self.span();
        write!(f, "{}:{}: ", span.line + 1, span.col + 1)?;
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::Grammar(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            ParseError::Grammar(e) => Some(e),
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

impl From<ParseFailure> for ParseError {
    fn from(err: ParseFailure) -> Self {
        ParseError::Grammar(err)
    }
}
