mod header;
mod sections;

use crate::ast::CommitMessage;
use crate::error::{LexError, ParseError, ParseFailure, Span};
use crate::lexer::{Lexer, Token, TokenKind, truncate_diff};

/// Recursive-descent parser for commit messages.
///
/// Pulls tokens one at a time from any token source, keeping a single token
/// of lookahead. Parsing stops at the first token that does not fit; there is
/// no recovery and no backtracking.
pub struct Parser<I> {
    tokens: I,
    lookahead: Option<Token>,
    end: Span,
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            lookahead: None,
            end: Span::default(),
        }
    }

    pub(super) fn peek(&mut self) -> Result<Option<&Token>, ParseError> {
        if self.lookahead.is_none() {
            self.lookahead = self.tokens.next().transpose()?;
        }
        Ok(self.lookahead.as_ref())
    }

    #[inline]
    pub(super) fn peek_kind(&mut self) -> Result<TokenKind, ParseError> {
        Ok(self.peek()?.map_or(TokenKind::Eof, |t| t.kind))
    }

    pub(super) fn advance(&mut self) -> Result<Option<Token>, ParseError> {
        self.peek()?;
        let token = self.lookahead.take();
        if let Some(token) = &token {
            self.end = token.end_span();
        }
        Ok(token)
    }

    /// Consumes the next token if it has the given kind.
    pub(super) fn eat(&mut self, kind: TokenKind) -> Result<Option<Token>, ParseError> {
        if self.peek_kind()? == kind {
            self.advance()
        } else {
            Ok(None)
        }
    }

    pub(super) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        match self.eat(kind)? {
            Some(token) => Ok(token),
            None => Err(self.unexpected(&[kind])),
        }
    }

    /// Builds the failure for the current lookahead token.
    pub(super) fn unexpected(&mut self, expected: &[TokenKind]) -> ParseError {
        let found = match self.peek() {
            Ok(token) => token.cloned(),
            Err(err) => return err,
        };
        let found = found.unwrap_or_else(|| Token::eof(self.end));
        ParseFailure::new(found, expected).into()
    }

    pub(super) fn at_end(&mut self) -> Result<bool, ParseError> {
        Ok(self.peek()?.is_none())
    }

    /// Concatenates the text of every token up to, not including, the next
    /// newline or the end of input.
    pub(super) fn rest_of_line(&mut self) -> Result<String, ParseError> {
        let mut line = String::new();
        while !matches!(self.peek_kind()?, TokenKind::Newline | TokenKind::Eof) {
            if let Some(token) = self.advance()? {
                line.push_str(&token.text);
            }
        }
        Ok(line)
    }

    pub fn parse_commit_message(&mut self) -> Result<CommitMessage, ParseError> {
        let title = self.parse_title()?;
        self.parse_title_end()?;
        let (body, comments) = self.parse_body();
        let diff = self.parse_diff_section()?;

        Ok(CommitMessage {
            title,
            body,
            comments,
            diff,
        })
    }
}

/// Parses an already lexed token stream.
pub fn parse(tokens: Vec<Token>) -> Result<CommitMessage, ParseError> {
    Parser::new(tokens.into_iter().map(Ok)).parse_commit_message()
}

/// Truncates any appended diff, then lexes and parses `input` in one pass.
///
/// Lexing is lazy, so a lexical error past the first grammar violation is
/// never reached.
pub fn parse_commit(input: &str) -> Result<CommitMessage, ParseError> {
    Parser::new(Lexer::new(truncate_diff(input))).parse_commit_message()
}

/// Whether the first line of `input` is empty. Git refuses such messages,
/// so they are not worth validating.
pub fn header_is_empty(input: &str) -> bool {
    let first = input.split('\n').next().unwrap_or_default();
    first.strip_suffix('\r').unwrap_or(first).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::CommitType;
    use crate::lexer::tokenize;

    #[test]
    fn test_parse_simple_header() {
        let msg = parse_commit("feat: add login\n").unwrap();
        assert_eq!(msg.title.commit_type, CommitType::Feat);
        assert_eq!(msg.title.scope, None);
        assert!(!msg.title.breaking);
        assert_eq!(msg.title.description, "add login");
    }

    #[test]
    fn test_parse_from_token_vec() {
        let tokens = tokenize("fix(core): handle eof").unwrap();
        let msg = parse(tokens).unwrap();
        assert_eq!(msg.title.scope.as_deref(), Some("core"));
        assert_eq!(msg.title.description, "handle eof");
    }

    #[test]
    fn test_lex_error_after_grammar_error_is_not_reached() {
        let err = parse_commit("nope\n\rbroken").unwrap_err();
        assert!(matches!(err, ParseError::Grammar(_)));
    }

    #[test]
    fn test_lex_error_in_header() {
        let err = parse_commit("feat: a\rb").unwrap_err();
        match err {
            ParseError::Lex(lex) => assert_eq!(lex.offset(), 7),
            other => panic!("Expected lex error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_is_empty() {
        assert!(header_is_empty(""));
        assert!(header_is_empty("\n"));
        assert!(header_is_empty("\r\nfeat: x"));
        assert!(header_is_empty("\n# Please enter the commit message"));
        assert!(!header_is_empty(" \n"));
        assert!(!header_is_empty("feat: x"));
    }
}
