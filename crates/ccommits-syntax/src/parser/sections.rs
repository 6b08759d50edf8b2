use super::Parser;
use crate::error::{LexError, ParseError};
use crate::lexer::{Token, TokenKind};

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    /// Body lines and `#` comments, in any order, up to a diff marker or the
    /// end of input. Nothing in here is validated: a lexical error ends the
    /// body and whatever follows it is dropped, like a diff.
    pub(super) fn parse_body(&mut self) -> (Vec<String>, Vec<String>) {
        let mut body = Vec::new();
        let mut comments = Vec::new();

        loop {
            match self.peek_body_kind() {
                TokenKind::Eof | TokenKind::DiffMarker => break,
                TokenKind::Comment => {
                    if let Ok(Some(comment)) = self.advance() {
                        comments.push(comment.text);
                    }
                    self.skip_body_newline();
                }
                _ => {
                    body.push(self.body_line());
                    self.skip_body_newline();
                }
            }
        }

        while body.last().is_some_and(|line: &String| line.trim().is_empty()) {
            body.pop();
        }

        (body, comments)
    }

    /// The lexer is exhausted after an error, so an error reads as the end.
    fn peek_body_kind(&mut self) -> TokenKind {
        self.peek_kind().unwrap_or(TokenKind::Eof)
    }

    fn skip_body_newline(&mut self) {
        if self.peek_body_kind() == TokenKind::Newline {
            let _ = self.advance();
        }
    }

    fn body_line(&mut self) -> String {
        let mut line = String::new();
        while !matches!(self.peek_body_kind(), TokenKind::Newline | TokenKind::Eof) {
            if let Ok(Some(token)) = self.advance() {
                line.push_str(&token.text);
            }
        }
        line
    }

    /// Consumes the diff marker and everything after it.
    pub(super) fn parse_diff_section(&mut self) -> Result<Option<String>, ParseError> {
        let Some(marker) = self.eat(TokenKind::DiffMarker)? else {
            return Ok(None);
        };

        // Diff content is ignored entirely, lexical errors included.
        while let Ok(Some(_)) = self.advance() {}

        Ok(Some(marker.text))
    }
}
