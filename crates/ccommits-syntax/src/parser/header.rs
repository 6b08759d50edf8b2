use super::Parser;
use crate::ast::{CommitTitle, CommitType};
use crate::error::{LexError, ParseError, ParseFailure};
use crate::lexer::{Token, TokenKind};
use smallvec::SmallVec;

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    /// `CommitType Scope? BreakingModifier? Colon Whitespace Description`
    pub(super) fn parse_title(&mut self) -> Result<CommitTitle, ParseError> {
        let type_token = self.expect(TokenKind::CommitType)?;
        let commit_type = CommitType::from_keyword(&type_token.text)
            .ok_or_else(|| ParseFailure::new(type_token.clone(), &[TokenKind::CommitType]))?;

        let scope = self
            .eat(TokenKind::Scope)?
            .map(|token| token.value().to_string());
        let breaking = self.eat(TokenKind::BreakingModifier)?.is_some();

        if self.eat(TokenKind::Colon)?.is_none() {
            let mut expected: SmallVec<[TokenKind; 4]> = SmallVec::new();
            if scope.is_none() && !breaking {
                expected.push(TokenKind::Scope);
            }
            if !breaking {
                expected.push(TokenKind::BreakingModifier);
            }
            expected.push(TokenKind::Colon);
            return Err(self.unexpected(&expected));
        }

        self.expect(TokenKind::Whitespace)?;
        let description = self.parse_description()?;

        Ok(CommitTitle {
            commit_type,
            scope,
            breaking,
            description,
        })
    }

    fn parse_description(&mut self) -> Result<String, ParseError> {
        if matches!(self.peek_kind()?, TokenKind::Newline | TokenKind::Eof) {
            return Err(self.unexpected(&[TokenKind::Text]));
        }

        let description = self.rest_of_line()?;
        Ok(description.trim_end().to_string())
    }

    /// `Newline+`, or the end of input for a message without a trailing
    /// newline. Past the first newline the header is complete, so a lexical
    /// error in the blank lines after it only ends the message.
    pub(super) fn parse_title_end(&mut self) -> Result<(), ParseError> {
        if self.at_end()? {
            return Ok(());
        }

        self.expect(TokenKind::Newline)?;
        while let Ok(Some(_)) = self.eat(TokenKind::Newline) {}
        Ok(())
    }
}
