//! Cursor over the token sequence produced by
//! [`tokenize`](crate::stream::lexer::tokenize), offering the same
//! consume/lookahead shape as the character stream so the range grammar
//! can disambiguate productions via lookahead instead of backtracking.

use crate::error::Error;
use crate::kinds::TokenKind;
use crate::stream::token::Token;

pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream { tokens, pos: 0 }
    }

    /// Peek the `k`-th upcoming token without advancing. Past the sentinel
    /// `EndOfInput` token this keeps returning it, so callers can look
    /// arbitrarily far ahead without bounds-checking.
    pub fn lookahead(&self, k: usize) -> &Token {
        self.tokens
            .get(self.pos + k)
            .unwrap_or_else(|| self.tokens.last().expect("token stream always ends in EOI"))
    }

    pub fn peek(&self) -> &Token {
        self.lookahead(0)
    }

    pub fn position(&self) -> usize {
        self.peek().position
    }

    /// Unconditionally consume and return the next token.
    pub fn consume(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token only if its kind is one of `kinds`, otherwise
    /// fail with [`Error::UnexpectedToken`] without advancing.
    pub fn consume_kind(&mut self, kinds: &[TokenKind]) -> Result<Token, Error> {
        let next = self.peek().clone();
        if kinds.contains(&next.kind) {
            self.consume();
            Ok(next)
        } else {
            log::trace!("unexpected token {:?} at position {}", next.kind, next.position);
            Err(Error::UnexpectedToken {
                found: next.kind,
                position: next.position,
                expected: kinds.to_vec(),
            })
        }
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::lexer::tokenize;

    #[test]
    fn lookahead_past_eoi_keeps_returning_eoi() {
        let stream = TokenStream::new(tokenize("1").unwrap());
        assert_eq!(stream.lookahead(0).kind, TokenKind::Numeric);
        assert_eq!(stream.lookahead(1).kind, TokenKind::EndOfInput);
        assert_eq!(stream.lookahead(50).kind, TokenKind::EndOfInput);
    }

    #[test]
    fn consume_kind_fails_without_advancing() {
        let mut stream = TokenStream::new(tokenize("1.0").unwrap());
        let err = stream.consume_kind(&[TokenKind::Hyphen]).unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { .. }));
        // still sitting on the numeric token
        assert_eq!(stream.peek().kind, TokenKind::Numeric);
    }
}
