//! Regex-anchored longest-match tokenizer for the range-expression grammar.
//! The pattern table is compiled exactly once, process-wide, behind
//! a [`once_cell::sync::Lazy`] and shared read-only by every call to
//! [`tokenize`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Error;
use crate::kinds::TokenKind;
use crate::stream::token::Token;

/// One entry in the pattern table: a token kind and the anchored pattern
/// that recognizes it. Patterns are tried in this order, so multi-character
/// lexemes (`>=`, `&&`, `!=`, ...) are listed ahead of the single-character
/// prefixes they would otherwise be shadowed by.
static PATTERNS: Lazy<Vec<(TokenKind, Regex)>> = Lazy::new(|| {
    let table: &[(TokenKind, &str)] = &[
        (TokenKind::GreaterEqual, r"^>="),
        (TokenKind::LessEqual, r"^<="),
        (TokenKind::NotEqual, r"^!="),
        (TokenKind::And, r"^(?:&&|&)"),
        (TokenKind::Or, r"^(?:\|\||\|)"),
        (TokenKind::Greater, r"^>"),
        (TokenKind::Less, r"^<"),
        (TokenKind::Not, r"^!"),
        (TokenKind::Tilde, r"^~"),
        (TokenKind::Caret, r"^\^"),
        (TokenKind::Wildcard, r"^(?:\*|x|X)"),
        (TokenKind::Dot, r"^\."),
        (TokenKind::Hyphen, r"^-"),
        (TokenKind::Equal, r"^="),
        (TokenKind::LeftParen, r"^\("),
        (TokenKind::RightParen, r"^\)"),
        (TokenKind::Numeric, r"^(?:0|[1-9][0-9]*)"),
    ];
    table
        .iter()
        .map(|(kind, pattern)| (*kind, Regex::new(pattern).expect("static pattern is valid")))
        .collect()
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+").expect("static pattern is valid"));

/// Tokenize an entire range expression, dropping whitespace and appending a
/// synthesized [`TokenKind::EndOfInput`] sentinel.
pub fn tokenize(input: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    'outer: while pos < input.len() {
        let remaining = &input[pos..];

        if let Some(m) = WHITESPACE.find(remaining) {
            pos += m.end();
            continue;
        }

        for (kind, re) in PATTERNS.iter() {
            if let Some(m) = re.find(remaining) {
                let lexeme = &remaining[..m.end()];
                tokens.push(Token::new(*kind, lexeme, pos));
                pos += m.end();
                continue 'outer;
            }
        }

        log::trace!("could not tokenize {:?} at position {}", remaining, pos);
        return Err(Error::Lexer {
            remaining: remaining.to_string(),
            position: pos,
        });
    }

    tokens.push(Token::eoi(pos));
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_comparison() {
        let tokens = tokenize(">=1.2.3").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::GreaterEqual,
                TokenKind::Numeric,
                TokenKind::Dot,
                TokenKind::Numeric,
                TokenKind::Dot,
                TokenKind::Numeric,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn drops_whitespace() {
        let tokens = tokenize("1.0.0 - 2.0.0").unwrap();
        assert!(tokens.iter().all(|t| t.lexeme != " "));
    }

    #[test]
    fn prefers_longest_match_for_operators() {
        let tokens = tokenize(">= && !=").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::GreaterEqual);
        assert_eq!(tokens[1].kind, TokenKind::And);
        assert_eq!(tokens[2].kind, TokenKind::NotEqual);
    }

    #[test]
    fn rejects_unmatched_input() {
        let err = tokenize("1.0.0 @ 2").unwrap_err();
        match err {
            Error::Lexer { position, .. } => assert_eq!(position, 6),
            _ => panic!("wrong error kind"),
        }
    }
}
