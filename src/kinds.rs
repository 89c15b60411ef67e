//! Shared vocabulary used by both parsers: the character classes the version
//! grammar's character stream understands, and the token kinds the range
//! grammar's lexer produces. Kept separate from `error` so neither stream
//! module has to import the error type just to describe what it expected.

use std::fmt;

/// A class of character the [`CharStream`](crate::stream::char_stream::CharStream)
/// can be asked to match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Digit,
    Letter,
    Dot,
    Hyphen,
    Plus,
    /// End of input, matched as a pseudo-character class so callers can ask
    /// for e.g. "a digit or end of input" in one lookahead.
    EndOfInput,
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CharClass::Digit => "a digit",
            CharClass::Letter => "a letter",
            CharClass::Dot => "'.'",
            CharClass::Hyphen => "'-'",
            CharClass::Plus => "'+'",
            CharClass::EndOfInput => "end of input",
        };
        f.write_str(s)
    }
}

/// The token kinds produced by the range-expression lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Numeric,
    Dot,
    Hyphen,
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Tilde,
    Caret,
    Wildcard,
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
    /// Synthesized once, as the final token of every token stream.
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Numeric => "a number",
            TokenKind::Dot => "'.'",
            TokenKind::Hyphen => "'-'",
            TokenKind::Equal => "'='",
            TokenKind::NotEqual => "'!='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::Less => "'<'",
            TokenKind::LessEqual => "'<='",
            TokenKind::Tilde => "'~'",
            TokenKind::Caret => "'^'",
            TokenKind::Wildcard => "'*', 'x' or 'X'",
            TokenKind::And => "'&' or '&&'",
            TokenKind::Or => "'|' or '||'",
            TokenKind::Not => "'!'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::EndOfInput => "end of input",
        };
        f.write_str(s)
    }
}
