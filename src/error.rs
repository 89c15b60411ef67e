use thiserror::Error;

use crate::kinds::{CharClass, TokenKind};

/// The single failure space shared by the version grammar and the range
/// grammar. Every fallible entry point returns `Result<_, Error>`;
/// nothing in this crate panics or recovers a parse error locally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A public entry received a disallowed value (currently only raised by
    /// [`crate::Builder`], since the typed constructors reject negatives at
    /// the `u64` type level).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The character stream consumed a character outside the expected class
    /// set, at the given zero-based position.
    #[error("unexpected character {found} at position {position}, expected {}", display_char_classes(expected))]
    UnexpectedCharacter {
        found: DisplayChar,
        position: usize,
        expected: Vec<CharClass>,
    },

    /// The range grammar's token stream consumed a token outside the
    /// expected kind set.
    #[error("unexpected token {found} at position {position}, expected {}", display_token_kinds(expected))]
    UnexpectedToken {
        found: TokenKind,
        position: usize,
        expected: Vec<TokenKind>,
    },

    /// The lexer could not match any token at the given position.
    #[error("could not tokenize {remaining:?} starting at position {position}")]
    Lexer { remaining: String, position: usize },

    /// A numeric identifier began with `0` followed by further digits.
    #[error("numeric identifier at position {position} has a leading zero")]
    LeadingZeros { position: usize },

    /// Two consecutive dots, or a leading/trailing dot, produced an empty
    /// identifier.
    #[error("empty identifier at position {position}")]
    EmptyIdentifier { position: usize },

    /// A numeric identifier exceeded the documented 64-bit width limit.
    #[error("numeric identifier at position {position} overflows the supported width")]
    NumericOverflow { position: usize },

    /// An operation was attempted that the value's current state does not
    /// support (e.g. incrementing an absent pre-release).
    #[error("invalid operation: {message}")]
    InvalidOperation { message: String },

    /// An increment computed during range lowering, or via the facade,
    /// would overflow the numeric width limit.
    #[error("arithmetic overflow: {message}")]
    ArithmeticOverflow { message: String },
}

/// A character, or the absence of one (end of input), formatted for error
/// messages without pulling `Option<char>` through every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayChar(pub Option<char>);

impl std::fmt::Display for DisplayChar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(c) => write!(f, "'{}'", c),
            None => f.write_str("end of input"),
        }
    }
}

fn display_char_classes(classes: &[CharClass]) -> String {
    join_display(classes)
}

fn display_token_kinds(kinds: &[TokenKind]) -> String {
    join_display(kinds)
}

fn join_display<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" or ")
}

pub type Result<T> = std::result::Result<T, Error>;
