//! Input streams shared by the two recursive-descent parsers: a character
//! stream for the version grammar, and a lexer + token stream for the
//! range grammar.

pub mod char_stream;
pub mod lexer;
pub mod token;
pub mod token_stream;
