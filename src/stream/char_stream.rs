//! A read-only cursor over a version string.
//!
//! The version grammar is the only consumer: it never backtracks further
//! than a handful of characters, so the stream is built over a `Vec<char>`
//! rather than anything fancier. Every method is `&mut self` except the
//! lookaheads, which never advance the cursor.

use crate::error::{DisplayChar, Error};
use crate::kinds::CharClass;

/// Cursor over the characters of a version string, tracking position for
/// error reporting.
pub struct CharStream {
    chars: Vec<char>,
    pos: usize,
}

impl CharStream {
    pub fn new(input: &str) -> Self {
        CharStream {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// The current zero-based position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// True once every character has been consumed.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Peek the `k`-th upcoming character (`k = 0` is the next character to
    /// be consumed) without advancing the cursor. Returns `None` past the
    /// end of input.
    pub fn lookahead(&self, k: usize) -> Option<char> {
        self.chars.get(self.pos + k).copied()
    }

    /// Consume and return the next character, or `None` at end of input.
    /// Unlike [`consume_class`](Self::consume_class), this never fails.
    pub fn consume(&mut self) -> Option<char> {
        let c = self.lookahead(0)?;
        self.pos += 1;
        Some(c)
    }

    /// Consume the next character only if it belongs to one of `classes`,
    /// otherwise fail with [`Error::UnexpectedCharacter`] without advancing.
    pub fn consume_class(&mut self, classes: &[CharClass]) -> Result<char, Error> {
        let next = self.lookahead(0);
        match next {
            Some(c) if classes.iter().any(|class| matches(c, *class)) => {
                self.pos += 1;
                Ok(c)
            }
            Some(c) => {
                log::trace!("unexpected character '{}' at position {}", c, self.pos);
                Err(Error::UnexpectedCharacter {
                    found: DisplayChar(Some(c)),
                    position: self.pos,
                    expected: classes.to_vec(),
                })
            }
            None => {
                if classes.contains(&CharClass::EndOfInput) {
                    // Consuming "end of input" doesn't advance past anything;
                    // it simply confirms the expectation.
                    Ok('\0')
                } else {
                    log::trace!("unexpected end of input at position {}", self.pos);
                    Err(Error::UnexpectedCharacter {
                        found: DisplayChar(None),
                        position: self.pos,
                        expected: classes.to_vec(),
                    })
                }
            }
        }
    }

    /// Test whether the immediate next character matches any of `classes`,
    /// without consuming or failing.
    pub fn positive_lookahead(&self, classes: &[CharClass]) -> bool {
        match self.lookahead(0) {
            Some(c) => classes.iter().any(|class| matches(c, *class)),
            None => classes.contains(&CharClass::EndOfInput),
        }
    }

    /// Scan forward from the current position until `stop` or end of input,
    /// returning whether any character in `classes` was seen along the way.
    /// The scan does not advance the cursor.
    pub fn positive_lookahead_before(&self, stop: CharClass, classes: &[CharClass]) -> bool {
        let mut i = self.pos;
        while let Some(c) = self.chars.get(i).copied() {
            if matches(c, stop) {
                return false;
            }
            if classes.iter().any(|class| matches(c, *class)) {
                return true;
            }
            i += 1;
        }
        false
    }
}

fn matches(c: char, class: CharClass) -> bool {
    match class {
        CharClass::Digit => c.is_ascii_digit(),
        CharClass::Letter => c.is_ascii_alphabetic(),
        CharClass::Dot => c == '.',
        CharClass::Hyphen => c == '-',
        CharClass::Plus => c == '+',
        CharClass::EndOfInput => false,
    }
}
