//! Recursive-descent parser for the range-expression grammar, lowering
//! every shorthand form to the canonical `>=A & <B` (or `==A`) shape.
//! Disambiguation between the hyphen-range, wildcard-range,
//! partial-version-range and comparison-range productions is done
//! entirely through bounded token lookahead, never backtracking.

use crate::error::Error;
use crate::kinds::TokenKind;
use crate::range::predicate::Predicate;
use crate::stream::lexer::tokenize;
use crate::stream::token_stream::TokenStream;
use crate::version::{Version, MAX_NUMERIC};

/// Parse a full range expression into an evaluable [`Predicate`].
///
/// ```rust
/// use semver2::{Version, parse_range};
///
/// let predicate = parse_range("^1.2.0").unwrap();
/// assert!(predicate.eval(&Version::parse("1.9.9").unwrap()));
/// assert!(!predicate.eval(&Version::parse("2.0.0").unwrap()));
/// ```
pub fn parse_range(input: &str) -> Result<Predicate, Error> {
    let tokens = tokenize(input)?;
    let mut stream = TokenStream::new(tokens);
    let predicate = parse_semver_expr(&mut stream)?;
    stream.consume_kind(&[TokenKind::EndOfInput])?;
    Ok(predicate)
}

/// `semver-expr := "!" "(" semver-expr ")" more | "(" semver-expr ")" more | range more`
fn parse_semver_expr(stream: &mut TokenStream) -> Result<Predicate, Error> {
    let left = match stream.peek().kind {
        TokenKind::Not => {
            stream.consume();
            stream.consume_kind(&[TokenKind::LeftParen])?;
            let inner = parse_semver_expr(stream)?;
            stream.consume_kind(&[TokenKind::RightParen])?;
            inner.negate()
        }
        TokenKind::LeftParen => {
            stream.consume();
            let inner = parse_semver_expr(stream)?;
            stream.consume_kind(&[TokenKind::RightParen])?;
            inner
        }
        _ => parse_range_production(stream)?,
    };
    parse_more(stream, left)
}

/// `more := ( "&" | "&&" | "|" | "||" ) semver-expr | ε`
///
/// Each combinator recurses straight back into `semver-expr`, which is what
/// gives the grammar its right-associative, precedence-free composition —
/// this must be mirrored exactly, not replaced with a left-associative
/// fold, to preserve behavioral parity with existing range strings.
fn parse_more(stream: &mut TokenStream, left: Predicate) -> Result<Predicate, Error> {
    match stream.peek().kind {
        TokenKind::And => {
            stream.consume();
            let right = parse_semver_expr(stream)?;
            Ok(left.and(right))
        }
        TokenKind::Or => {
            stream.consume();
            let right = parse_semver_expr(stream)?;
            Ok(left.or(right))
        }
        _ => Ok(left),
    }
}

/// `range := tilde | caret | wildcard | hyphen | partial | comparison`
fn parse_range_production(stream: &mut TokenStream) -> Result<Predicate, Error> {
    match stream.peek().kind {
        TokenKind::Tilde => parse_tilde(stream),
        TokenKind::Caret => parse_caret(stream),
        TokenKind::Wildcard => parse_wildcard_alone(stream),
        TokenKind::Numeric => match first_non_numeric_dot(stream) {
            TokenKind::Hyphen => parse_hyphen(stream),
            TokenKind::Wildcard => parse_wildcard_prefixed(stream),
            _ => {
                if let Some(kind) = first_non_numeric_dot_within(stream, 4) {
                    if matches!(
                        kind,
                        TokenKind::EndOfInput | TokenKind::And | TokenKind::Or | TokenKind::RightParen
                    ) {
                        return parse_partial(stream);
                    }
                }
                parse_comparison(stream)
            }
        },
        _ => parse_comparison(stream),
    }
}

/// Scan forward from the current position, without bound, for the first
/// token that is neither `NUMERIC` nor `DOT`. Always terminates: the token
/// stream's sentinel `EndOfInput` is itself such a token.
fn first_non_numeric_dot(stream: &TokenStream) -> TokenKind {
    let mut k = 0;
    loop {
        let kind = stream.lookahead(k).kind;
        if kind != TokenKind::Numeric && kind != TokenKind::Dot {
            return kind;
        }
        k += 1;
    }
}

/// Same scan, but bounded: returns `None` if no such token appears within
/// the next `max_k + 1` tokens (used for the partial-version-range
/// disambiguation).
fn first_non_numeric_dot_within(stream: &TokenStream, max_k: usize) -> Option<TokenKind> {
    for k in 0..=max_k {
        let kind = stream.lookahead(k).kind;
        if kind != TokenKind::Numeric && kind != TokenKind::Dot {
            return Some(kind);
        }
    }
    None
}

fn parse_numeric_token(stream: &mut TokenStream) -> Result<u64, Error> {
    let token = stream.consume_kind(&[TokenKind::Numeric])?;
    let value: u128 = token
        .lexeme
        .parse()
        .map_err(|_| Error::NumericOverflow { position: token.position })?;
    if value > MAX_NUMERIC as u128 {
        return Err(Error::NumericOverflow { position: token.position });
    }
    Ok(value as u64)
}

/// Compute `value + 1`, failing with [`Error::ArithmeticOverflow`] rather
/// than wrapping when a tilde/caret/partial/wildcard upper bound cannot be
/// represented.
fn bump(value: u64) -> Result<u64, Error> {
    value.checked_add(1).filter(|v| *v <= MAX_NUMERIC).ok_or_else(|| {
        Error::ArithmeticOverflow {
            message: format!("computing the exclusive upper bound above {} would overflow", value),
        }
    })
}

fn range_predicate(lo: (u64, u64, u64), hi: (u64, u64, u64)) -> Predicate {
    Predicate::Gte(Version::new(lo.0, lo.1, lo.2)).and(Predicate::Lt(Version::new(hi.0, hi.1, hi.2)))
}

/// `version := NUMERIC ( "." NUMERIC ( "." NUMERIC )? )?`, missing
/// components defaulting to zero.
fn parse_version(stream: &mut TokenStream) -> Result<Version, Error> {
    let (major, minor, patch) = parse_core_components(stream)?;
    Ok(Version::new(major, minor.unwrap_or(0), patch.unwrap_or(0)))
}

/// Parses 1-3 dotted numeric components, reporting which were actually
/// present. Shared by `version`, `tilde` and `caret` (which each need to
/// know whether minor/patch were given, not just their defaulted value).
fn parse_core_components(stream: &mut TokenStream) -> Result<(u64, Option<u64>, Option<u64>), Error> {
    let major = parse_numeric_token(stream)?;
    if !stream.is_kind(TokenKind::Dot) {
        return Ok((major, None, None));
    }
    stream.consume();
    let minor = parse_numeric_token(stream)?;
    if !stream.is_kind(TokenKind::Dot) {
        return Ok((major, Some(minor), None));
    }
    stream.consume();
    let patch = parse_numeric_token(stream)?;
    Ok((major, Some(minor), Some(patch)))
}

/// `partial := NUMERIC | NUMERIC "." NUMERIC`
fn parse_major_minor(stream: &mut TokenStream) -> Result<(u64, Option<u64>), Error> {
    let major = parse_numeric_token(stream)?;
    if stream.is_kind(TokenKind::Dot) {
        stream.consume();
        let minor = parse_numeric_token(stream)?;
        Ok((major, Some(minor)))
    } else {
        Ok((major, None))
    }
}

/// `tilde := "~" version`: locks minor when given, otherwise locks major.
/// The patch value itself (when present) only affects the lower bound,
/// never the exclusive upper bound.
fn parse_tilde(stream: &mut TokenStream) -> Result<Predicate, Error> {
    stream.consume_kind(&[TokenKind::Tilde])?;
    let (major, minor, patch) = parse_core_components(stream)?;
    match minor {
        None => Ok(range_predicate((major, 0, 0), (bump(major)?, 0, 0))),
        Some(minor) => Ok(range_predicate(
            (major, minor, patch.unwrap_or(0)),
            (major, bump(minor)?, 0),
        )),
    }
}

/// `caret := "^" version`: locks the leftmost non-zero component.
fn parse_caret(stream: &mut TokenStream) -> Result<Predicate, Error> {
    stream.consume_kind(&[TokenKind::Caret])?;
    let (major, minor, patch) = parse_core_components(stream)?;
    match (minor, patch) {
        (None, _) => Ok(range_predicate((major, 0, 0), (bump(major)?, 0, 0))),
        (Some(minor), None) => {
            if major > 0 {
                Ok(range_predicate((major, minor, 0), (bump(major)?, 0, 0)))
            } else {
                Ok(range_predicate((0, minor, 0), (0, bump(minor)?, 0)))
            }
        }
        (Some(minor), Some(patch)) => {
            if major > 0 {
                Ok(range_predicate((major, minor, patch), (bump(major)?, 0, 0)))
            } else if minor > 0 {
                Ok(range_predicate((0, minor, patch), (0, bump(minor)?, 0)))
            } else if patch > 0 {
                Ok(range_predicate((0, 0, patch), (0, 0, bump(patch)?)))
            } else {
                Ok(Predicate::Eq(Version::new(0, 0, 0)))
            }
        }
    }
}

/// Bare `*` / `x` / `X`, with no leading numeric component at all.
fn parse_wildcard_alone(stream: &mut TokenStream) -> Result<Predicate, Error> {
    stream.consume_kind(&[TokenKind::Wildcard])?;
    Ok(Predicate::Gte(Version::new(0, 0, 0)))
}

/// `NUMERIC "." WILDCARD` or `NUMERIC "." NUMERIC "." WILDCARD`, dispatched
/// once the forward scan has already confirmed a `WILDCARD` token follows
/// the numeric/dot prefix.
fn parse_wildcard_prefixed(stream: &mut TokenStream) -> Result<Predicate, Error> {
    let major = parse_numeric_token(stream)?;
    stream.consume_kind(&[TokenKind::Dot])?;
    if stream.is_kind(TokenKind::Wildcard) {
        stream.consume();
        return Ok(range_predicate((major, 0, 0), (bump(major)?, 0, 0)));
    }
    let minor = parse_numeric_token(stream)?;
    stream.consume_kind(&[TokenKind::Dot])?;
    stream.consume_kind(&[TokenKind::Wildcard])?;
    Ok(range_predicate((major, minor, 0), (major, bump(minor)?, 0)))
}

/// `hyphen := version "-" version`, lowered to the inclusive interval.
fn parse_hyphen(stream: &mut TokenStream) -> Result<Predicate, Error> {
    let lo = parse_version(stream)?;
    stream.consume_kind(&[TokenKind::Hyphen])?;
    let hi = parse_version(stream)?;
    Ok(Predicate::Gte(lo).and(Predicate::Lte(hi)))
}

/// `partial := NUMERIC | NUMERIC "." NUMERIC`, lowered the same way as the
/// corresponding tilde/wildcard form.
fn parse_partial(stream: &mut TokenStream) -> Result<Predicate, Error> {
    let (major, minor) = parse_major_minor(stream)?;
    match minor {
        None => Ok(range_predicate((major, 0, 0), (bump(major)?, 0, 0))),
        Some(minor) => Ok(range_predicate((major, minor, 0), (major, bump(minor)?, 0))),
    }
}

/// `comparison := ( "=" | "!=" | ">" | ">=" | "<" | "<=" )? version`,
/// defaulting to equality when no operator token is present.
fn parse_comparison(stream: &mut TokenStream) -> Result<Predicate, Error> {
    let operator = match stream.peek().kind {
        TokenKind::Equal
        | TokenKind::NotEqual
        | TokenKind::Greater
        | TokenKind::GreaterEqual
        | TokenKind::Less
        | TokenKind::LessEqual => Some(stream.consume().kind),
        _ => None,
    };
    let version = parse_version(stream)?;
    Ok(match operator {
        None | Some(TokenKind::Equal) => Predicate::Eq(version),
        Some(TokenKind::NotEqual) => Predicate::Neq(version),
        Some(TokenKind::Greater) => Predicate::Gt(version),
        Some(TokenKind::GreaterEqual) => Predicate::Gte(version),
        Some(TokenKind::Less) => Predicate::Lt(version),
        Some(TokenKind::LessEqual) => Predicate::Lte(version),
        Some(_) => unreachable!("operator set is exhaustively matched above"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn satisfies(range: &str, version: &str) -> bool {
        let predicate = parse_range(range).unwrap();
        predicate.eval(&Version::parse(version).unwrap())
    }

    #[test]
    fn caret_semantics_at_zero() {
        assert!(satisfies("^0.0.3", "0.0.3"));
        assert!(!satisfies("^0.0.3", "0.0.4"));
        assert!(!satisfies("^0.0.3", "0.1.0"));

        assert!(satisfies("^0.2", "0.2.3"));
        assert!(!satisfies("^0.2", "0.3.0"));

        assert!(satisfies("^1", "1.9.9"));
        assert!(!satisfies("^1", "2.0.0"));
    }

    #[test]
    fn complex_expression() {
        let range = "((>=1.0.1 & <2) | (>=3.0 & <4)) & ((1-1.5) & (~1.5))";
        assert!(satisfies(range, "1.5.0"));
        assert!(!satisfies(range, "2.5.0"));
    }

    #[test]
    fn hyphen_range_vs_prerelease_hyphen() {
        assert!(satisfies("1.0.0 - 2.0.0", "1.2.3"));
        assert!(!satisfies("1.0.0 - 2.0.0", "3.0.0"));

        assert!(Version::parse("1.0.0-alpha").unwrap().is_prerelease());
        assert!(parse_range("1.0.0-alpha").is_err());
    }

    #[test]
    fn wildcards_and_partials() {
        assert!(satisfies("1.*", "1.2.3"));
        assert!(!satisfies("1.*", "2.0.0"));

        assert!(satisfies("2.0", "2.0.9"));
        assert!(!satisfies("2.0", "2.1.0"));

        assert!(satisfies("X", "0.0.1"));
        assert!(satisfies("X", "9.9.9"));
    }

    #[test]
    fn overflow_guarding() {
        let max = i64::MAX as u64;
        let tilde = format!("~{}", max);
        let err = parse_range(&tilde).unwrap_err();
        assert!(matches!(err, Error::ArithmeticOverflow { .. }));

        let eq = format!("={}.{}.{}", max, max, max);
        assert!(satisfies(&eq, &format!("{}.{}.{}", max, max, max)));
    }

    #[test]
    fn and_or_tokens_are_interchangeable() {
        assert_eq!(
            parse_range(">=1.0.0 & <2.0.0").unwrap(),
            parse_range(">=1.0.0 && <2.0.0").unwrap()
        );
        assert_eq!(
            parse_range("<1.0.0 | >=2.0.0").unwrap(),
            parse_range("<1.0.0 || >=2.0.0").unwrap()
        );
    }

    #[test]
    fn unterminated_parenthesis_fails() {
        assert!(parse_range("(>=1.0.0").is_err());
    }

    #[test]
    fn trailing_token_past_end_of_input_fails() {
        assert!(parse_range(">=1.0.0)").is_err());
    }

    #[test]
    fn idempotence_of_identity_range() {
        let v = Version::parse("1.2.3-alpha").unwrap();
        let range = format!("={}", v);
        assert!(satisfies(&range, &v.to_string()));
    }
}
