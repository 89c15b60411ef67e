//! A `Builder` that accumulates normal-version, pre-release and build
//! components and produces a [`Version`] by assembling them into a string
//! and re-parsing it — a single source of truth for validation,
//! generalizing the teacher's `new`/`new_prerelease`/`new_build`
//! constructor family into one accumulating type now that five independent
//! optional components exist.

use std::convert::TryFrom;

use crate::error::Error;
use crate::version::Version;

/// Accumulates the pieces of a [`Version`] before validating them all at
/// once in [`build`](Builder::build).
///
/// ```rust
/// use semver2::Builder;
///
/// let v = Builder::new()
///     .major(1).unwrap()
///     .minor(2).unwrap()
///     .patch(3).unwrap()
///     .prerelease_identifier("rc")
///     .prerelease_identifier("1")
///     .build()
///     .unwrap();
/// assert_eq!(v.to_string(), "1.2.3-rc.1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease_parts: Vec<String>,
    build_parts: Vec<String>,
}

impl Builder {
    pub fn new() -> Self {
        Builder::default()
    }

    /// Set the major component. Fails with [`Error::InvalidArgument`] if
    /// `major` is negative — the one place in the public API where that
    /// check happens at runtime rather than at the `u64` type level.
    pub fn major(mut self, major: i64) -> Result<Self, Error> {
        self.major = non_negative("major", major)?;
        Ok(self)
    }

    pub fn minor(mut self, minor: i64) -> Result<Self, Error> {
        self.minor = non_negative("minor", minor)?;
        Ok(self)
    }

    pub fn patch(mut self, patch: i64) -> Result<Self, Error> {
        self.patch = non_negative("patch", patch)?;
        Ok(self)
    }

    /// Append a pre-release identifier. Validity (no leading zeros on a
    /// numeric identifier, no empty identifier, correct character set) is
    /// only checked once, in [`build`](Builder::build), since the grammar
    /// is the single source of truth for what a valid identifier is.
    pub fn prerelease_identifier(mut self, id: impl Into<String>) -> Self {
        self.prerelease_parts.push(id.into());
        self
    }

    /// Append a build-metadata identifier.
    pub fn build_identifier(mut self, id: impl Into<String>) -> Self {
        self.build_parts.push(id.into());
        self
    }

    /// Assemble the accumulated components into a version string and parse
    /// it under the strict grammar, surfacing whatever error the grammar
    /// raises for a malformed identifier.
    pub fn build(self) -> Result<Version, Error> {
        let mut text = format!("{}.{}.{}", self.major, self.minor, self.patch);
        if !self.prerelease_parts.is_empty() {
            text.push('-');
            text.push_str(&self.prerelease_parts.join("."));
        }
        if !self.build_parts.is_empty() {
            text.push('+');
            text.push_str(&self.build_parts.join("."));
        }
        Version::parse(&text)
    }
}

fn non_negative(component: &str, value: i64) -> Result<u64, Error> {
    u64::try_from(value).map_err(|_| Error::InvalidArgument {
        message: format!("{} must be non-negative, got {}", component, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_plain_version() {
        let v = Builder::new().major(1).unwrap().minor(2).unwrap().patch(3).unwrap().build().unwrap();
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn builds_with_prerelease_and_build() {
        let v = Builder::new()
            .major(2)
            .unwrap()
            .prerelease_identifier("alpha")
            .prerelease_identifier("1")
            .build_identifier("ci")
            .build_identifier("42")
            .build()
            .unwrap();
        assert_eq!(v.to_string(), "2.0.0-alpha.1+ci.42");
    }

    #[test]
    fn negative_component_is_invalid_argument() {
        let err = Builder::new().major(-1).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn invalid_identifier_surfaces_grammar_error() {
        let err = Builder::new().prerelease_identifier("").build().unwrap_err();
        assert!(matches!(err, Error::EmptyIdentifier { .. }));
    }
}
