use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::Error;
use crate::grammar::version_grammar;
use crate::range::parser::parse_range;
use crate::range::predicate::Predicate;

/// The widest numeric identifier this crate supports: the positive range of
/// a signed 64-bit integer. Parsing or incrementing a normal version
/// component or a pre-release numeric identifier past this fails with
/// [`Error::NumericOverflow`] / [`Error::ArithmeticOverflow`] rather than
/// silently wrapping. Build-metadata numeric identifiers permit arbitrary
/// digit runs and are never bounds checked.
pub const MAX_NUMERIC: u64 = i64::MAX as u64;

/// A single dot-separated component of a pre-release or build identifier
/// list.
///
/// `Numeric` stores the identifier's digits verbatim rather than as a
/// `u64`: pre-release numeric identifiers never carry a leading zero (so
/// the raw text and the canonical decimal form coincide), but build
/// identifiers may (`+0.3.7`), and the raw text must round-trip exactly
/// through [`Version::to_string`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Numeric(String),
    /// A component containing at least one non-digit character, drawn from
    /// `[0-9A-Za-z-]`.
    AlphaNumeric(String),
}

impl Identifier {
    fn numeric(digits: impl Into<String>) -> Self {
        Identifier::Numeric(digits.into())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(s) => f.write_str(s),
            Identifier::AlphaNumeric(s) => f.write_str(s),
        }
    }
}

macro_rules! id_from_number {
    ($num:ty) => {
        impl From<$num> for Identifier {
            fn from(n: $num) -> Self {
                Identifier::numeric(n.to_string())
            }
        }
    };
}

id_from_number!(u8);
id_from_number!(u16);
id_from_number!(u32);
id_from_number!(u64);

impl From<&str> for Identifier {
    /// Builds an [`Identifier::AlphaNumeric`] from any string. To build a
    /// numeric identifier use a numeric `From` impl (e.g. `3.into()`)
    /// instead, since a numeric identifier's validity depends on context
    /// (leading zeros are rejected for pre-release, permitted for build).
    fn from(s: &str) -> Self {
        Identifier::AlphaNumeric(s.to_string())
    }
}

/// The distinguished "absent" pre-release value, plus the present case
/// carrying an ordered, nonempty-per-identifier list. A tagged enum rather
/// than a sentinel empty list, so absence and "pre-release with zero
/// identifiers" (which the grammar never produces anyway) can't be
/// confused. Renders as the empty string when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Prerelease {
    #[default]
    Absent,
    Present(Vec<Identifier>),
}

impl Prerelease {
    pub fn is_present(&self) -> bool {
        matches!(self, Prerelease::Present(_))
    }

    pub fn identifiers(&self) -> &[Identifier] {
        match self {
            Prerelease::Absent => &[],
            Prerelease::Present(ids) => ids,
        }
    }
}

impl fmt::Display for Prerelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_dotted(f, self.identifiers())
    }
}

/// The distinguished "absent" build-metadata value, plus the present case.
/// Identical shape to [`Prerelease`]; kept as a separate type so the two
/// cannot be confused at a call site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Build {
    #[default]
    Absent,
    Present(Vec<Identifier>),
}

impl Build {
    pub fn is_present(&self) -> bool {
        matches!(self, Build::Present(_))
    }

    pub fn identifiers(&self) -> &[Identifier] {
        match self {
            Build::Absent => &[],
            Build::Present(ids) => ids,
        }
    }
}

impl fmt::Display for Build {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_dotted(f, self.identifiers())
    }
}

fn write_dotted(f: &mut fmt::Formatter<'_>, ids: &[Identifier]) -> fmt::Result {
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            write!(f, ".")?;
        }
        write!(f, "{}", id)?;
    }
    Ok(())
}

/// Ordering between two numeric-identifier digit strings, treating each as
/// an arbitrary-precision non-negative integer (so a build identifier like
/// `"008"` compares as `8`, without ever materializing a fixed-width
/// integer that could overflow on an "arbitrary digit run").
fn numeric_text_cmp(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Element-wise identifier list comparison, shared by the default
/// pre-release ordering and the build-aware ordering: numeric
/// identifiers compare numerically, alphanumeric identifiers compare
/// lexicographically in ASCII order, numeric identifiers always have lower
/// precedence than alphanumeric ones, and if every common identifier is
/// equal the longer list has higher precedence.
fn compare_identifier_lists(a: &[Identifier], b: &[Identifier]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = match (x, y) {
            (Identifier::Numeric(x), Identifier::Numeric(y)) => numeric_text_cmp(x, y),
            (Identifier::AlphaNumeric(x), Identifier::AlphaNumeric(y)) => x.cmp(y),
            (Identifier::Numeric(_), Identifier::AlphaNumeric(_)) => Ordering::Less,
            (Identifier::AlphaNumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

/// A single, immutable Semantic Version value.
///
/// ```rust
/// use semver2::Version;
///
/// let v = Version::parse("1.2.3-alpha.1+build.7").unwrap();
/// assert_eq!(v.major(), 1);
/// assert_eq!(v.to_string(), "1.2.3-alpha.1+build.7");
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    pub(crate) major: u64,
    pub(crate) minor: u64,
    pub(crate) patch: u64,
    pub(crate) prerelease: Prerelease,
    pub(crate) build: Build,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.prerelease.is_present() {
            write!(f, "-{}", self.prerelease)?;
        }
        if self.build.is_present() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

impl Ord for Version {
    /// The default SemVer precedence ordering: major, then
    /// minor, then patch numerically; a version lacking a pre-release
    /// outranks the same version with one; otherwise pre-release identifier
    /// lists are compared element-wise. Build metadata is never consulted.
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (Prerelease::Absent, Prerelease::Absent) => Ordering::Equal,
                (Prerelease::Absent, Prerelease::Present(_)) => Ordering::Greater,
                (Prerelease::Present(_), Prerelease::Absent) => Ordering::Less,
                (Prerelease::Present(a), Prerelease::Present(b)) => {
                    compare_identifier_lists(a, b)
                }
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    /// Equality is precedence-equality: build metadata never affects it.
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    /// Consistent with [`PartialEq`]: hashes only the normal version and
    /// pre-release list, never build metadata.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        match &self.prerelease {
            Prerelease::Absent => {
                0u8.hash(state);
            }
            Prerelease::Present(ids) => {
                1u8.hash(state);
                for id in ids {
                    match id {
                        Identifier::Numeric(s) => {
                            0u8.hash(state);
                            s.trim_start_matches('0').hash(state);
                        }
                        Identifier::AlphaNumeric(s) => {
                            1u8.hash(state);
                            s.hash(state);
                        }
                    }
                }
            }
        }
    }
}

impl Version {
    /// Construct a version from a normal-version triple, with no
    /// pre-release and no build metadata.
    ///
    /// ```rust
    /// use semver2::Version;
    ///
    /// assert_eq!(Version::new(2, 3, 0).to_string(), "2.3.0");
    /// ```
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: Prerelease::Absent,
            build: Build::Absent,
        }
    }

    /// Construct a version with a pre-release identifier list.
    ///
    /// ```rust
    /// use semver2::{Identifier, Version};
    ///
    /// let v = Version::with_prerelease(2, 3, 0, vec![Identifier::from("alpha")]);
    /// assert_eq!(v.to_string(), "2.3.0-alpha");
    /// ```
    pub fn with_prerelease(major: u64, minor: u64, patch: u64, prerelease: Vec<Identifier>) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: Prerelease::Present(prerelease),
            build: Build::Absent,
        }
    }

    /// Construct a version with build metadata.
    ///
    /// ```rust
    /// use semver2::{Identifier, Version};
    ///
    /// let v = Version::with_build(2, 3, 0, vec![Identifier::from("githash")]);
    /// assert_eq!(v.to_string(), "2.3.0+githash");
    /// ```
    pub fn with_build(major: u64, minor: u64, patch: u64, build: Vec<Identifier>) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: Prerelease::Absent,
            build: Build::Present(build),
        }
    }

    /// Construct a version from every component at once.
    pub fn with_prerelease_and_build(
        major: u64,
        minor: u64,
        patch: u64,
        prerelease: Vec<Identifier>,
        build: Vec<Identifier>,
    ) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: Prerelease::Present(prerelease),
            build: Build::Present(build),
        }
    }

    /// Parse a version string under the strict grammar.
    ///
    /// ```rust
    /// use semver2::Version;
    ///
    /// assert!(Version::parse("1.2.3").is_ok());
    /// assert!(Version::parse("1.2").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, Error> {
        version_grammar::parse(input, version_grammar::Mode::Strict)
    }

    /// Parse a version string under the lenient grammar, which
    /// additionally accepts bare `M` and `M.m` cores, filling the missing
    /// components with zero.
    ///
    /// ```rust
    /// use semver2::Version;
    ///
    /// let v = Version::parse_lenient("1.2").unwrap();
    /// assert_eq!(v.to_string(), "1.2.0");
    /// ```
    pub fn parse_lenient(input: &str) -> Result<Self, Error> {
        version_grammar::parse(input, version_grammar::Mode::Lenient)
    }

    /// Parse a version string, discarding any error.
    ///
    /// ```rust
    /// use semver2::Version;
    ///
    /// assert!(Version::try_parse("1.2.3").is_some());
    /// assert!(Version::try_parse("1.2").is_none());
    /// ```
    pub fn try_parse(input: &str) -> Option<Self> {
        Self::parse(input).ok()
    }

    /// Whether `input` parses successfully under the strict grammar.
    ///
    /// ```rust
    /// use semver2::Version;
    ///
    /// assert!(Version::is_valid("1.2.3"));
    /// assert!(!Version::is_valid("01.2.3"));
    /// ```
    pub fn is_valid(input: &str) -> bool {
        Self::try_parse(input).is_some()
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn prerelease(&self) -> &Prerelease {
        &self.prerelease
    }

    pub fn build(&self) -> &Build {
        &self.build
    }

    /// The `M.m.p` prefix, ignoring pre-release and build.
    pub fn normal_version(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_present()
    }

    /// Stable means the normal version is at least `1.0.0` and there is no
    /// pre-release.
    pub fn is_stable(&self) -> bool {
        self.major >= 1 && !self.is_prerelease()
    }

    /// The public API is considered stable once `major >= 1`, regardless of
    /// pre-release status.
    pub fn is_public_api_stable(&self) -> bool {
        self.major >= 1
    }

    /// Two versions are API-compatible when they share a major component,
    /// both have `major >= 1`, and `self` is not older than `other` on the
    /// normal version.
    pub fn is_public_api_compatible_with(&self, other: &Version) -> bool {
        self.major == other.major
            && self.is_public_api_stable()
            && other.is_public_api_stable()
            && (self.major, self.minor, self.patch) >= (other.major, other.minor, other.patch)
    }

    pub fn greater_than(&self, other: &Version) -> bool {
        self > other
    }

    pub fn greater_than_or_equal(&self, other: &Version) -> bool {
        self >= other
    }

    pub fn less_than(&self, other: &Version) -> bool {
        self < other
    }

    pub fn less_than_or_equal(&self, other: &Version) -> bool {
        self <= other
    }

    /// A total ordering that, unlike the default [`Ord`] impl, breaks ties
    /// between versions differing only in build metadata: the version
    /// lacking build metadata is considered higher.
    ///
    /// ```rust
    /// use semver2::Version;
    /// use std::cmp::Ordering;
    ///
    /// let with_build = Version::parse("1.0.0+build.1").unwrap();
    /// let without_build = Version::parse("1.0.0").unwrap();
    /// assert_eq!(with_build, without_build); // default order ignores build
    /// assert_eq!(without_build.compare_with_build(&with_build), Ordering::Greater);
    /// ```
    pub fn compare_with_build(&self, other: &Version) -> Ordering {
        self.cmp(other).then_with(|| match (&self.build, &other.build) {
            (Build::Absent, Build::Absent) => Ordering::Equal,
            (Build::Absent, Build::Present(_)) => Ordering::Greater,
            (Build::Present(_), Build::Absent) => Ordering::Less,
            (Build::Present(a), Build::Present(b)) => compare_identifier_lists(a, b),
        })
    }

    fn checked_inc(value: u64) -> Result<u64, Error> {
        value
            .checked_add(1)
            .filter(|n| *n <= MAX_NUMERIC)
            .ok_or_else(|| Error::ArithmeticOverflow {
                message: format!("incrementing {} would overflow the numeric width limit", value),
            })
    }

    /// `(M+1, 0, 0)`, clearing pre-release and build unless `pre` is given,
    /// in which case it becomes the new pre-release.
    pub fn increment_major(&self, pre: Option<Vec<Identifier>>) -> Result<Version, Error> {
        Ok(Version {
            major: Self::checked_inc(self.major)?,
            minor: 0,
            patch: 0,
            prerelease: pre.map_or(Prerelease::Absent, Prerelease::Present),
            build: Build::Absent,
        })
    }

    /// `(M, m+1, 0)`, clearing pre-release and build unless `pre` is given.
    pub fn increment_minor(&self, pre: Option<Vec<Identifier>>) -> Result<Version, Error> {
        Ok(Version {
            major: self.major,
            minor: Self::checked_inc(self.minor)?,
            patch: 0,
            prerelease: pre.map_or(Prerelease::Absent, Prerelease::Present),
            build: Build::Absent,
        })
    }

    /// `(M, m, p+1)`, clearing pre-release and build unless `pre` is given.
    pub fn increment_patch(&self, pre: Option<Vec<Identifier>>) -> Result<Version, Error> {
        Ok(Version {
            major: self.major,
            minor: self.minor,
            patch: Self::checked_inc(self.patch)?,
            prerelease: pre.map_or(Prerelease::Absent, Prerelease::Present),
            build: Build::Absent,
        })
    }

    /// Increment the pre-release: bump the last identifier if it's numeric,
    /// otherwise append `1`. Fails with [`Error::InvalidOperation`] if there
    /// is no pre-release to increment, or [`Error::ArithmeticOverflow`] if
    /// the bumped identifier would exceed [`MAX_NUMERIC`].
    pub fn increment_prerelease(&self) -> Result<Version, Error> {
        let ids = match &self.prerelease {
            Prerelease::Absent => {
                return Err(Error::InvalidOperation {
                    message: "cannot increment an absent pre-release".to_string(),
                })
            }
            Prerelease::Present(ids) => ids.clone(),
        };
        let incremented = increment_identifier_list(ids, true)?;
        Ok(Version {
            prerelease: Prerelease::Present(incremented),
            ..self.clone()
        })
    }

    /// Increment the build metadata, by the same rule as
    /// [`increment_prerelease`](Self::increment_prerelease). Build
    /// identifiers are never width-checked, matching their "arbitrary digit
    /// run" grammar.
    pub fn increment_build(&self) -> Result<Version, Error> {
        let ids = match &self.build {
            Build::Absent => {
                return Err(Error::InvalidOperation {
                    message: "cannot increment absent build metadata".to_string(),
                })
            }
            Build::Present(ids) => ids.clone(),
        };
        let incremented = increment_identifier_list(ids, false)?;
        Ok(Version {
            build: Build::Present(incremented),
            ..self.clone()
        })
    }

    /// Replace the pre-release, re-parsing `value` the way the facade's
    /// [`Builder`](crate::Builder) does, so an invalid string is rejected
    /// rather than stored verbatim.
    pub fn set_prerelease(&self, value: &str) -> Result<Version, Error> {
        let parsed = version_grammar::parse_prerelease_identifiers(value)?;
        Ok(Version {
            prerelease: Prerelease::Present(parsed),
            ..self.clone()
        })
    }

    /// Replace the build metadata, re-parsing `value`.
    pub fn set_build(&self, value: &str) -> Result<Version, Error> {
        let parsed = version_grammar::parse_build_identifiers(value)?;
        Ok(Version {
            build: Build::Present(parsed),
            ..self.clone()
        })
    }

    /// Evaluate a pre-parsed [`Predicate`] against this version.
    pub fn satisfies(&self, predicate: &Predicate) -> bool {
        predicate.eval(self)
    }

    /// Parse `range` as a range expression and evaluate it against
    /// this version in one step.
    ///
    /// ```rust
    /// use semver2::Version;
    ///
    /// let v = Version::parse("1.2.3").unwrap();
    /// assert!(v.satisfies_range("^1.0.0").unwrap());
    /// assert!(!v.satisfies_range("^2.0.0").unwrap());
    /// ```
    pub fn satisfies_range(&self, range: &str) -> Result<bool, Error> {
        let predicate = parse_range(range)?;
        Ok(self.satisfies(&predicate))
    }
}

/// Carry-increment a decimal digit string by one, without ever overflowing
/// (arbitrary precision): `"099" -> "100"`, `"9" -> "10"`.
fn increment_digit_string(s: &str) -> String {
    let mut digits: Vec<u8> = s.bytes().map(|b| b - b'0').collect();
    let mut i = digits.len();
    loop {
        if i == 0 {
            digits.insert(0, 1);
            break;
        }
        i -= 1;
        if digits[i] == 9 {
            digits[i] = 0;
        } else {
            digits[i] += 1;
            break;
        }
    }
    digits.into_iter().map(|d| (d + b'0') as char).collect()
}

fn increment_identifier_list(
    mut ids: Vec<Identifier>,
    enforce_width: bool,
) -> Result<Vec<Identifier>, Error> {
    match ids.last_mut() {
        Some(Identifier::Numeric(s)) => {
            let bumped = increment_digit_string(s);
            if enforce_width {
                let value: u128 = bumped.parse().map_err(|_| Error::ArithmeticOverflow {
                    message: "incrementing the trailing identifier would overflow".to_string(),
                })?;
                if value > MAX_NUMERIC as u128 {
                    return Err(Error::ArithmeticOverflow {
                        message: "incrementing the trailing identifier would overflow".to_string(),
                    });
                }
            }
            *s = bumped;
        }
        _ => ids.push(Identifier::numeric("1")),
    }
    Ok(ids)
}
