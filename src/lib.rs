//! Semantic version parsing, comparison and range evaluation (SemVer 2.0.0).
//!
//! ```rust
//! use semver2::Version;
//!
//! let v = Version::parse("1.2.3-rc.1+build.7").unwrap();
//! assert!(v.is_prerelease());
//! assert!(v.satisfies_range("^1.0.0").unwrap());
//! ```

mod builder;
mod error;
mod grammar;
mod kinds;
mod range;
mod stream;
mod version;

pub use builder::Builder;
pub use error::{Error, Result};
pub use kinds::{CharClass, TokenKind};
pub use range::{parse_range, Predicate};
pub use version::{Build, Identifier, Prerelease, Version, MAX_NUMERIC};
