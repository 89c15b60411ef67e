//! The range-expression predicate tree: an immutable AST that a
//! [`Version`] can be evaluated against. Built exclusively by
//! [`crate::range::parser::parse_range`]'s lowering of the range grammar;
//! never constructed or mutated by hand outside this crate other
//! than via the leaf/combinator constructors below, which callers may use
//! to build predicates programmatically.

use crate::version::Version;

/// A node in the range-expression predicate tree. Leaves compare a
/// candidate version against a fixed target using the default (build
/// ignoring) [`Version`] ordering; internal nodes combine child predicates
/// with short-circuit boolean logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Eq(Version),
    Neq(Version),
    Gt(Version),
    Gte(Version),
    Lt(Version),
    Lte(Version),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate) -> Predicate {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    pub fn negate(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }

    /// Evaluate this predicate tree against `version`: a pure,
    /// terminating, side-effect-free recursive walk.
    pub fn eval(&self, version: &Version) -> bool {
        match self {
            Predicate::Eq(target) => version == target,
            Predicate::Neq(target) => version != target,
            Predicate::Gt(target) => version > target,
            Predicate::Gte(target) => version >= target,
            Predicate::Lt(target) => version < target,
            Predicate::Lte(target) => version <= target,
            Predicate::And(a, b) => a.eval(version) && b.eval(version),
            Predicate::Or(a, b) => a.eval(version) || b.eval(version),
            Predicate::Not(inner) => !inner.eval(version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_predicates_compare_against_target() {
        let target = Version::new(1, 0, 0);
        let v = Version::new(1, 2, 0);
        assert!(Predicate::Gte(target.clone()).eval(&v));
        assert!(!Predicate::Lt(target).eval(&v));
    }

    #[test]
    fn and_or_not_short_circuit_correctly() {
        let v = Version::new(1, 5, 0);
        let lower = Predicate::Gte(Version::new(1, 0, 0));
        let upper = Predicate::Lt(Version::new(2, 0, 0));
        let inside = lower.clone().and(upper.clone());
        assert!(inside.eval(&v));

        let outside = Predicate::Lt(Version::new(1, 0, 0)).or(Predicate::Gte(Version::new(2, 0, 0)));
        assert!(!outside.eval(&v));

        assert!(!inside.negate().eval(&v));
    }
}
